use bevy::prelude::*;

/// Tags every entity a game spawns for its round, so a single sweep can
/// remove the round whether it ended normally or was switched away.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEntity;

pub fn despawn_all<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// World-level variant used from game module teardown.
pub fn despawn_all_in_world<T: Component>(world: &mut World) {
    let entities = world
        .query_filtered::<Entity, With<T>>()
        .iter(world)
        .collect::<Vec<_>>();
    for entity in entities {
        if let Ok(entity) = world.get_entity_mut(entity) {
            entity.despawn_recursive();
        }
    }
}
