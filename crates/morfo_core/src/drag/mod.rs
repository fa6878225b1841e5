//! Pointer and touch driven drag-and-drop.
//!
//! Games bind the engine by inserting a [`DragBinding`], tag their pieces
//! with [`Draggable`] and their targets with [`DropZone`], and read
//! [`DropEvent`]s. The engine refuses new gestures until the handler passes
//! the event's [`ReleaseToken`] back to [`DragEngine::release`], which lets
//! accept/reject feedback play out before the next drag.

use core::time::Duration;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::cleanup::despawn_all_in_world;
use crate::input::{PointerPhase, PointerSample, pointer_sample};

mod engine;
pub use engine::*;
pub use engine::DragStart;

const PLACEHOLDER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);
const CLONE_LABEL_SIZE: f32 = 20.0;

pub struct DragPlugin;

impl Plugin for DragPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragEngine>()
            .init_resource::<DragConfig>()
            .init_resource::<DragPointer>()
            .init_resource::<AutoScroll>()
            .add_event::<DropEvent>()
            .add_systems(
                Update,
                (
                    read_pointer,
                    start_drag,
                    follow_pointer,
                    end_drag,
                    auto_scroll,
                )
                    .chain()
                    .run_if(resource_exists::<DragBinding>),
            );
    }
}

/// Tuning knobs for the drag feel.
#[derive(Resource, Debug, Clone)]
pub struct DragConfig {
    /// Scale applied to the element while it is lifted.
    pub lift_scale: f32,
    /// Z the lifted element is raised to so it renders above everything.
    pub drag_layer_z: f32,
    /// World units scrolled per auto-scroll tick.
    pub scroll_speed: f32,
    pub scroll_tick: Duration,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            lift_scale: 1.1,
            drag_layer_z: 50.0,
            scroll_speed: 8.0,
            scroll_tick: Duration::from_millis(16),
        }
    }
}

/// Present while a game accepts drags. Removing it (through [`cleanup_drag`])
/// detaches every drag system.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragBinding {
    pub mode: DragMode,
}

/// Vertical range the camera may auto-scroll within, in world units.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScrollBounds {
    pub min_y: f32,
    pub max_y: f32,
}

#[derive(Component, Debug, Clone)]
pub struct Draggable {
    /// Classification key compared against [`DropZone::key`].
    pub key: String,
    pub label: String,
}

#[derive(Component, Debug, Clone)]
pub struct DropZone {
    pub key: String,
}

/// Axis-aligned pick area centred on the entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitBox {
    pub size: Vec2,
}

impl HitBox {
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let half = self.size / 2.0;
        (point.x - center.x).abs() <= half.x && (point.y - center.y).abs() <= half.y
    }
}

/// The drop zone currently under the pointer. At most one entity has it.
#[derive(Component, Debug)]
pub struct Hovered;

/// Pieces (or their containers) that no longer accept presses.
#[derive(Component, Debug)]
pub struct Completed;

/// Marks the element being carried.
#[derive(Component, Debug)]
pub struct Dragging {
    resting_scale: Vec3,
    resting_z: f32,
}

#[derive(Component, Debug)]
pub struct Placeholder {
    pub origin: Entity,
}

/// A copy carried in clone mode. Drop handlers remove this marker from a
/// clone they keep; [`cleanup_drag`] despawns every clone still carrying it.
#[derive(Component, Debug)]
pub struct DragClone {
    pub origin: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct DropEvent {
    pub dragged: Entity,
    pub origin: Entity,
    pub target: Option<Entity>,
    pub placeholder: Option<Entity>,
    pub mode: DragMode,
    pub release: ReleaseToken,
}

#[derive(Resource, Debug, Default)]
pub struct DragPointer {
    sample: Option<PointerSample>,
    last: Option<PointerSample>,
    released: bool,
}

#[derive(Resource, Debug)]
pub struct AutoScroll {
    direction: ScrollDirection,
    tick: Timer,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            direction: ScrollDirection::None,
            tick: Timer::new(DragConfig::default().scroll_tick, TimerMode::Repeating),
        }
    }
}

impl AutoScroll {
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    fn set(&mut self, direction: ScrollDirection, period: Duration) {
        self.direction = direction;
        self.tick = Timer::new(period, TimerMode::Repeating);
    }

    fn stop(&mut self) {
        self.direction = ScrollDirection::None;
        self.tick.reset();
    }
}

/// Starts accepting drags in the given mode.
pub fn bind_drag(world: &mut World, mode: DragMode) {
    world.insert_resource(DragBinding { mode });
}

/// Forced teardown, used when a game is switched away or paused mid-drag.
///
/// Removes every drag clone, puts moved elements back on their placeholders,
/// strips every hover highlight, stops scrolling and unconditionally unlocks.
/// Leftovers of a drop whose event was never handled are swept as well.
pub fn cleanup_drag(world: &mut World) {
    world.remove_resource::<DragBinding>();
    world.resource_mut::<AutoScroll>().stop();
    *world.resource_mut::<DragPointer>() = DragPointer::default();

    if let Some(session) = world.resource_mut::<DragEngine>().cleanup() {
        debug!("Drag on {} interrupted by cleanup", session.origin);
    }

    despawn_all_in_world::<DragClone>(world);
    restore_placeholders(world);

    let hovered = world
        .query_filtered::<Entity, With<Hovered>>()
        .iter(world)
        .collect::<Vec<_>>();
    for entity in hovered {
        if let Ok(mut entity) = world.get_entity_mut(entity) {
            entity.remove::<Hovered>();
        }
    }
}

fn restore_placeholders(world: &mut World) {
    let placeholders = world
        .query::<(Entity, &Placeholder, &Transform)>()
        .iter(world)
        .map(|(entity, placeholder, resting)| (entity, placeholder.origin, *resting))
        .collect::<Vec<_>>();
    for (placeholder, origin, resting) in placeholders {
        if let Ok(mut origin) = world.get_entity_mut(origin) {
            origin.remove::<Dragging>();
            origin.insert(resting);
        }
        if let Ok(placeholder) = world.get_entity_mut(placeholder) {
            placeholder.despawn_recursive();
        }
    }
}

/// Topmost hit box containing `point`, ignoring `exclude`.
pub fn hit_test<'a>(
    point: Vec2,
    candidates: impl Iterator<Item = (Entity, &'a GlobalTransform, &'a HitBox)>,
    exclude: &[Entity],
) -> Option<Entity> {
    candidates
        .filter(|(entity, _, _)| !exclude.contains(entity))
        .filter(|(_, transform, hit_box)| hit_box.contains(transform.translation().truncate(), point))
        .max_by(|(_, a, _), (_, b, _)| a.translation().z.total_cmp(&b.translation().z))
        .map(|(entity, _, _)| entity)
}

/// Walks from `entity` up its parents to the first drop zone.
pub fn resolve_drop_zone(
    entity: Entity,
    zones: &Query<(), With<DropZone>>,
    parents: &Query<&Parent>,
) -> Option<Entity> {
    let mut current = entity;
    loop {
        if zones.contains(current) {
            return Some(current);
        }
        current = parents.get(current).ok()?.get();
    }
}

fn read_pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut pointer: ResMut<DragPointer>,
) {
    let sample = pointer_sample(&buttons, &touches, &windows, &camera);
    pointer.released = buttons.just_released(MouseButton::Left) || touches.any_just_released();
    pointer.sample = sample;
    if sample.is_some() {
        pointer.last = sample;
    }
}

fn start_drag(
    mut commands: Commands,
    pointer: Res<DragPointer>,
    binding: Res<DragBinding>,
    config: Res<DragConfig>,
    mut engine: ResMut<DragEngine>,
    draggables: Query<(
        Entity,
        &Draggable,
        &Transform,
        &GlobalTransform,
        &HitBox,
        Option<&Sprite>,
        Option<&Parent>,
    )>,
    completed: Query<(), With<Completed>>,
) {
    let Some(sample) = pointer.sample.filter(|s| s.phase == PointerPhase::Pressed) else {
        return;
    };

    let Some((origin, draggable, transform, global, hit_box, sprite, parent)) = draggables
        .iter()
        .filter(|(_, _, _, global, hit_box, _, _)| {
            hit_box.contains(global.translation().truncate(), sample.world)
        })
        .max_by(|a, b| a.3.translation().z.total_cmp(&b.3.translation().z))
    else {
        return;
    };

    let in_completed =
        completed.contains(origin) || parent.is_some_and(|parent| completed.contains(parent.get()));
    if let Err(rejected) = engine.check_press(in_completed) {
        debug!("Press on {origin} ignored: {rejected}");
        return;
    }

    let anchor = global.translation();
    let lifted = Transform::from_translation(anchor.truncate().extend(config.drag_layer_z))
        .with_scale(transform.scale * config.lift_scale);
    let dragging = Dragging {
        resting_scale: transform.scale,
        resting_z: anchor.z,
    };

    let (dragged, placeholder) = match binding.mode {
        DragMode::Move => {
            let placeholder = commands
                .spawn((
                    Sprite::from_color(PLACEHOLDER_COLOR, hit_box.size),
                    Transform::from_translation(anchor).with_scale(transform.scale),
                    Placeholder { origin },
                ))
                .id();
            if parent.is_some() {
                commands.entity(origin).remove_parent_in_place();
            }
            commands.entity(origin).insert((lifted, dragging));
            (origin, Some(placeholder))
        }
        DragMode::Clone => {
            let sprite = sprite
                .cloned()
                .unwrap_or_else(|| Sprite::from_color(Color::WHITE, hit_box.size));
            let clone = commands
                .spawn((
                    sprite,
                    lifted,
                    *hit_box,
                    draggable.clone(),
                    DragClone { origin },
                    dragging,
                ))
                .with_children(|clone| {
                    clone.spawn((
                        Text2d::new(draggable.label.clone()),
                        TextFont {
                            font_size: CLONE_LABEL_SIZE,
                            ..default()
                        },
                        TextColor(Color::BLACK),
                        Transform::from_xyz(0.0, 0.0, 0.1),
                    ));
                })
                .id();
            (clone, None)
        }
    };

    let start = DragStart {
        origin,
        dragged,
        placeholder,
        mode: binding.mode,
        pointer: sample.world,
        anchor: anchor.truncate(),
    };
    if let Err(rejected) = engine.begin(start) {
        warn!("Drag on {origin} could not begin: {rejected}");
        return;
    }
    debug!("Drag started on {origin} ({:?})", binding.mode);
}

fn follow_pointer(
    mut commands: Commands,
    pointer: Res<DragPointer>,
    config: Res<DragConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut engine: ResMut<DragEngine>,
    mut auto_scroll: ResMut<AutoScroll>,
    mut dragged: Query<&mut Transform, With<Dragging>>,
    hit_boxes: Query<(Entity, &GlobalTransform, &HitBox)>,
    zones: Query<(), With<DropZone>>,
    parents: Query<&Parent>,
) {
    let Some(sample) = pointer.sample.filter(|s| s.phase == PointerPhase::Held) else {
        return;
    };
    let Some(session) = engine.session().copied() else {
        return;
    };

    let hit = hit_test(sample.world, hit_boxes.iter(), &[session.dragged])
        .and_then(|entity| resolve_drop_zone(entity, &zones, &parents));
    let viewport_height = windows.get_single().map_or(0.0, Window::height);

    let Some(update) = engine.motion(sample.world, hit, sample.screen.y, viewport_height) else {
        return;
    };

    if let Ok(mut transform) = dragged.get_mut(session.dragged) {
        transform.translation = update.position.extend(config.drag_layer_z);
    }

    apply_hover(&mut commands, update.hover);

    if update.scroll_changed {
        auto_scroll.set(update.scroll, config.scroll_tick);
    }
}

fn apply_hover(commands: &mut Commands, hover: HoverChange) {
    if let Some(cleared) = hover.cleared {
        if let Some(mut entity) = commands.get_entity(cleared) {
            entity.remove::<Hovered>();
        }
    }
    if let Some(highlighted) = hover.highlighted {
        if let Some(mut entity) = commands.get_entity(highlighted) {
            entity.insert(Hovered);
        }
    }
}

fn end_drag(
    mut commands: Commands,
    pointer: Res<DragPointer>,
    mut engine: ResMut<DragEngine>,
    mut auto_scroll: ResMut<AutoScroll>,
    mut dragged: Query<(&mut Transform, &Dragging)>,
    hit_boxes: Query<(Entity, &GlobalTransform, &HitBox)>,
    zones: Query<(), With<DropZone>>,
    parents: Query<&Parent>,
    mut drops: EventWriter<DropEvent>,
) {
    if !pointer.released {
        return;
    }
    let Some(session) = engine.session().copied() else {
        return;
    };

    auto_scroll.stop();

    // The carried element is left out of the hit test so the zone beneath it wins.
    let target = pointer
        .sample
        .filter(|s| s.phase == PointerPhase::Released)
        .or(pointer.last)
        .and_then(|sample| hit_test(sample.world, hit_boxes.iter(), &[session.dragged]))
        .and_then(|entity| resolve_drop_zone(entity, &zones, &parents));

    let Some(outcome) = engine.finish(target) else {
        return;
    };

    if let Some(cleared) = outcome.cleared_hover {
        if let Some(mut entity) = commands.get_entity(cleared) {
            entity.remove::<Hovered>();
        }
    }

    if let Ok((mut transform, lifted)) = dragged.get_mut(outcome.dragged) {
        transform.scale = lifted.resting_scale;
        transform.translation.z = lifted.resting_z;
    }
    commands.entity(outcome.dragged).remove::<Dragging>();

    debug!(
        "Drop of {} on {:?} ({:?})",
        outcome.origin, outcome.target, outcome.mode
    );
    drops.send(DropEvent {
        dragged: outcome.dragged,
        origin: outcome.origin,
        target: outcome.target,
        placeholder: outcome.placeholder,
        mode: outcome.mode,
        release: outcome.release,
    });
}

fn auto_scroll(
    time: Res<Time<Real>>,
    config: Res<DragConfig>,
    bounds: Option<Res<ScrollBounds>>,
    mut auto_scroll: ResMut<AutoScroll>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let step = match auto_scroll.direction {
        ScrollDirection::None => return,
        ScrollDirection::Up => config.scroll_speed,
        ScrollDirection::Down => -config.scroll_speed,
    };
    let Some(bounds) = bounds else {
        return;
    };

    auto_scroll.tick.tick(time.delta());
    let ticks = auto_scroll.tick.times_finished_this_tick();
    if ticks == 0 {
        return;
    }

    for mut camera in &mut cameras {
        let target = (step * ticks as f32) + camera.translation.y;
        camera.translation.y = target.clamp(bounds.min_y, bounds.max_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_prefers_topmost_and_skips_excluded() {
        let low = Entity::from_raw(1);
        let high = Entity::from_raw(2);
        let low_transform = GlobalTransform::from_xyz(0.0, 0.0, 1.0);
        let high_transform = GlobalTransform::from_xyz(5.0, 0.0, 3.0);
        let hit_box = HitBox {
            size: Vec2::splat(40.0),
        };
        let candidates = [(low, &low_transform, &hit_box), (high, &high_transform, &hit_box)];

        assert_eq!(hit_test(Vec2::new(2.0, 0.0), candidates.into_iter(), &[]), Some(high));
        assert_eq!(
            hit_test(Vec2::new(2.0, 0.0), candidates.into_iter(), &[high]),
            Some(low)
        );
        assert_eq!(hit_test(Vec2::new(200.0, 0.0), candidates.into_iter(), &[]), None);
    }

    #[test]
    fn cleanup_strips_highlights_and_unlocks() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(DragPlugin);
        bind_drag(app.world_mut(), DragMode::Clone);

        let zone = app
            .world_mut()
            .spawn((DropZone { key: "verbo".into() }, Hovered))
            .id();
        let origin = app.world_mut().spawn_empty().id();
        let clone = app.world_mut().spawn(DragClone { origin }).id();

        let mut engine = app.world_mut().resource_mut::<DragEngine>();
        engine
            .begin(DragStart {
                origin,
                dragged: clone,
                placeholder: None,
                mode: DragMode::Clone,
                pointer: Vec2::ZERO,
                anchor: Vec2::ZERO,
            })
            .unwrap();

        cleanup_drag(app.world_mut());

        let world = app.world();
        assert!(!world.resource::<DragEngine>().is_locked());
        assert!(world.get::<Hovered>(zone).is_none());
        assert!(!world.entities().contains(clone));
        assert!(!world.contains_resource::<DragBinding>());
    }

    #[test]
    fn cleanup_returns_moved_element_to_placeholder() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(DragPlugin);
        bind_drag(app.world_mut(), DragMode::Move);

        let origin = app
            .world_mut()
            .spawn(Transform::from_xyz(300.0, 300.0, 50.0))
            .id();
        let placeholder = app
            .world_mut()
            .spawn((Transform::from_xyz(-20.0, 40.0, 1.0), Placeholder { origin }))
            .id();

        app.world_mut()
            .resource_mut::<DragEngine>()
            .begin(DragStart {
                origin,
                dragged: origin,
                placeholder: Some(placeholder),
                mode: DragMode::Move,
                pointer: Vec2::ZERO,
                anchor: Vec2::ZERO,
            })
            .unwrap();

        cleanup_drag(app.world_mut());

        let world = app.world();
        assert_eq!(
            world.get::<Transform>(origin).unwrap().translation,
            Vec3::new(-20.0, 40.0, 1.0)
        );
        assert!(!world.entities().contains(placeholder));
        assert!(!world.resource::<DragEngine>().is_locked());
    }

    mod gestures {
        use bevy::ecs::system::RunSystemOnce;

        use super::super::*;

        fn app(mode: DragMode) -> App {
            let mut app = App::new();
            app.add_plugins(MinimalPlugins).add_plugins(DragPlugin);
            bind_drag(app.world_mut(), mode);
            app
        }

        fn point_at(app: &mut App, phase: PointerPhase, world: Vec2) {
            let sample = PointerSample {
                phase,
                screen: Vec2::new(240.0, 400.0),
                world,
            };
            *app.world_mut().resource_mut::<DragPointer>() = DragPointer {
                sample: Some(sample),
                last: Some(sample),
                released: phase == PointerPhase::Released,
            };
        }

        fn spawn_word(app: &mut App, at: Vec3) -> Entity {
            app.world_mut()
                .spawn((
                    Draggable {
                        key: "verbo".into(),
                        label: "correu".into(),
                    },
                    Sprite::from_color(Color::WHITE, Vec2::new(120.0, 40.0)),
                    HitBox {
                        size: Vec2::new(120.0, 40.0),
                    },
                    Transform::from_translation(at),
                    GlobalTransform::from_translation(at),
                ))
                .id()
        }

        /// A zone whose hit box is covered by an already placed word.
        fn spawn_zone(app: &mut App, at: Vec3) -> Entity {
            let zone = app
                .world_mut()
                .spawn((
                    DropZone { key: "verbo".into() },
                    HitBox {
                        size: Vec2::splat(160.0),
                    },
                    Transform::from_translation(at),
                    GlobalTransform::from_translation(at),
                ))
                .id();
            let placed = at + Vec3::new(0.0, 0.0, 5.0);
            app.world_mut()
                .spawn((
                    HitBox {
                        size: Vec2::new(120.0, 40.0),
                    },
                    Transform::from_xyz(0.0, 0.0, 5.0),
                    GlobalTransform::from_translation(placed),
                ))
                .set_parent(zone);
            zone
        }

        fn run<M>(app: &mut App, system: impl IntoSystem<(), (), M>) {
            app.world_mut().run_system_once(system).unwrap();
        }

        fn sent_drops(app: &App) -> Vec<DropEvent> {
            let events = app.world().resource::<Events<DropEvent>>();
            events.get_cursor().read(events).copied().collect()
        }

        #[test]
        fn press_in_move_mode_lifts_the_word_over_a_placeholder() {
            let mut app = app(DragMode::Move);
            let word = spawn_word(&mut app, Vec3::new(10.0, 20.0, 2.0));

            point_at(&mut app, PointerPhase::Pressed, Vec2::new(15.0, 25.0));
            run(&mut app, start_drag);

            let world = app.world();
            let session = *world.resource::<DragEngine>().session().unwrap();
            assert_eq!(session.dragged, word);
            assert_eq!(session.pointer_offset, Vec2::new(5.0, 5.0));

            let placeholder = session.placeholder.unwrap();
            assert_eq!(world.get::<Placeholder>(placeholder).unwrap().origin, word);
            assert_eq!(
                world.get::<Transform>(placeholder).unwrap().translation,
                Vec3::new(10.0, 20.0, 2.0)
            );

            let lifted = world.get::<Transform>(word).unwrap();
            assert_eq!(lifted.translation.z, DragConfig::default().drag_layer_z);
            assert!(world.get::<Dragging>(word).is_some());
        }

        #[test]
        fn press_in_clone_mode_leaves_the_source_alone() {
            let mut app = app(DragMode::Clone);
            let word = spawn_word(&mut app, Vec3::new(10.0, 20.0, 2.0));

            point_at(&mut app, PointerPhase::Pressed, Vec2::new(10.0, 20.0));
            run(&mut app, start_drag);

            let world = app.world();
            let session = *world.resource::<DragEngine>().session().unwrap();
            assert_eq!(session.origin, word);
            assert_ne!(session.dragged, word);
            assert_eq!(session.placeholder, None);
            assert_eq!(world.get::<DragClone>(session.dragged).unwrap().origin, word);
            assert_eq!(world.get::<Draggable>(session.dragged).unwrap().key, "verbo");
            assert!(world.get::<Dragging>(word).is_none());
            assert_eq!(
                world.get::<Transform>(word).unwrap().translation,
                Vec3::new(10.0, 20.0, 2.0)
            );
        }

        #[test]
        fn press_on_a_completed_word_is_ignored() {
            let mut app = app(DragMode::Move);
            let word = spawn_word(&mut app, Vec3::ZERO);
            app.world_mut().entity_mut(word).insert(Completed);

            point_at(&mut app, PointerPhase::Pressed, Vec2::ZERO);
            run(&mut app, start_drag);

            assert!(!app.world().resource::<DragEngine>().is_locked());
        }

        #[test]
        fn motion_highlights_the_zone_and_release_targets_it() {
            let mut app = app(DragMode::Move);
            let word = spawn_word(&mut app, Vec3::new(0.0, -200.0, 2.0));
            let zone = spawn_zone(&mut app, Vec3::new(0.0, 150.0, 1.0));

            point_at(&mut app, PointerPhase::Pressed, Vec2::new(0.0, -200.0));
            run(&mut app, start_drag);

            // The dragged word's stale global transform sits right under the
            // pointer; it must not shadow the zone.
            app.world_mut()
                .entity_mut(word)
                .insert(GlobalTransform::from_xyz(0.0, 150.0, 50.0));

            point_at(&mut app, PointerPhase::Held, Vec2::new(0.0, 150.0));
            run(&mut app, follow_pointer);
            assert!(app.world().get::<Hovered>(zone).is_some());
            assert_eq!(
                app.world().get::<Transform>(word).unwrap().translation.truncate(),
                Vec2::new(0.0, 150.0)
            );

            point_at(&mut app, PointerPhase::Released, Vec2::new(0.0, 150.0));
            run(&mut app, end_drag);

            let drops = sent_drops(&app);
            assert_eq!(drops.len(), 1);
            let drop = drops[0];
            assert_eq!(drop.dragged, word);
            assert_eq!(drop.target, Some(zone));
            assert!(drop.placeholder.is_some());

            let world = app.world();
            assert!(world.get::<Hovered>(zone).is_none());
            assert!(world.get::<Dragging>(word).is_none());
            assert_eq!(world.get::<Transform>(word).unwrap().translation.z, 2.0);
            assert!(world.resource::<DragEngine>().is_locked());
        }

        #[test]
        fn release_outside_every_zone_reports_no_target() {
            let mut app = app(DragMode::Clone);
            spawn_word(&mut app, Vec3::ZERO);
            spawn_zone(&mut app, Vec3::new(0.0, 300.0, 1.0));

            point_at(&mut app, PointerPhase::Pressed, Vec2::ZERO);
            run(&mut app, start_drag);
            point_at(&mut app, PointerPhase::Released, Vec2::new(200.0, -300.0));
            run(&mut app, end_drag);

            let drops = sent_drops(&app);
            assert_eq!(drops.len(), 1);
            assert_eq!(drops[0].target, None);
            assert_eq!(drops[0].mode, DragMode::Clone);
        }

        #[test]
        fn auto_scroll_stays_inside_the_bounds() {
            let mut app = app(DragMode::Move);
            app.insert_resource(ScrollBounds {
                min_y: -100.0,
                max_y: 0.0,
            });
            let camera = app.world_mut().spawn((Camera2d, Transform::default())).id();
            let period = DragConfig::default().scroll_tick;

            app.world_mut()
                .resource_mut::<AutoScroll>()
                .set(ScrollDirection::Down, period);
            for _ in 0..10 {
                app.world_mut()
                    .resource_mut::<Time<Real>>()
                    .update_with_duration(Duration::from_millis(50));
                run(&mut app, auto_scroll);
                let y = app.world().get::<Transform>(camera).unwrap().translation.y;
                assert!((-100.0..=0.0).contains(&y));
            }
            assert_eq!(
                app.world().get::<Transform>(camera).unwrap().translation.y,
                -100.0
            );

            app.world_mut()
                .resource_mut::<AutoScroll>()
                .set(ScrollDirection::Up, period);
            for _ in 0..10 {
                app.world_mut()
                    .resource_mut::<Time<Real>>()
                    .update_with_duration(Duration::from_millis(50));
                run(&mut app, auto_scroll);
            }
            assert_eq!(app.world().get::<Transform>(camera).unwrap().translation.y, 0.0);
        }

        #[test]
        fn cleanup_sweeps_leftovers_of_an_unhandled_drop() {
            let mut app = app(DragMode::Clone);
            spawn_word(&mut app, Vec3::ZERO);
            point_at(&mut app, PointerPhase::Pressed, Vec2::ZERO);
            run(&mut app, start_drag);
            point_at(&mut app, PointerPhase::Released, Vec2::ZERO);
            run(&mut app, end_drag);
            let clone = sent_drops(&app)[0].dragged;

            cleanup_drag(app.world_mut());

            assert!(!app.world().entities().contains(clone));
            assert!(!app.world().resource::<DragEngine>().is_locked());
        }
    }
}
