use bevy::input::common_conditions::input_just_pressed;
use bevy::prelude::*;
use morfo_core::audio::MusicCommand;
use morfo_core::cleanup::{despawn_all, despawn_all_in_world};
use morfo_core::module::{GameModules, pause_active_game, resume_active_game};
use morfo_core::timers::{Countdowns, TimerSlot, clock_now};

use crate::ShellState;
use crate::screens::text;

#[derive(Component)]
struct PauseOverlay;

pub struct PausePlugin;

impl Plugin for PausePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            request_toggle.run_if(
                in_state(ShellState::Playing).and(input_just_pressed(KeyCode::Escape)),
            ),
        )
        .add_systems(OnExit(ShellState::Playing), despawn_all::<PauseOverlay>);
    }
}

fn request_toggle(mut commands: Commands) {
    commands.queue(toggle_pause);
}

/// Pauses or resumes the running game together with the session clock
/// and the music. Does nothing when no game is active.
pub fn toggle_pause(world: &mut World) {
    let Some(modules) = world.get_resource::<GameModules>() else {
        return;
    };
    if modules.active().is_none() {
        return;
    }
    let paused = modules.is_paused();
    let now = clock_now(world);

    if paused {
        resume_active_game(world);
        world
            .resource_mut::<Countdowns>()
            .resume(TimerSlot::Session, now);
        world.send_event(MusicCommand::Resume);
        despawn_all_in_world::<PauseOverlay>(world);
        info!("Game resumed");
    } else {
        pause_active_game(world);
        world
            .resource_mut::<Countdowns>()
            .pause(TimerSlot::Session, now);
        world.send_event(MusicCommand::Pause);
        world
            .spawn((
                PauseOverlay,
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    row_gap: Val::Px(12.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                GlobalZIndex(10),
            ))
            .with_children(|overlay| {
                overlay.spawn(text("Pausado", 48.0));
                overlay.spawn(text("Esc para continuar", 22.0));
            });
        info!("Game paused");
    }
}
