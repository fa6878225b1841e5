use bevy::prelude::*;
use morfo_core::audio::MusicCommand;
use morfo_core::cleanup::despawn_all;
use morfo_core::input::any_just_pressed;
use morfo_core::module::cleanup_active_game;
use morfo_core::round::GameRoundState;
use morfo_core::session::{SessionClock, SessionConfig, SessionVerdict};
use morfo_core::timers::{CountdownExpired, Countdowns, TimerSlot};

use crate::results::LastResult;
use crate::screens::{screen_root, text};
use crate::{Player, ShellState};

#[derive(Component)]
struct SessionOverScreen;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            watch_session
                .run_if(in_state(ShellState::Menu).or(in_state(ShellState::Playing))),
        )
        .add_systems(OnEnter(ShellState::SessionOver), spawn_session_over)
        .add_systems(
            Update,
            back_to_login.run_if(in_state(ShellState::SessionOver)),
        )
        .add_systems(
            OnExit(ShellState::SessionOver),
            despawn_all::<SessionOverScreen>,
        );
    }
}

fn watch_session(
    mut commands: Commands,
    mut expired: EventReader<CountdownExpired>,
    time: Res<Time<Real>>,
    config: Res<SessionConfig>,
    mut clock: ResMut<SessionClock>,
    mut countdowns: ResMut<Countdowns>,
    round: Option<Res<GameRoundState>>,
    mut music: EventWriter<MusicCommand>,
    mut next_state: ResMut<NextState<ShellState>>,
) {
    for event in expired.read() {
        if event.slot != TimerSlot::Session {
            continue;
        }
        match clock.on_expired(&mut countdowns, &config, round.is_some(), time.elapsed()) {
            SessionVerdict::Extended { by } => {
                info!(
                    "Session ran out mid-round, extended by {}s (extension {})",
                    by.as_secs(),
                    clock.extensions_granted()
                );
            }
            SessionVerdict::Expired => {
                info!("Session expired");
                commands.queue(cleanup_active_game);
                music.send(MusicCommand::Stop);
                next_state.set(ShellState::SessionOver);
                return;
            }
        }
    }
}

fn spawn_session_over(mut commands: Commands, player: Option<Res<Player>>) {
    commands
        .spawn((SessionOverScreen, screen_root()))
        .with_children(|screen| {
            screen.spawn(text("Tempo esgotado!", 44.0));
            if let Some(player) = player {
                screen.spawn(text(
                    format!(
                        "{}, sua pontuação geral é {}",
                        player.name, player.record.general_score
                    ),
                    24.0,
                ));
            }
            screen.spawn(text("Clique para voltar", 20.0));
        });
}

fn back_to_login(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut next_state: ResMut<NextState<ShellState>>,
) {
    if !any_just_pressed(&mouse, &touches) {
        return;
    }
    commands.remove_resource::<Player>();
    commands.remove_resource::<LastResult>();
    next_state.set(ShellState::Login);
}

#[cfg(test)]
mod tests {
    use bevy::input::ButtonState;
    use bevy::input::InputPlugin;
    use bevy::input::mouse::MouseButtonInput;
    use bevy::state::app::StatesPlugin;
    use morfo_core::module::GameModules;
    use morfo_core::persistence::PlayerRecord;
    use morfo_core::round::{GameKind, LifeRule};
    use morfo_core::timers::CountdownPlugin;

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin, CountdownPlugin))
            .add_event::<MusicCommand>()
            .init_state::<ShellState>()
            .init_resource::<GameModules>()
            .init_resource::<SessionConfig>()
            .init_resource::<SessionClock>()
            .add_plugins(SessionPlugin)
            .insert_resource(Player {
                name: "Caio".into(),
                record: PlayerRecord::default(),
            });
        app.world_mut()
            .resource_mut::<NextState<ShellState>>()
            .set(ShellState::Playing);
        app.update();
        app
    }

    fn expire_session(app: &mut App) {
        app.world_mut().send_event(CountdownExpired {
            slot: TimerSlot::Session,
        });
        app.update();
        app.update();
    }

    fn state(app: &App) -> ShellState {
        *app.world().resource::<State<ShellState>>().get()
    }

    #[test]
    fn expiry_mid_round_extends_the_session() {
        let mut app = app();
        app.insert_resource(GameRoundState::new(
            GameKind::Memory,
            1,
            LifeRule::EveryNErrors(10),
            Default::default(),
        ));

        expire_session(&mut app);

        assert_eq!(state(&app), ShellState::Playing);
        assert_eq!(app.world().resource::<SessionClock>().extensions_granted(), 1);
        assert!(
            app.world()
                .resource::<Countdowns>()
                .countdown(TimerSlot::Session)
                .is_running()
        );
    }

    #[test]
    fn expiry_without_a_round_ends_the_session_and_a_click_logs_out() {
        let mut app = app();

        expire_session(&mut app);
        assert_eq!(state(&app), ShellState::SessionOver);
        assert!(app.world().contains_resource::<Player>());

        app.world_mut().send_event(MouseButtonInput {
            button: MouseButton::Left,
            state: ButtonState::Pressed,
            window: Entity::PLACEHOLDER,
        });
        app.update();
        app.update();

        assert_eq!(state(&app), ShellState::Login);
        assert!(!app.world().contains_resource::<Player>());
    }

    #[test]
    fn round_expiry_leaves_the_session_alone() {
        let mut app = app();
        app.world_mut().send_event(CountdownExpired {
            slot: TimerSlot::Round,
        });
        app.update();
        app.update();
        assert_eq!(state(&app), ShellState::Playing);
    }
}
