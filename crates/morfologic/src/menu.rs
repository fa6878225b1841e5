use bevy::prelude::*;
use morfo_core::audio::MusicCommand;
use morfo_core::cleanup::despawn_all;
use morfo_core::module::{GameModules, switch_game};
use morfo_core::round::{GameKind, RoundOutcome};
use morfo_core::session::SessionClock;
use morfo_core::timers::Countdowns;
use strum::IntoEnumIterator;

use crate::results::LastResult;
use crate::screens::{highlight_buttons, screen_root, spawn_button, text};
use crate::{Player, ShellState};

#[derive(Component)]
struct MenuScreen;

#[derive(Component, Debug, Clone, Copy)]
struct GameButton {
    game: GameKind,
    phase: u32,
}

#[derive(Component)]
struct LogoutButton;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(ShellState::Menu), spawn_menu)
            .add_systems(
                Update,
                (start_game, log_out).run_if(in_state(ShellState::Menu)),
            )
            .add_systems(Update, highlight_buttons)
            .add_systems(OnExit(ShellState::Menu), despawn_all::<MenuScreen>);
    }
}

/// The phase a player plays next: one past the best reached, capped at the
/// last phase.
pub fn next_phase(reached: u32, phase_count: u32) -> u32 {
    (reached + 1).min(phase_count.max(1))
}

fn describe(result: &LastResult) -> String {
    let verdict = match result.0.outcome {
        RoundOutcome::Won => "vitória",
        RoundOutcome::Lost(_) => "derrota",
    };
    format!(
        "Última rodada: {} fase {}, {verdict}, {} pontos",
        result.0.game, result.0.phase, result.0.score
    )
}

fn spawn_menu(
    mut commands: Commands,
    player: Option<Res<Player>>,
    modules: Res<GameModules>,
    last: Option<Res<LastResult>>,
) {
    let Some(player) = player else {
        warn!("Menu opened without a logged-in player");
        return;
    };

    commands
        .spawn((MenuScreen, screen_root()))
        .with_children(|screen| {
            screen.spawn(text(format!("Olá, {}!", player.name), 36.0));
            screen.spawn(text(
                format!("Pontuação geral: {}", player.record.general_score),
                24.0,
            ));
            if let Some(last) = last {
                screen.spawn(text(describe(&last), 18.0));
            }

            for game in GameKind::iter() {
                let Some(module) = modules.get(game) else {
                    continue;
                };
                let count = module.phase_count();
                let phase = next_phase(player.record.progress.phase_reached(game), count);
                spawn_button(
                    screen,
                    format!("{game} · fase {phase}/{count}"),
                    GameButton { game, phase },
                );
            }

            spawn_button(screen, "Sair", LogoutButton);
        });
}

fn start_game(
    mut commands: Commands,
    buttons: Query<(&Interaction, &GameButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<ShellState>>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let GameButton { game, phase } = *button;
        commands.queue(move |world: &mut World| switch_game(world, game, phase));
        next_state.set(ShellState::Playing);
        return;
    }
}

fn log_out(
    mut commands: Commands,
    buttons: Query<&Interaction, (Changed<Interaction>, With<LogoutButton>)>,
    mut session: ResMut<SessionClock>,
    mut countdowns: ResMut<Countdowns>,
    mut music: EventWriter<MusicCommand>,
    mut next_state: ResMut<NextState<ShellState>>,
) {
    if !buttons.iter().any(|interaction| *interaction == Interaction::Pressed) {
        return;
    }
    session.end(&mut countdowns);
    commands.remove_resource::<Player>();
    commands.remove_resource::<LastResult>();
    music.send(MusicCommand::Stop);
    next_state.set(ShellState::Login);
}

#[cfg(test)]
mod tests {
    use morfo_core::round::{LossReason, RoundFinished};

    use super::*;

    #[test]
    fn next_phase_follows_progress_and_caps() {
        assert_eq!(next_phase(0, 4), 1);
        assert_eq!(next_phase(2, 4), 3);
        assert_eq!(next_phase(4, 4), 4);
        assert_eq!(next_phase(0, 0), 1);
    }

    #[test]
    fn last_result_reads_in_portuguese() {
        let result = LastResult(RoundFinished {
            game: GameKind::Memory,
            phase: 2,
            outcome: RoundOutcome::Lost(LossReason::OutOfTime),
            score: 30,
        });
        assert_eq!(
            describe(&result),
            "Última rodada: Memória fase 2, derrota, 30 pontos"
        );
    }
}
