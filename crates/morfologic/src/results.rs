use bevy::prelude::*;
use morfo_core::module::cleanup_active_game;
use morfo_core::persistence::{PlayerRecord, ProgressBook};
use morfo_core::round::{RoundFinished, RoundOutcome};

use crate::{Player, ShellState};

/// The most recent round result, shown on the menu.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LastResult(pub RoundFinished);

pub struct ResultsPlugin;

impl Plugin for ResultsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, record_round.run_if(in_state(ShellState::Playing)));
    }
}

/// Folds a finished round into the player's record: the score always
/// counts, the phase only when the round was won.
pub fn apply_result(record: &mut PlayerRecord, result: &RoundFinished) {
    record.general_score += result.score;
    if result.outcome == RoundOutcome::Won {
        record.progress.record_phase(result.game, result.phase);
    }
}

fn record_round(
    mut commands: Commands,
    mut results: EventReader<RoundFinished>,
    player: Option<ResMut<Player>>,
    mut book: ResMut<ProgressBook>,
    mut next_state: ResMut<NextState<ShellState>>,
) {
    let Some(result) = results.read().next().copied() else {
        return;
    };
    results.clear();

    if let Some(mut player) = player {
        apply_result(&mut player.record, &result);
        let Player { name, record } = &*player;
        book.save(name, record);
        info!(
            "{name}: {} phase {} gave {} points, {} in total",
            result.game, result.phase, result.score, record.general_score
        );
    } else {
        warn!("Round finished without a logged-in player, result not saved");
    }

    commands.insert_resource(LastResult(result));
    commands.queue(cleanup_active_game);
    next_state.set(ShellState::Menu);
}

#[cfg(test)]
mod tests {
    use morfo_core::persistence::MemoryStore;
    use morfo_core::round::{GameKind, LossReason};

    use super::*;

    fn finished(game: GameKind, phase: u32, outcome: RoundOutcome, score: u32) -> RoundFinished {
        RoundFinished {
            game,
            phase,
            outcome,
            score,
        }
    }

    #[test]
    fn wins_advance_progress_and_losses_only_score() {
        let mut record = PlayerRecord::default();
        apply_result(
            &mut record,
            &finished(GameKind::Ligar, 1, RoundOutcome::Won, 60),
        );
        apply_result(
            &mut record,
            &finished(
                GameKind::Ligar,
                2,
                RoundOutcome::Lost(LossReason::OutOfLives),
                20,
            ),
        );

        assert_eq!(record.general_score, 80);
        assert_eq!(record.progress.phase_reached(GameKind::Ligar), 1);
        assert_eq!(record.progress.phase_reached(GameKind::Memory), 0);
    }

    #[test]
    fn replaying_an_old_phase_never_lowers_progress() {
        let mut record = PlayerRecord::default();
        record.progress.record_phase(GameKind::Genius, 3);
        apply_result(
            &mut record,
            &finished(GameKind::Genius, 1, RoundOutcome::Won, 10),
        );
        assert_eq!(record.progress.phase_reached(GameKind::Genius), 3);
    }

    #[test]
    fn saved_record_survives_the_next_login() {
        let mut book = ProgressBook::new(MemoryStore::default());
        let mut record = book.load("Bia");
        apply_result(
            &mut record,
            &finished(GameKind::Memory, 1, RoundOutcome::Won, 30),
        );
        book.save("Bia", &record);

        assert_eq!(book.load("  bia "), record);
    }
}
