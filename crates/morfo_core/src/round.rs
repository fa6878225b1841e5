use core::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Stars a player starts every round with.
pub const DEFAULT_LIVES: u32 = 3;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum GameKind {
    #[strum(to_string = "Memória")]
    Memory,
    #[strum(to_string = "Genius")]
    Genius,
    #[strum(to_string = "Ligar")]
    Ligar,
}

/// How errors turn into lost stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeRule {
    /// Every error costs a star.
    PerError,
    /// A star is lost each time the error count crosses a multiple of the
    /// threshold.
    EveryNErrors(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossReason {
    OutOfLives,
    OutOfTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost(LossReason),
}

/// Sent by a game when its round ends, whatever the result.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundFinished {
    pub game: GameKind,
    pub phase: u32,
    pub outcome: RoundOutcome,
    pub score: u32,
}

/// Present while the active round is paused. Round systems stand still
/// while it exists.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct RoundPaused;

/// Bookkeeping for the round in progress. Exists only while a round does.
#[derive(Resource, Debug, Clone)]
pub struct GameRoundState {
    pub game: GameKind,
    pub phase: u32,
    pub score: u32,
    pub error_count: u32,
    pub remaining_lives: u32,
    pub max_lives: u32,
    pub click_count: u32,
    pub started_at: Duration,
    life_rule: LifeRule,
}

impl GameRoundState {
    pub fn new(game: GameKind, phase: u32, life_rule: LifeRule, started_at: Duration) -> Self {
        Self {
            game,
            phase,
            score: 0,
            error_count: 0,
            remaining_lives: DEFAULT_LIVES,
            max_lives: DEFAULT_LIVES,
            click_count: 0,
            started_at,
            life_rule,
        }
    }

    pub fn record_click(&mut self) {
        self.click_count += 1;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Counts an error and returns whether the player is out of stars.
    pub fn record_error(&mut self) -> bool {
        self.error_count += 1;
        let lost = match self.life_rule {
            LifeRule::PerError => self.error_count,
            LifeRule::EveryNErrors(threshold) => self.error_count / threshold.max(1),
        };
        self.remaining_lives = self.max_lives.saturating_sub(lost);
        self.is_out_of_lives()
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.remaining_lives == 0
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    pub fn finish(&self, outcome: RoundOutcome) -> RoundFinished {
        RoundFinished {
            game: self.game,
            phase: self.phase,
            outcome,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_errors_cost_exactly_one_star() {
        let mut round = GameRoundState::new(
            GameKind::Memory,
            1,
            LifeRule::EveryNErrors(10),
            Duration::ZERO,
        );

        for _ in 0..9 {
            round.record_error();
        }
        assert_eq!(round.remaining_lives, 3);

        round.record_error();
        assert_eq!(round.remaining_lives, 2);

        for _ in 0..9 {
            round.record_error();
        }
        assert_eq!(round.remaining_lives, 2);

        assert!(!round.record_error());
        assert_eq!(round.remaining_lives, 1);
        assert_eq!(round.error_count, 20);
    }

    #[test]
    fn lives_never_drop_below_zero() {
        let mut round =
            GameRoundState::new(GameKind::Ligar, 2, LifeRule::PerError, Duration::ZERO);

        assert!(!round.record_error());
        assert!(!round.record_error());
        assert!(round.record_error());
        assert!(round.record_error());
        assert_eq!(round.remaining_lives, 0);
    }

    #[test]
    fn finish_carries_round_identity() {
        let mut round =
            GameRoundState::new(GameKind::Genius, 4, LifeRule::PerError, Duration::ZERO);
        round.add_score(30);

        let finished = round.finish(RoundOutcome::Lost(LossReason::OutOfTime));
        assert_eq!(finished.game, GameKind::Genius);
        assert_eq!(finished.phase, 4);
        assert_eq!(finished.score, 30);
    }
}
