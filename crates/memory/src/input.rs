use core::time::Duration;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use morfo_core::audio::SoundCue;
use morfo_core::drag::{HitBox, hit_test};
use morfo_core::input::just_pressed_world_position;
use morfo_core::round::{GameRoundState, LossReason, RoundFinished, RoundOutcome, RoundPaused};
use morfo_core::timers::Countdowns;

use crate::MATCH_SCORE;
use crate::board::FlipResult;
use crate::cards::MemoryCard;
use crate::game::{MISMATCH_DELAY, MemoryPhase, MemoryTable, finish_round};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            handle_card_clicks
                .run_if(in_state(MemoryPhase::Playing))
                .run_if(not(resource_exists::<RoundPaused>)),
        );
    }
}

/// What a flip did to the round, once the score and stars are updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEffect {
    Nothing,
    Correct,
    /// Cards stay visible for the delay, then turn back.
    Wrong { flip_back_after: Duration },
    Over(RoundOutcome),
}

/// Applies a flip result to the round bookkeeping.
pub fn score_flip(round: &mut GameRoundState, result: FlipResult) -> TurnEffect {
    match result {
        FlipResult::Ignored | FlipResult::First => TurnEffect::Nothing,
        FlipResult::Matched { completed } => {
            round.add_score(MATCH_SCORE);
            if completed {
                TurnEffect::Over(RoundOutcome::Won)
            } else {
                TurnEffect::Correct
            }
        }
        FlipResult::Mismatched => {
            if round.record_error() {
                TurnEffect::Over(RoundOutcome::Lost(LossReason::OutOfLives))
            } else {
                TurnEffect::Wrong {
                    flip_back_after: MISMATCH_DELAY,
                }
            }
        }
    }
}

fn handle_card_clicks(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform)>,
    cards: Query<(Entity, &GlobalTransform, &HitBox, &MemoryCard)>,
    mut table: ResMut<MemoryTable>,
    mut round: ResMut<GameRoundState>,
    mut countdowns: ResMut<Countdowns>,
    mut next_phase: ResMut<NextState<MemoryPhase>>,
    mut finished: EventWriter<RoundFinished>,
    mut cues: EventWriter<SoundCue>,
) {
    if table.flip_back.is_some() {
        return;
    }
    let Some(position) = just_pressed_world_position(&buttons, &touches, &windows, &camera)
    else {
        return;
    };
    let Some(clicked) = hit_test(
        position,
        cards
            .iter()
            .map(|(entity, transform, hit_box, _)| (entity, transform, hit_box)),
        &[],
    ) else {
        return;
    };
    let Ok((_, _, _, card)) = cards.get(clicked) else {
        return;
    };

    round.record_click();
    let result = table.board.flip(card.index);
    match score_flip(&mut round, result) {
        TurnEffect::Nothing => {}
        TurnEffect::Correct => {
            cues.send(SoundCue::Correct);
        }
        TurnEffect::Wrong { flip_back_after } => {
            cues.send(SoundCue::Wrong);
            table.flip_back = Some(Timer::new(flip_back_after, TimerMode::Once));
        }
        TurnEffect::Over(outcome) => finish_round(
            &round,
            outcome,
            &mut countdowns,
            &mut next_phase,
            &mut finished,
            &mut cues,
        ),
    }
}
