use core::time::Duration;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use morfo_core::audio::SoundCue;
use morfo_core::drag::{HitBox, hit_test};
use morfo_core::input::just_pressed_world_position;
use morfo_core::round::{GameRoundState, LossReason, RoundFinished, RoundOutcome, RoundPaused};
use morfo_core::timers::Countdowns;

use crate::REPETITION_SCORE;
use crate::game::{GeniusBoard, GeniusPhase, finish_round};
use crate::pads::Pad;
use crate::sequence::PadPress;

const FLASH_TIME: Duration = Duration::from_millis(250);

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            handle_pad_presses
                .run_if(in_state(GeniusPhase::Listening))
                .run_if(not(resource_exists::<RoundPaused>)),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Continue,
    /// Repetition complete; the sequence gains a step and plays again.
    Grow,
    /// Wrong pad; the same sequence plays again.
    Replay,
    Over(RoundOutcome),
}

pub fn judge_press(round: &mut GameRoundState, press: PadPress, target_length: usize) -> Turn {
    match press {
        PadPress::Correct => Turn::Continue,
        PadPress::Repeated { length } => {
            round.add_score(REPETITION_SCORE);
            if length >= target_length {
                Turn::Over(RoundOutcome::Won)
            } else {
                Turn::Grow
            }
        }
        PadPress::Wrong => {
            if round.record_error() {
                Turn::Over(RoundOutcome::Lost(LossReason::OutOfLives))
            } else {
                Turn::Replay
            }
        }
    }
}

fn handle_pad_presses(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform)>,
    pads: Query<(Entity, &GlobalTransform, &HitBox, &Pad)>,
    mut board: ResMut<GeniusBoard>,
    mut round: ResMut<GameRoundState>,
    mut countdowns: ResMut<Countdowns>,
    mut next_phase: ResMut<NextState<GeniusPhase>>,
    mut finished: EventWriter<RoundFinished>,
    mut cues: EventWriter<SoundCue>,
) {
    let Some(position) = just_pressed_world_position(&buttons, &touches, &windows, &camera)
    else {
        return;
    };
    let Some(pressed) = hit_test(
        position,
        pads.iter()
            .map(|(entity, transform, hit_box, _)| (entity, transform, hit_box)),
        &[],
    ) else {
        return;
    };
    let Ok((_, _, _, pad)) = pads.get(pressed) else {
        return;
    };

    round.record_click();
    board.flash = Some((pad.index, Timer::new(FLASH_TIME, TimerMode::Once)));
    let press = board.sequence.press(pad.index);
    match judge_press(&mut round, press, board.def.target_length) {
        Turn::Continue => {
            cues.send(SoundCue::Correct);
        }
        Turn::Grow => {
            cues.send(SoundCue::Correct);
            board.grow();
            next_phase.set(GeniusPhase::Showing);
        }
        Turn::Replay => {
            cues.send(SoundCue::Wrong);
            board.replay();
            next_phase.set(GeniusPhase::Showing);
        }
        Turn::Over(outcome) => finish_round(
            &round,
            outcome,
            &mut countdowns,
            &mut next_phase,
            &mut finished,
            &mut cues,
        ),
    }
}
