use core::time::Duration;

use bevy::prelude::*;
use morfo_core::audio::SoundCue;
use morfo_core::cleanup::{RoundEntity, despawn_all_in_world};
use morfo_core::module::GameModule;
use morfo_core::round::{
    GameKind, GameRoundState, LifeRule, LossReason, RoundFinished, RoundOutcome, RoundPaused,
};
use morfo_core::timers::{CountdownExpired, Countdowns, TimerSlot, clock_now};

use crate::ERRORS_PER_STAR;
use crate::board::MemoryBoard;
use crate::cards::spawn_cards;
use crate::content::{self, PHASES};

/// How long a mismatched pair stays visible before turning back.
pub const MISMATCH_DELAY: Duration = Duration::from_millis(900);

#[derive(States, Clone, Copy, Eq, PartialEq, Debug, Hash, Default)]
pub enum MemoryPhase {
    #[default]
    Inactive,
    /// Every card is face up and clicks are ignored.
    Preview,
    Playing,
    /// The result was reported; waiting for the shell to tear the round down.
    Finished,
}

/// The board of the round in progress.
#[derive(Resource, Debug)]
pub struct MemoryTable {
    pub board: MemoryBoard,
    pub round_length: Duration,
    pub flip_back: Option<Timer>,
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<MemoryPhase>().add_systems(
            Update,
            (
                end_preview.run_if(in_state(MemoryPhase::Preview)),
                (round_timeout, flip_back_mismatch)
                    .run_if(in_state(MemoryPhase::Playing))
                    .run_if(not(resource_exists::<RoundPaused>)),
            ),
        );
    }
}

pub struct MemoryGame;

impl GameModule for MemoryGame {
    fn kind(&self) -> GameKind {
        GameKind::Memory
    }

    fn phase_count(&self) -> u32 {
        PHASES.len() as u32
    }

    fn init(&self, world: &mut World, phase: u32) {
        let Some(def) = content::phase(phase) else {
            warn!("Memory has no phase {phase}");
            return;
        };
        let now = clock_now(world);

        let pairs = def
            .pairs
            .iter()
            .map(|(word, class)| (*word, class.key()))
            .collect::<Vec<_>>();
        let mut order = (0..def.card_count()).collect::<Vec<_>>();
        fastrand::shuffle(&mut order);

        let mut board = MemoryBoard::new(&pairs, &order);
        board.show_all(true);
        spawn_cards(world, &board, def);

        world.insert_resource(GameRoundState::new(
            GameKind::Memory,
            phase,
            LifeRule::EveryNErrors(ERRORS_PER_STAR),
            now,
        ));
        world.insert_resource(MemoryTable {
            board,
            round_length: def.round,
            flip_back: None,
        });
        world
            .resource_mut::<Countdowns>()
            .start(TimerSlot::Preview, now, def.preview);
        world
            .resource_mut::<NextState<MemoryPhase>>()
            .set(MemoryPhase::Preview);
    }

    fn cleanup(&self, world: &mut World) {
        world.resource_mut::<Countdowns>().stop_round();
        despawn_all_in_world::<RoundEntity>(world);
        world.remove_resource::<MemoryTable>();
        world.remove_resource::<GameRoundState>();
        world
            .resource_mut::<NextState<MemoryPhase>>()
            .set(MemoryPhase::Inactive);
    }

    fn pause(&self, world: &mut World) {
        let now = clock_now(world);
        world.resource_mut::<Countdowns>().pause_round(now);
    }

    fn resume(&self, world: &mut World) {
        let now = clock_now(world);
        world.resource_mut::<Countdowns>().resume_round(now);
    }
}

/// Reports the result once and freezes the board.
pub fn finish_round(
    round: &GameRoundState,
    outcome: RoundOutcome,
    countdowns: &mut Countdowns,
    next_phase: &mut NextState<MemoryPhase>,
    finished: &mut EventWriter<RoundFinished>,
    cues: &mut EventWriter<SoundCue>,
) {
    countdowns.stop_round();
    cues.send(match outcome {
        RoundOutcome::Won => SoundCue::Victory,
        RoundOutcome::Lost(_) => SoundCue::Defeat,
    });
    info!(
        "Memory phase {} finished: {outcome:?}, score {}",
        round.phase, round.score
    );
    finished.send(round.finish(outcome));
    next_phase.set(MemoryPhase::Finished);
}

fn end_preview(
    time: Res<Time<Real>>,
    mut expired: EventReader<CountdownExpired>,
    mut table: ResMut<MemoryTable>,
    mut countdowns: ResMut<Countdowns>,
    mut next_phase: ResMut<NextState<MemoryPhase>>,
) {
    if !expired.read().any(|event| event.slot == TimerSlot::Preview) {
        return;
    }
    table.board.show_all(false);
    countdowns.start(TimerSlot::Round, time.elapsed(), table.round_length);
    next_phase.set(MemoryPhase::Playing);
}

fn round_timeout(
    mut expired: EventReader<CountdownExpired>,
    round: Res<GameRoundState>,
    mut countdowns: ResMut<Countdowns>,
    mut next_phase: ResMut<NextState<MemoryPhase>>,
    mut finished: EventWriter<RoundFinished>,
    mut cues: EventWriter<SoundCue>,
) {
    if !expired.read().any(|event| event.slot == TimerSlot::Round) {
        return;
    }
    finish_round(
        &round,
        RoundOutcome::Lost(LossReason::OutOfTime),
        &mut countdowns,
        &mut next_phase,
        &mut finished,
        &mut cues,
    );
}

fn flip_back_mismatch(time: Res<Time>, mut table: ResMut<MemoryTable>) {
    let Some(timer) = table.flip_back.as_mut() else {
        return;
    };
    if timer.tick(time.delta()).just_finished() {
        table.flip_back = None;
        table.board.flip_back_unmatched();
    }
}
