use core::time::Duration;

use bevy::prelude::*;
use morfo_core::audio::SoundCue;
use morfo_core::cleanup::{RoundEntity, despawn_all_in_world};
use morfo_core::module::GameModule;
use morfo_core::round::{
    GameKind, GameRoundState, LifeRule, LossReason, RoundFinished, RoundOutcome, RoundPaused,
};
use morfo_core::timers::{CountdownExpired, Countdowns, TimerSlot, clock_now};

use crate::content::{self, GeniusPhaseDef, PHASES};
use crate::pads::spawn_pads;
use crate::sequence::{Sequence, Step};

/// Share of each playback step during which the pad is lit; the rest is a
/// dark gap so repeated pads read as separate steps.
const LIT_FRACTION: f32 = 0.75;

#[derive(States, Clone, Copy, Eq, PartialEq, Debug, Hash, Default)]
pub enum GeniusPhase {
    #[default]
    Inactive,
    /// The sequence is being played back; presses are ignored.
    Showing,
    Listening,
    Finished,
}

/// Steps through the sequence during playback.
#[derive(Debug, Clone)]
pub struct Playback {
    index: usize,
    timer: Timer,
}

impl Playback {
    pub fn new(step: Duration) -> Self {
        Self {
            index: 0,
            timer: Timer::new(step, TimerMode::Repeating),
        }
    }

    /// Advances by `delta` and returns the step on screen, or `None` once
    /// all `len` steps were shown.
    pub fn advance(&mut self, delta: Duration, len: usize) -> Option<usize> {
        self.timer.tick(delta);
        self.index += self.timer.times_finished_this_tick() as usize;
        (self.index < len).then_some(self.index)
    }

    pub fn is_lit(&self) -> bool {
        self.timer.fraction() < LIT_FRACTION
    }
}

/// The round in progress.
#[derive(Resource, Debug)]
pub struct GeniusBoard {
    pub def: &'static GeniusPhaseDef,
    pub sequence: Sequence,
    pub playback: Playback,
    /// Pad currently lit, either by playback or by a press.
    pub lit: Option<usize>,
    pub caption: Option<&'static str>,
    pub flash: Option<(usize, Timer)>,
}

impl GeniusBoard {
    pub fn new(def: &'static GeniusPhaseDef) -> Self {
        Self {
            def,
            sequence: Sequence::default(),
            playback: Playback::new(def.step_reveal),
            lit: None,
            caption: None,
            flash: None,
        }
    }

    /// Adds a random step and plays the sequence from the start.
    pub fn grow(&mut self) {
        if let Some(step) = random_step(self.def) {
            self.sequence.push(step);
        }
        self.replay();
    }

    pub fn replay(&mut self) {
        self.sequence.restart_attempt();
        self.playback = Playback::new(self.def.step_reveal);
        self.flash = None;
    }
}

fn random_step(def: &GeniusPhaseDef) -> Option<Step> {
    if def.pads.is_empty() {
        return None;
    }
    let pad = fastrand::usize(..def.pads.len());
    let words = def.words_for(pad).collect::<Vec<_>>();
    let word = fastrand::choice(words)?;
    Some(Step { pad, word })
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GeniusPhase>().add_systems(
            Update,
            (
                play_sequence.run_if(in_state(GeniusPhase::Showing)),
                (round_timeout, fade_flash).run_if(
                    in_state(GeniusPhase::Showing).or(in_state(GeniusPhase::Listening)),
                ),
            )
                .run_if(not(resource_exists::<RoundPaused>)),
        );
    }
}

pub struct GeniusGame;

impl GameModule for GeniusGame {
    fn kind(&self) -> GameKind {
        GameKind::Genius
    }

    fn phase_count(&self) -> u32 {
        PHASES.len() as u32
    }

    fn init(&self, world: &mut World, phase: u32) {
        let Some(def) = content::phase(phase) else {
            warn!("Genius has no phase {phase}");
            return;
        };
        let now = clock_now(world);

        spawn_pads(world, def);

        let mut board = GeniusBoard::new(def);
        board.grow();
        world.insert_resource(board);
        world.insert_resource(GameRoundState::new(
            GameKind::Genius,
            phase,
            LifeRule::PerError,
            now,
        ));
        world
            .resource_mut::<Countdowns>()
            .start(TimerSlot::Round, now, def.round);
        world
            .resource_mut::<NextState<GeniusPhase>>()
            .set(GeniusPhase::Showing);
    }

    fn cleanup(&self, world: &mut World) {
        world.resource_mut::<Countdowns>().stop_round();
        despawn_all_in_world::<RoundEntity>(world);
        world.remove_resource::<GeniusBoard>();
        world.remove_resource::<GameRoundState>();
        world
            .resource_mut::<NextState<GeniusPhase>>()
            .set(GeniusPhase::Inactive);
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

pub fn finish_round(
    round: &GameRoundState,
    outcome: RoundOutcome,
    countdowns: &mut Countdowns,
    next_phase: &mut NextState<GeniusPhase>,
    finished: &mut EventWriter<RoundFinished>,
    cues: &mut EventWriter<SoundCue>,
) {
    countdowns.stop_round();
    cues.send(match outcome {
        RoundOutcome::Won => SoundCue::Victory,
        RoundOutcome::Lost(_) => SoundCue::Defeat,
    });
    info!(
        "Genius phase {} finished: {outcome:?}, score {}",
        round.phase, round.score
    );
    finished.send(round.finish(outcome));
    next_phase.set(GeniusPhase::Finished);
}

fn play_sequence(
    time: Res<Time>,
    mut board: ResMut<GeniusBoard>,
    mut next_phase: ResMut<NextState<GeniusPhase>>,
) {
    let len = board.sequence.len();
    match board.playback.advance(time.delta(), len) {
        Some(index) => {
            let step = board.sequence.steps().get(index).copied();
            let lit = board.playback.is_lit();
            board.lit = step.filter(|_| lit).map(|step| step.pad);
            board.caption = step.map(|step| step.word);
        }
        None => {
            board.lit = None;
            board.caption = None;
            next_phase.set(GeniusPhase::Listening);
        }
    }
}

fn fade_flash(time: Res<Time>, mut board: ResMut<GeniusBoard>) {
    let Some((_, timer)) = board.flash.as_mut() else {
        return;
    };
    if timer.tick(time.delta()).just_finished() {
        board.flash = None;
    }
}

fn round_timeout(
    mut expired: EventReader<CountdownExpired>,
    round: Res<GameRoundState>,
    mut countdowns: ResMut<Countdowns>,
    mut next_phase: ResMut<NextState<GeniusPhase>>,
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
