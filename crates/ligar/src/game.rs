use core::time::Duration;

use bevy::prelude::*;
use morfo_core::audio::SoundCue;
use morfo_core::cleanup::{RoundEntity, despawn_all_in_world};
use morfo_core::drag::{
    Completed, DragClone, DragEngine, DragMode, DropEvent, DropZone, Draggable, Hovered,
    bind_drag, cleanup_drag,
};
use morfo_core::module::GameModule;
use morfo_core::round::{
    GameKind, GameRoundState, LifeRule, LossReason, RoundFinished, RoundOutcome, RoundPaused,
};
use morfo_core::timers::{CountdownExpired, Countdowns, TimerSlot, clock_now};

use crate::CORRECT_SCORE;
use crate::content::{self, PHASES};
use crate::layout::{BankWord, ZoneTint, scroll_bounds, slot_offset, spawn_bank, spawn_zones};
use crate::rules::{DropVerdict, PendingReleases, ZoneSlots, judge_drop};

/// Feedback time between a drop and the next accepted press.
pub const RELEASE_DELAY: Duration = Duration::from_millis(350);
const FLASH_TIME: Duration = Duration::from_millis(400);

const CORRECT_FLASH: Color = Color::srgb(0.3, 0.85, 0.4);
const WRONG_FLASH: Color = Color::srgb(0.95, 0.25, 0.25);
const USED_WORD_COLOR: Color = Color::srgb(0.55, 0.55, 0.55);

#[derive(States, Clone, Copy, Eq, PartialEq, Debug, Hash, Default)]
pub enum LigarPhase {
    #[default]
    Inactive,
    Playing,
    Finished,
}

#[derive(Resource, Debug)]
pub struct LigarBoard {
    pub mode: DragMode,
    /// Words still to be classified.
    pub remaining: usize,
    pub slots: ZoneSlots,
    pub pending: PendingReleases,
}

#[derive(Component, Debug)]
pub struct ZoneFlash {
    color: Color,
    timer: Timer,
}

impl ZoneFlash {
    fn new(color: Color) -> Self {
        Self {
            color,
            timer: Timer::new(FLASH_TIME, TimerMode::Once),
        }
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<LigarPhase>()
            .add_systems(
                Update,
                (handle_drops, release_pending, round_timeout)
                    .chain()
                    .run_if(in_state(LigarPhase::Playing))
                    .run_if(not(resource_exists::<RoundPaused>)),
            )
            .add_systems(
                PostUpdate,
                (fade_flashes, tint_zones, grey_out_used_words)
                    .chain()
                    .run_if(resource_exists::<LigarBoard>),
            );
    }
}

pub struct LigarGame;

impl GameModule for LigarGame {
    fn kind(&self) -> GameKind {
        GameKind::Ligar
    }

    fn phase_count(&self) -> u32 {
        PHASES.len() as u32
    }

    fn init(&self, world: &mut World, phase: u32) {
        let Some(def) = content::phase(phase) else {
            warn!("Ligar has no phase {phase}");
            return;
        };
        let now = clock_now(world);

        spawn_zones(world, def);
        spawn_bank(world, def);

        world.insert_resource(scroll_bounds(def));
        world.insert_resource(LigarBoard {
            mode: def.mode,
            remaining: def.words.len(),
            slots: ZoneSlots::default(),
            pending: PendingReleases::default(),
        });
        world.insert_resource(GameRoundState::new(
            GameKind::Ligar,
            phase,
            LifeRule::PerError,
            now,
        ));
        world
            .resource_mut::<Countdowns>()
            .start(TimerSlot::Round, now, def.round);
        bind_drag(world, def.mode);
        world
            .resource_mut::<NextState<LigarPhase>>()
            .set(LigarPhase::Playing);
    }

    fn cleanup(&self, world: &mut World) {
        cleanup_drag(world);
        world.resource_mut::<Countdowns>().stop_round();
        despawn_all_in_world::<RoundEntity>(world);
        world.remove_resource::<morfo_core::drag::ScrollBounds>();
        world.remove_resource::<LigarBoard>();
        world.remove_resource::<GameRoundState>();

        let mut cameras = world.query_filtered::<&mut Transform, With<Camera2d>>();
        for mut camera in cameras.iter_mut(world) {
            camera.translation.y = 0.0;
        }

        world
            .resource_mut::<NextState<LigarPhase>>()
            .set(LigarPhase::Inactive);
    }

    fn pause(&self, world: &mut World) {
        // A word in flight goes back to the bank; held tokens would be stale.
        cleanup_drag(world);
        if let Some(mut board) = world.get_resource_mut::<LigarBoard>() {
            board.pending = PendingReleases::default();
        }
        let now = clock_now(world);
        world.resource_mut::<Countdowns>().pause_round(now);
    }

    fn resume(&self, world: &mut World) {
        let now = clock_now(world);
        world.resource_mut::<Countdowns>().resume_round(now);
        if let Some(mode) = world.get_resource::<LigarBoard>().map(|board| board.mode) {
            bind_drag(world, mode);
        }
    }
}

fn finish_round(
    round: &GameRoundState,
    outcome: RoundOutcome,
    countdowns: &mut Countdowns,
    next_phase: &mut NextState<LigarPhase>,
    finished: &mut EventWriter<RoundFinished>,
    cues: &mut EventWriter<SoundCue>,
) {
    countdowns.stop_round();
    cues.send(match outcome {
        RoundOutcome::Won => SoundCue::Victory,
        RoundOutcome::Lost(_) => SoundCue::Defeat,
    });
    info!(
        "Ligar phase {} finished: {outcome:?}, score {}",
        round.phase, round.score
    );
    finished.send(round.finish(outcome));
    next_phase.set(LigarPhase::Finished);
}

fn handle_drops(
    mut commands: Commands,
    mut drops: EventReader<DropEvent>,
    words: Query<&Draggable>,
    zones: Query<&DropZone>,
    transforms: Query<&Transform>,
    engine: Res<DragEngine>,
    mut board: ResMut<LigarBoard>,
    mut round: ResMut<GameRoundState>,
    mut countdowns: ResMut<Countdowns>,
    mut next_phase: ResMut<NextState<LigarPhase>>,
    mut finished: EventWriter<RoundFinished>,
    mut cues: EventWriter<SoundCue>,
) {
    for drop in drops.read() {
        // The cleanup that made the token stale already put the word back.
        if !engine.is_current(drop.release) {
            debug!("Ignored a drop of {} from before the last drag cleanup", drop.origin);
            continue;
        }
        board.pending.schedule(drop.release, RELEASE_DELAY);

        let Ok(word) = words.get(drop.dragged) else {
            warn!("Dropped entity {} is not a word", drop.dragged);
            continue;
        };
        let zone_key = drop
            .target
            .and_then(|zone| zones.get(zone).ok())
            .map(|zone| zone.key.as_str());

        match (judge_drop(&word.key, zone_key), drop.target) {
            (DropVerdict::Correct, Some(zone)) => {
                place_word(&mut commands, &mut board, drop, zone);
                commands.entity(zone).insert(ZoneFlash::new(CORRECT_FLASH));
                round.add_score(CORRECT_SCORE);
                board.remaining = board.remaining.saturating_sub(1);
                cues.send(SoundCue::Correct);
                if board.remaining == 0 {
                    finish_round(
                        &round,
                        RoundOutcome::Won,
                        &mut countdowns,
                        &mut next_phase,
                        &mut finished,
                        &mut cues,
                    );
                    return;
                }
            }
            (DropVerdict::Wrong, target) => {
                return_word(&mut commands, drop, &transforms);
                if let Some(zone) = target {
                    commands.entity(zone).insert(ZoneFlash::new(WRONG_FLASH));
                }
                cues.send(SoundCue::Wrong);
                if round.record_error() {
                    finish_round(
                        &round,
                        RoundOutcome::Lost(LossReason::OutOfLives),
                        &mut countdowns,
                        &mut next_phase,
                        &mut finished,
                        &mut cues,
                    );
                    return;
                }
            }
            _ => return_word(&mut commands, drop, &transforms),
        }
    }
}

/// Fixes a correctly classified word inside its box.
fn place_word(commands: &mut Commands, board: &mut LigarBoard, drop: &DropEvent, zone: Entity) {
    let slot = board.slots.claim(zone);
    commands
        .entity(drop.dragged)
        .insert((Transform::from_translation(slot_offset(slot)), Completed))
        .set_parent(zone);

    match drop.mode {
        DragMode::Move => {
            if let Some(placeholder) = drop.placeholder {
                commands.entity(placeholder).despawn_recursive();
            }
        }
        DragMode::Clone => {
            commands.entity(drop.dragged).remove::<DragClone>();
            commands.entity(drop.origin).insert(Completed);
        }
    }
}

/// Puts a rejected or missed word back where it came from.
fn return_word(commands: &mut Commands, drop: &DropEvent, transforms: &Query<&Transform>) {
    match drop.mode {
        DragMode::Move => {
            let Some(placeholder) = drop.placeholder else {
                return;
            };
            if let Ok(resting) = transforms.get(placeholder) {
                commands.entity(drop.dragged).insert(*resting);
                commands.entity(placeholder).despawn_recursive();
            }
        }
        DragMode::Clone => {
            commands.entity(drop.dragged).despawn_recursive();
        }
    }
}

fn release_pending(time: Res<Time>, mut board: ResMut<LigarBoard>, mut engine: ResMut<DragEngine>) {
    for token in board.pending.tick(time.delta()) {
        if !engine.release(token) {
            debug!("Ignored a release token from before the last drag cleanup");
        }
    }
}

fn round_timeout(
    mut expired: EventReader<CountdownExpired>,
    round: Res<GameRoundState>,
    mut countdowns: ResMut<Countdowns>,
    mut next_phase: ResMut<NextState<LigarPhase>>,
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

fn fade_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut ZoneFlash)>,
) {
    for (entity, mut flash) in &mut flashes {
        if flash.timer.tick(time.delta()).finished() {
            commands.entity(entity).remove::<ZoneFlash>();
        }
    }
}

fn tint_zones(mut zones: Query<(&ZoneTint, &mut Sprite, Has<Hovered>, Option<&ZoneFlash>)>) {
    for (tint, mut sprite, hovered, flash) in &mut zones {
        let color = match (flash, hovered) {
            (Some(flash), _) => flash.color,
            (None, true) => tint.base.with_alpha(0.9),
            (None, false) => tint.base,
        };
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

fn grey_out_used_words(
    board: Res<LigarBoard>,
    mut words: Query<&mut Sprite, (With<BankWord>, Added<Completed>)>,
) {
    if board.mode != DragMode::Clone {
        return;
    }
    for mut sprite in &mut words {
        sprite.color = USED_WORD_COLOR;
    }
}

#[cfg(test)]
mod tests {
    use bevy::input::InputPlugin;
    use bevy::state::app::StatesPlugin;
    use morfo_core::drag::{DragPlugin, DragStart, Placeholder};
    use morfo_core::module::{pause_active_game, resume_active_game};
    use morfo_core::module::{cleanup_active_game, switch_game};
    use morfo_core::timers::CountdownPlugin;

    use super::*;
    use crate::LigarPlugin;

    fn app(phase: u32) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin))
            .add_plugins((CountdownPlugin, DragPlugin))
            .add_event::<RoundFinished>()
            .add_event::<SoundCue>()
            .add_plugins(LigarPlugin);
        app.update();
        switch_game(app.world_mut(), GameKind::Ligar, phase);
        app.update();
        app
    }

    fn word_with_key(app: &mut App, key: &str) -> Entity {
        app.world_mut()
            .query_filtered::<(Entity, &Draggable), With<BankWord>>()
            .iter(app.world())
            .find(|(_, word)| word.key == key)
            .map(|(entity, _)| entity)
            .unwrap()
    }

    fn zone_with_key(app: &mut App, key: &str) -> Entity {
        app.world_mut()
            .query::<(Entity, &DropZone)>()
            .iter(app.world())
            .find(|(_, zone)| zone.key == key)
            .map(|(entity, _)| entity)
            .unwrap()
    }

    /// Runs a gesture through the engine and queues its drop for the game.
    fn send_drop(app: &mut App, start: DragStart, target: Entity) {
        let mut engine = app.world_mut().resource_mut::<DragEngine>();
        engine.begin(start).unwrap();
        let outcome = engine.finish(Some(target)).unwrap();
        app.world_mut().send_event(DropEvent {
            dragged: outcome.dragged,
            origin: outcome.origin,
            target: outcome.target,
            placeholder: outcome.placeholder,
            mode: outcome.mode,
            release: outcome.release,
        });
    }

    fn move_start(app: &mut App, word: Entity) -> (DragStart, Entity) {
        let placeholder = app
            .world_mut()
            .spawn((Transform::from_xyz(-80.0, 100.0, 2.0), Placeholder { origin: word }))
            .id();
        let start = DragStart {
            origin: word,
            dragged: word,
            placeholder: Some(placeholder),
            mode: DragMode::Move,
            pointer: Vec2::ZERO,
            anchor: Vec2::ZERO,
        };
        (start, placeholder)
    }

    fn clone_start(app: &mut App, word: Entity) -> (DragStart, Entity) {
        let draggable = app.world().get::<Draggable>(word).unwrap().clone();
        let clone = app
            .world_mut()
            .spawn((
                draggable,
                Transform::from_xyz(0.0, 0.0, 50.0),
                DragClone { origin: word },
            ))
            .id();
        let start = DragStart {
            origin: word,
            dragged: clone,
            placeholder: None,
            mode: DragMode::Clone,
            pointer: Vec2::ZERO,
            anchor: Vec2::ZERO,
        };
        (start, clone)
    }

    /// Drives the engine through a move gesture and hands the drop to the game.
    fn drop_moved(app: &mut App, word: Entity, target: Entity) -> Entity {
        let (start, placeholder) = move_start(app, word);
        send_drop(app, start, target);
        app.update();
        placeholder
    }

    #[test]
    fn correct_drop_snaps_the_word_into_its_box() {
        let mut app = app(1);
        let word = word_with_key(&mut app, "verbo");
        let zone = zone_with_key(&mut app, "verbo");

        let placeholder = drop_moved(&mut app, word, zone);

        let world = app.world();
        assert!(world.get::<Completed>(word).is_some());
        assert_eq!(world.get::<Parent>(word).map(Parent::get), Some(zone));
        assert!(!world.entities().contains(placeholder));
        assert_eq!(world.resource::<GameRoundState>().score, CORRECT_SCORE);
        assert_eq!(world.resource::<LigarBoard>().remaining, 5);
        assert!(world.resource::<DragEngine>().is_locked());
    }

    #[test]
    fn wrong_drop_costs_a_star_and_returns_the_word() {
        let mut app = app(1);
        let word = word_with_key(&mut app, "verbo");
        let zone = zone_with_key(&mut app, "substantivo");

        let placeholder = drop_moved(&mut app, word, zone);

        let world = app.world();
        assert!(world.get::<Completed>(word).is_none());
        assert_eq!(
            world.get::<Transform>(word).map(|t| t.translation),
            Some(Vec3::new(-80.0, 100.0, 2.0))
        );
        assert!(!world.entities().contains(placeholder));
        let round = world.resource::<GameRoundState>();
        assert_eq!(round.error_count, 1);
        assert_eq!(round.remaining_lives, 2);
    }

    #[test]
    fn pausing_mid_round_unbinds_and_resuming_rebinds() {
        let mut app = app(3);
        assert!(app.world().contains_resource::<morfo_core::drag::DragBinding>());

        morfo_core::module::pause_active_game(app.world_mut());
        assert!(!app.world().contains_resource::<morfo_core::drag::DragBinding>());

        morfo_core::module::resume_active_game(app.world_mut());
        assert_eq!(
            app.world()
                .get_resource::<morfo_core::drag::DragBinding>()
                .map(|binding| binding.mode),
            Some(DragMode::Clone)
        );
    }

    #[test]
    fn cleanup_unbinds_and_clears_the_board() {
        let mut app = app(2);
        cleanup_active_game(app.world_mut());
        app.update();

        let world = app.world();
        assert!(!world.contains_resource::<morfo_core::drag::DragBinding>());
        assert!(!world.contains_resource::<LigarBoard>());
        assert!(!world.resource::<DragEngine>().is_locked());
        assert_eq!(
            *world.resource::<State<LigarPhase>>().get(),
            LigarPhase::Inactive
        );
    }

    #[test]
    fn clone_drop_keeps_the_source_in_the_bank() {
        let mut app = app(3);
        let word = word_with_key(&mut app, "verbo");
        let zone = zone_with_key(&mut app, "verbo");

        let (start, clone) = clone_start(&mut app, word);
        send_drop(&mut app, start, zone);
        app.update();

        let world = app.world();
        assert!(world.get::<BankWord>(word).is_some());
        assert!(world.get::<Completed>(word).is_some());
        assert_eq!(world.get::<Parent>(clone).map(Parent::get), Some(zone));
        assert!(world.get::<Completed>(clone).is_some());
        assert!(world.get::<DragClone>(clone).is_none());
        assert_eq!(world.resource::<LigarBoard>().remaining, 11);

        // The placed copy belongs to the zone now and survives a pause.
        pause_active_game(app.world_mut());
        assert!(app.world().entities().contains(clone));
    }

    #[test]
    fn pause_before_the_drop_is_handled_sweeps_the_clone() {
        let mut app = app(3);
        let word = word_with_key(&mut app, "verbo");
        let zone = zone_with_key(&mut app, "verbo");

        let (start, clone) = clone_start(&mut app, word);
        send_drop(&mut app, start, zone);
        pause_active_game(app.world_mut());

        assert!(!app.world().entities().contains(clone));
        app.update();
        resume_active_game(app.world_mut());
        app.update();

        let world = app.world();
        assert!(world.get::<Completed>(word).is_none());
        assert_eq!(world.resource::<GameRoundState>().score, 0);
        assert_eq!(world.resource::<LigarBoard>().remaining, 12);
        assert!(!world.resource::<DragEngine>().is_locked());
    }

    #[test]
    fn cleanup_before_the_drop_is_handled_removes_the_placeholder() {
        let mut app = app(1);
        let word = word_with_key(&mut app, "verbo");
        let zone = zone_with_key(&mut app, "verbo");

        let (start, placeholder) = move_start(&mut app, word);
        send_drop(&mut app, start, zone);
        cleanup_active_game(app.world_mut());
        app.update();

        let world = app.world();
        assert!(!world.entities().contains(placeholder));
        assert_eq!(
            world
                .iter_entities()
                .filter(|entity| entity.contains::<Placeholder>() || entity.contains::<DragClone>())
                .count(),
            0
        );
    }
}
