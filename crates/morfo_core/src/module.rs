use bevy::prelude::*;

use crate::round::{GameKind, RoundPaused};

/// What every minigame exposes to the shell.
///
/// The shell never reaches into a game's resources; it only drives these
/// entry points. Implementations get the whole `World` so they can insert
/// or remove their own resources and entities.
pub trait GameModule: Send + Sync + 'static {
    fn kind(&self) -> GameKind;

    /// Number of phases in the game's content table.
    fn phase_count(&self) -> u32;

    /// Starts a round of `phase` (1-based).
    fn init(&self, world: &mut World, phase: u32);

    /// Tears the round down: entities, countdowns, drag bindings, state.
    fn cleanup(&self, world: &mut World);

    fn pause(&self, world: &mut World);

    fn resume(&self, world: &mut World);
}

/// Registry of the available games plus the one currently on screen.
#[derive(Resource, Default)]
pub struct GameModules {
    modules: Vec<Box<dyn GameModule>>,
    active: Option<GameKind>,
    paused: bool,
}

impl GameModules {
    pub fn register(&mut self, module: impl GameModule) {
        let kind = module.kind();
        self.modules.retain(|existing| existing.kind() != kind);
        self.modules.push(Box::new(module));
    }

    pub fn get(&self, kind: GameKind) -> Option<&dyn GameModule> {
        self.modules
            .iter()
            .find(|module| module.kind() == kind)
            .map(AsRef::as_ref)
    }

    pub fn active(&self) -> Option<GameKind> {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Registers a game on an app being built.
pub trait RegisterGameModule {
    fn register_game_module(&mut self, module: impl GameModule) -> &mut Self;
}

impl RegisterGameModule for App {
    fn register_game_module(&mut self, module: impl GameModule) -> &mut Self {
        self.world_mut()
            .get_resource_or_insert_with(GameModules::default)
            .register(module);
        self
    }
}

/// Cleans up whatever is running, then starts `kind` at `phase`.
pub fn switch_game(world: &mut World, kind: GameKind, phase: u32) {
    cleanup_active_game(world);
    world.resource_scope(|world, mut modules: Mut<GameModules>| {
        let Some(module) = modules.get(kind) else {
            warn!("No game module registered for {kind}");
            return;
        };
        let phase = phase.clamp(1, module.phase_count().max(1));
        info!("Starting {kind} phase {phase}");
        module.init(world, phase);
        modules.active = Some(kind);
        modules.paused = false;
    });
}

pub fn cleanup_active_game(world: &mut World) {
    world.resource_scope(|world, mut modules: Mut<GameModules>| {
        let Some(kind) = modules.active.take() else {
            return;
        };
        if let Some(module) = modules.get(kind) {
            module.cleanup(world);
        }
        world.remove_resource::<RoundPaused>();
        modules.paused = false;
    });
}

pub fn pause_active_game(world: &mut World) {
    world.resource_scope(|world, mut modules: Mut<GameModules>| {
        if modules.paused {
            return;
        }
        let Some(module) = modules.active.and_then(|kind| modules.get(kind)) else {
            return;
        };
        module.pause(world);
        world.insert_resource(RoundPaused);
        modules.paused = true;
    });
}

pub fn resume_active_game(world: &mut World) {
    world.resource_scope(|world, mut modules: Mut<GameModules>| {
        if !modules.paused {
            return;
        }
        let Some(module) = modules.active.and_then(|kind| modules.get(kind)) else {
            return;
        };
        world.remove_resource::<RoundPaused>();
        module.resume(world);
        modules.paused = false;
    });
}
