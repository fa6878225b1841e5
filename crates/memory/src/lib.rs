//! Memória: match each word with the card naming its word class.

use bevy::prelude::*;
use morfo_core::module::RegisterGameModule;

mod board;
mod cards;
pub mod content;
mod game;
mod input;

use cards::CardPlugin;
pub use game::{MemoryGame, MemoryPhase};
use game::GamePlugin;
use input::InputPlugin;

/// Points for every matched pair.
pub const MATCH_SCORE: u32 = 10;
/// Mismatches it takes to lose one star.
pub const ERRORS_PER_STAR: u32 = 10;

pub struct MemoryPlugin;

impl Plugin for MemoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GamePlugin)
            .add_plugins(CardPlugin)
            .add_plugins(InputPlugin)
            .register_game_module(MemoryGame);
    }
}
