//! Ligar: drag every word of the bank into the box of its word class.

use bevy::prelude::*;
use morfo_core::module::RegisterGameModule;

pub mod content;
mod game;
mod layout;
mod rules;

pub use game::{LigarGame, LigarPhase};
use game::GamePlugin;

/// Points for every word dropped in the right box.
pub const CORRECT_SCORE: u32 = 10;

pub struct LigarPlugin;

impl Plugin for LigarPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GamePlugin).register_game_module(LigarGame);
    }
}
