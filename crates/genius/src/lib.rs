//! Genius: repeat a growing sequence of word classes.

use bevy::prelude::*;
use morfo_core::module::RegisterGameModule;

pub mod content;
mod game;
mod input;
mod pads;
mod sequence;

pub use game::{GeniusGame, GeniusPhase};
use game::GamePlugin;
use input::InputPlugin;
use pads::PadPlugin;

/// Points for every full repetition of the sequence.
pub const REPETITION_SCORE: u32 = 10;

pub struct GeniusPlugin;

impl Plugin for GeniusPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GamePlugin)
            .add_plugins(PadPlugin)
            .add_plugins(InputPlugin)
            .register_game_module(GeniusGame);
    }
}
