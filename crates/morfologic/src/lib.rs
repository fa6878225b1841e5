//! The MorfoLógica shell: login, game menu, session clock, pause, HUD and
//! progress bookkeeping around the three minigames.

use bevy::prelude::*;
use genius::GeniusPlugin;
use ligar::LigarPlugin;
use memory::MemoryPlugin;
use morfo_core::MorfoCorePlugin;
use morfo_core::persistence::{PlayerRecord, ProgressBook};
use morfo_core::session::{SessionClock, SessionConfig};

mod hud;
mod login;
mod menu;
mod pause;
mod results;
mod screens;
mod session;

use hud::HudPlugin;
use login::LoginPlugin;
use menu::MenuPlugin;
use pause::PausePlugin;
use results::ResultsPlugin;
use session::SessionPlugin;

#[derive(States, Clone, Copy, Eq, PartialEq, Debug, Hash, Default)]
pub enum ShellState {
    #[default]
    Login,
    Menu,
    Playing,
    SessionOver,
}

/// The logged-in player and the record loaded for them.
#[derive(Resource, Debug, Clone)]
pub struct Player {
    pub name: String,
    pub record: PlayerRecord,
}

pub fn run() {
    morfo_core::get_default_app("MorfoLógica")
        .add_plugins(ShellPlugin)
        .run();
}

/// Everything but the window: usable from headless tests with a custom
/// [`ProgressBook`] inserted beforehand.
pub struct ShellPlugin;

impl Plugin for ShellPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ProgressBook>() {
            app.init_resource::<ProgressBook>();
        }
        app.add_plugins(MorfoCorePlugin)
            .add_plugins((MemoryPlugin, GeniusPlugin, LigarPlugin))
            .init_state::<ShellState>()
            .init_resource::<SessionConfig>()
            .init_resource::<SessionClock>()
            .add_plugins((
                LoginPlugin,
                MenuPlugin,
                HudPlugin,
                PausePlugin,
                ResultsPlugin,
                SessionPlugin,
            ))
            .add_systems(Startup, setup);
    }
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}
