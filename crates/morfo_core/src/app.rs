use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::window::{WindowMode, WindowResolution};

use crate::audio::GameAudioPlugin;
use crate::drag::DragPlugin;
use crate::round::RoundFinished;
use crate::timers::CountdownPlugin;
#[cfg(target_arch = "wasm32")]
use crate::window_resizing::handle_browser_resize;

// portrait tablet ratio, the games are laid out for it
pub const WINDOW_WIDTH: f32 = 480.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

pub const BACKGROUND_COLOR: Color = Color::srgb(0.08, 0.09, 0.16);

fn primary_window(title: &str) -> Window {
    Window {
        title: title.to_string(),
        present_mode: bevy::window::PresentMode::Fifo,
        resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        canvas: Some("#morfologic".into()),
        fit_canvas_to_parent: true,
        mode: WindowMode::Windowed,
        // A touch drag must not scroll or zoom the page under the canvas.
        // Browser shortcuts such as F5 stop working while the canvas has focus.
        prevent_default_event_handling: true,
        ..default()
    }
}

/// Builds the Bevy app every MorfoLogic binary starts from.
///
/// Window, asset and frame pacing configuration live here so the shell
/// and any standalone game runner behave the same way on the desktop and
/// inside the browser canvas.
pub fn get_default_app(title: &str) -> App {
    let mut app = App::new();

    let asset_plugin = bevy::asset::AssetPlugin {
        file_path: "assets".to_string(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(primary_window(title)),
        ..default()
    };

    app.add_plugins(DefaultPlugins.set(asset_plugin).set(window_plugin));

    // Saves battery on tablets, the games are mostly idle between taps.
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(ClearColor(BACKGROUND_COLOR));

    #[cfg(target_arch = "wasm32")]
    app.add_systems(PreUpdate, handle_browser_resize);

    app
}

/// Shared machinery every game relies on: countdowns, the drag engine, the
/// audio cues and the round result channel.
pub struct MorfoCorePlugin;

impl Plugin for MorfoCorePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CountdownPlugin)
            .add_plugins(DragPlugin)
            .add_plugins(GameAudioPlugin)
            .add_event::<RoundFinished>();
    }
}
