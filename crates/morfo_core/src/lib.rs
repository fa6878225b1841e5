mod app;
pub use app::*;

pub mod audio;
pub mod cleanup;
pub mod countdown;
pub mod drag;
pub mod grammar;
pub mod input;
pub mod module;
pub mod persistence;
pub mod round;
pub mod session;
pub mod timers;

#[cfg(target_arch = "wasm32")]
mod window_resizing;
