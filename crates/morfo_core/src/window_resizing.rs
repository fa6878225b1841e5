use bevy::prelude::*;
use bevy::window::PrimaryWindow;

// wgpu refuses surfaces above this on most tablets
const MAX_EXTENT: f32 = 2048.0;

/// Follows the browser viewport so the canvas keeps filling the page.
pub fn handle_browser_resize(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Some((width, height)) = browser_viewport() else {
        return;
    };

    for mut window in &mut windows {
        let same_width = (window.resolution.width() - width).abs() <= f32::EPSILON;
        let same_height = (window.resolution.height() - height).abs() <= f32::EPSILON;
        if !(same_width && same_height) {
            window
                .resolution
                .set(width.min(MAX_EXTENT), height.min(MAX_EXTENT));
        }
    }
}

fn browser_viewport() -> Option<(f32, f32)> {
    let browser = web_sys::window()?;
    let width = browser.inner_width().ok()?.as_f64()?;
    let height = browser.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32))
}
