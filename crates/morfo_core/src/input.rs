use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// What the pointer did this frame, whether it came from a mouse or a finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Pressed,
    Held,
    Released,
}

/// A single pointer sample in both window and world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub phase: PointerPhase,
    /// Window coordinates, origin at the top left corner.
    pub screen: Vec2,
    pub world: Vec2,
}

pub fn just_pressed_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window, With<PrimaryWindow>>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input.iter_just_pressed().next().map(|touch| touch.position())
    }
}

pub fn held_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window, With<PrimaryWindow>>,
) -> Option<Vec2> {
    if button_input.pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input.iter().next().map(|touch| touch.position())
    }
}

pub fn just_released_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window, With<PrimaryWindow>>,
) -> Option<Vec2> {
    if button_input.just_released(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input
            .iter_just_released()
            .next()
            .map(|touch| touch.position())
    }
}

pub fn screen_to_world(
    position: Vec2,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let (camera, camera_transform) = camera.get_single().ok()?;
    camera.viewport_to_world_2d(camera_transform, position).ok()
}

pub fn just_pressed_world_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_pressed_screen_position(button_input, touch_input, windows)?;
    screen_to_world(position, camera)
}

/// Folds mouse and touch input into one press/held/release sample.
///
/// A release wins over a press in the same frame so a very fast tap still
/// ends the gesture it started.
pub fn pointer_sample(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<PointerSample> {
    let (phase, screen) = if let Some(screen) =
        just_released_screen_position(button_input, touch_input, windows)
    {
        (PointerPhase::Released, screen)
    } else if let Some(screen) = just_pressed_screen_position(button_input, touch_input, windows)
    {
        (PointerPhase::Pressed, screen)
    } else {
        (
            PointerPhase::Held,
            held_screen_position(button_input, touch_input, windows)?,
        )
    };

    let world = screen_to_world(screen, camera)?;
    Some(PointerSample {
        phase,
        screen,
        world,
    })
}

/// Whether the primary pointer went down anywhere this frame.
pub fn any_just_pressed(button_input: &ButtonInput<MouseButton>, touch_input: &Touches) -> bool {
    button_input.just_pressed(MouseButton::Left) || touch_input.any_just_pressed()
}
