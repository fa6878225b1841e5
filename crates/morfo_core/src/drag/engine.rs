use bevy::prelude::*;
use thiserror::Error;

/// Fraction of the viewport height, from either edge, that triggers
/// auto-scrolling while dragging.
pub const AUTO_SCROLL_EDGE: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragMode {
    /// The original element travels and is relocated on a successful drop.
    #[default]
    Move,
    /// A disposable copy travels; the source never leaves its spot.
    Clone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    #[default]
    None,
    Up,
    Down,
}

impl ScrollDirection {
    /// Direction implied by a pointer at `screen_y` (window coordinates,
    /// top is zero) in a viewport `viewport_height` tall.
    pub fn from_pointer(screen_y: f32, viewport_height: f32) -> Self {
        if viewport_height <= 0.0 {
            return Self::None;
        }
        let threshold = viewport_height * AUTO_SCROLL_EDGE;
        if screen_y < threshold {
            Self::Up
        } else if screen_y > viewport_height - threshold {
            Self::Down
        } else {
            Self::None
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressRejected {
    #[error("a drag is already in flight or awaiting release")]
    Locked,
    #[error("the pressed element sits in a completed container")]
    Completed,
}

/// Everything needed to open a drag session. `dragged` is the origin itself
/// in move mode, or the freshly spawned clone in clone mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    pub origin: Entity,
    pub dragged: Entity,
    pub placeholder: Option<Entity>,
    pub mode: DragMode,
    pub pointer: Vec2,
    pub anchor: Vec2,
}

/// The live state of one gesture, from press to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub dragged: Entity,
    pub origin: Entity,
    pub placeholder: Option<Entity>,
    pub pointer_offset: Vec2,
    pub mode: DragMode,
    pub hovered: Option<Entity>,
    pub scroll: ScrollDirection,
}

/// Hover highlight changes the caller must apply after a motion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    pub cleared: Option<Entity>,
    pub highlighted: Option<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionUpdate {
    /// Where the dragged element's anchor now belongs.
    pub position: Vec2,
    pub hover: HoverChange,
    pub scroll: ScrollDirection,
    pub scroll_changed: bool,
}

/// Proof that a drop was handed out. Passing it back to
/// [`DragEngine::release`] unlocks the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseToken {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropOutcome {
    pub dragged: Entity,
    pub origin: Entity,
    pub target: Option<Entity>,
    pub placeholder: Option<Entity>,
    pub mode: DragMode,
    pub cleared_hover: Option<Entity>,
    pub release: ReleaseToken,
}

/// Single-flight drag state machine: `idle -> dragging -> awaiting release -> idle`.
///
/// The engine is locked from the moment a press is accepted until the drop
/// handler returns its [`ReleaseToken`]. `cleanup` bumps the generation so
/// tokens issued before it can never unlock a later gesture.
#[derive(Resource, Debug, Default)]
pub struct DragEngine {
    session: Option<DragSession>,
    locked: bool,
    generation: u64,
}

impl DragEngine {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn check_press(&self, completed: bool) -> Result<(), PressRejected> {
        if self.locked || self.session.is_some() {
            return Err(PressRejected::Locked);
        }
        if completed {
            return Err(PressRejected::Completed);
        }
        Ok(())
    }

    pub fn begin(&mut self, start: DragStart) -> Result<(), PressRejected> {
        self.check_press(false)?;
        self.locked = true;
        self.session = Some(DragSession {
            dragged: start.dragged,
            origin: start.origin,
            placeholder: start.placeholder,
            pointer_offset: start.pointer - start.anchor,
            mode: start.mode,
            hovered: None,
            scroll: ScrollDirection::None,
        });
        Ok(())
    }

    /// Follows the pointer. `hit` is the drop zone under the pointer, if any.
    pub fn motion(
        &mut self,
        pointer: Vec2,
        hit: Option<Entity>,
        screen_y: f32,
        viewport_height: f32,
    ) -> Option<MotionUpdate> {
        let session = self.session.as_mut()?;

        let mut hover = HoverChange::default();
        if session.hovered != hit {
            hover.cleared = session.hovered;
            hover.highlighted = hit;
            session.hovered = hit;
        }

        let scroll = ScrollDirection::from_pointer(screen_y, viewport_height);
        let scroll_changed = scroll != session.scroll;
        session.scroll = scroll;

        Some(MotionUpdate {
            position: pointer - session.pointer_offset,
            hover,
            scroll,
            scroll_changed,
        })
    }

    /// Ends the gesture. The session is gone afterwards but the engine stays
    /// locked until the returned token is released.
    pub fn finish(&mut self, target: Option<Entity>) -> Option<DropOutcome> {
        let session = self.session.take()?;
        Some(DropOutcome {
            dragged: session.dragged,
            origin: session.origin,
            target,
            placeholder: session.placeholder,
            mode: session.mode,
            cleared_hover: session.hovered,
            release: ReleaseToken {
                generation: self.generation,
            },
        })
    }

    /// Whether a drop carrying `token` still belongs to the current binding.
    /// Drops handed out before a cleanup were already undone by it.
    pub fn is_current(&self, token: ReleaseToken) -> bool {
        token.generation == self.generation
    }

    /// Returns `false` when the token predates a cleanup and was ignored.
    pub fn release(&mut self, token: ReleaseToken) -> bool {
        if token.generation != self.generation || self.session.is_some() {
            return false;
        }
        self.locked = false;
        true
    }

    /// Forced teardown. Hands back the interrupted session, if any, so the
    /// caller can remove its clone and highlight.
    pub fn cleanup(&mut self) -> Option<DragSession> {
        self.locked = false;
        self.generation += 1;
        self.session.take()
    }
}
