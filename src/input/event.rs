/// Platform-agnostic input events, already normalized by the embedding
/// environment.
///
/// These are fed into [`StageControls::handle_input`], which forwards them
/// to the [`SmoothControls`] orbit controller and to the interaction-prompt
/// state machine.
///
/// [`StageControls::handle_input`]: crate::controls::StageControls::handle_input
/// [`SmoothControls`]: crate::camera::smooth_controls::SmoothControls
///
/// # Example
///
/// ```ignore
/// controls.handle_input(InputEvent::PointerDown { x: 10.0, y: 20.0 });
/// controls.handle_input(InputEvent::PointerMove { x: 40.0, y: 20.0 });
/// controls.handle_input(InputEvent::PointerUp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed at a position in CSS pixels.
    PointerDown {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Pointer moved to an absolute position in CSS pixels.
    PointerMove {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Primary pointer released or cancelled.
    PointerUp,
    /// Scroll wheel (positive = zoom in).
    Wheel {
        /// Scroll amount in notches.
        delta: f32,
    },
    /// Key pressed.
    Key(Key),
    /// The viewer element gained input focus.
    Focus,
    /// The viewer element lost input focus.
    Blur,
}

/// Keys the orbit controller responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Orbit left.
    ArrowLeft,
    /// Orbit right.
    ArrowRight,
    /// Orbit up.
    ArrowUp,
    /// Orbit down.
    ArrowDown,
    /// Zoom in.
    PageUp,
    /// Zoom out.
    PageDown,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` string to a key, if handled.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "PageUp" => Some(Self::PageUp),
            "PageDown" => Some(Self::PageDown),
            _ => None,
        }
    }
}
