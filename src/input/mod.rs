//! Input handling: the normalized pointer, wheel, keyboard, and focus events
//! the controls consume.

/// Platform-agnostic input events.
pub mod event;

pub use event::{InputEvent, Key};
