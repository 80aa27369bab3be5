//! Camera system for orbiting a model.
//!
//! Provides the perspective camera, spherical orbit coordinates, and the
//! damped orbit controller that the controls orchestrator drives.

/// Core camera struct and projection math.
pub mod core;
/// Damped orbit controller with goal/current state and change events.
pub mod smooth_controls;
/// Spherical orbit coordinates.
pub mod spherical;

pub use self::core::Camera;
pub use smooth_controls::{
    ChangeEvent, ChangeSource, InteractionPolicy, OptionsPatch, SmoothControls,
    SmoothControlsOptions,
};
pub use spherical::SphericalPosition;
