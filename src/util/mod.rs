//! Shared utilities for the camera and controls layers.
//!
//! Unit conversion for declarative attribute values and the critically
//! damped smoothing used by every animated camera axis.

pub mod damper;
pub mod units;
