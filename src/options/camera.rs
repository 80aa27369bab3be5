use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::OptionsPatch;
use crate::util::damper::DECAY_MILLISECONDS;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbit controller tuning.
pub struct CameraOptions {
    /// Drag-to-orbit multiplier.
    #[schemars(title = "Orbit Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub orbit_sensitivity: f32,
    /// Wheel and keyboard zoom multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub zoom_sensitivity: f32,
    /// Damping time constant in milliseconds.
    #[schemars(title = "Smoothing (ms)", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub decay_milliseconds: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 1.0,
            zoom_sensitivity: 1.0,
            decay_milliseconds: DECAY_MILLISECONDS,
        }
    }
}

impl CameraOptions {
    /// Controller options carrying these values.
    #[must_use]
    pub fn to_patch(&self) -> OptionsPatch {
        OptionsPatch {
            orbit_sensitivity: Some(self.orbit_sensitivity),
            zoom_sensitivity: Some(self.zoom_sensitivity),
            decay_milliseconds: Some(self.decay_milliseconds),
            ..OptionsPatch::default()
        }
    }
}
