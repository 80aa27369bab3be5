//! Screen-reader label describing where the camera looks from.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

use crate::camera::SphericalPosition;

/// Label shown before the camera has been described.
pub const DEFAULT_LABEL: &str = "3D model";

const QUADRANT_LABELS: [&str; 4] = ["front", "right", "back", "left"];
const TRIENT_LABELS: [&str; 3] = ["upper-", "", "lower-"];

/// Azimuthal quadrant of `theta`: 0 front, 1 right, 2 back, 3 left, with
/// boundaries at odd multiples of 45 degrees.
#[must_use]
pub fn azimuthal_quadrant(theta: f32) -> usize {
    ((theta + FRAC_PI_4) / FRAC_PI_2).floor().rem_euclid(4.0) as usize
}

/// Polar trient of `phi`: 0 upper, 1 level, 2 lower, with boundaries at
/// multiples of 60 degrees.
#[must_use]
pub fn polar_trient(phi: f32) -> usize {
    ((phi / FRAC_PI_3).floor().max(0.0) as usize).min(2)
}

/// Label for one orientation bucket.
#[must_use]
pub fn view_label(quadrant: usize, trient: usize) -> String {
    format!(
        "View from stage {}{}",
        TRIENT_LABELS[trient.min(2)],
        QUADRANT_LABELS[quadrant % 4]
    )
}

/// Tracks the orientation bucket and the label currently exposed to
/// assistive technology.
#[derive(Debug, Clone)]
pub struct AriaLabel {
    last_bucket: (usize, usize),
    label: String,
    shown: String,
}

impl AriaLabel {
    /// Start from the bucket of `spherical` with the default label.
    #[must_use]
    pub fn new(spherical: SphericalPosition) -> Self {
        Self {
            last_bucket: bucket(spherical),
            label: DEFAULT_LABEL.into(),
            shown: DEFAULT_LABEL.into(),
        }
    }

    /// The label assistive technology sees right now.
    #[must_use]
    pub fn shown(&self) -> &str {
        &self.shown
    }

    /// Camera moved. The label only changes when the bucket changes while
    /// the viewer holds focus. Returns `true` if the shown label changed.
    pub fn camera_changed(
        &mut self,
        spherical: SphericalPosition,
        focused: bool,
    ) -> bool {
        let next = bucket(spherical);
        let moved = next != self.last_bucket;
        self.last_bucket = next;
        if !moved || !focused {
            return false;
        }
        self.label = view_label(next.0, next.1);
        self.shown.clone_from(&self.label);
        true
    }

    /// Replace the shown label with the prompt text.
    pub fn show_prompt(&mut self, text: &str) {
        text.clone_into(&mut self.shown);
    }

    /// Viewer gained focus: restore the true label if the prompt replaced it.
    pub fn focus(&mut self) {
        if self.shown != self.label {
            self.shown.clone_from(&self.label);
        }
    }
}

fn bucket(spherical: SphericalPosition) -> (usize, usize) {
    (
        azimuthal_quadrant(spherical.theta),
        polar_trient(spherical.phi),
    )
}
