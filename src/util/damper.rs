//! Critically damped scalar smoothing.
//!
//! Every animated camera axis (azimuth, polar angle, radius, target
//! components, field of view) owns one [`Damper`]. Each frame the value is
//! advanced toward its goal by the exact solution of a critically damped
//! spring, so motion never overshoots and is independent of frame rate.

/// Default decay time constant in milliseconds.
pub const DECAY_MILLISECONDS: f32 = 50.0;

const MIN_DECAY_MILLISECONDS: f32 = 0.001;

/// Speed below which (relative to the normalization scale) the value snaps
/// onto its goal.
const NIL_SPEED_FACTOR: f32 = 0.0002;

/// Critically damped spring state for one scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Damper {
    velocity: f32,
    natural_frequency: f32,
}

impl Default for Damper {
    fn default() -> Self {
        Self::new(DECAY_MILLISECONDS)
    }
}

impl Damper {
    /// Create a damper with the given decay time constant (ms).
    #[must_use]
    pub fn new(decay_milliseconds: f32) -> Self {
        let mut damper = Self {
            velocity: 0.0,
            natural_frequency: 0.0,
        };
        damper.set_decay_time(decay_milliseconds);
        damper
    }

    /// Change the decay time constant (ms).
    pub fn set_decay_time(&mut self, decay_milliseconds: f32) {
        self.natural_frequency =
            1.0 / decay_milliseconds.max(MIN_DECAY_MILLISECONDS);
    }

    /// Current velocity in units per millisecond.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Drop any accumulated velocity.
    pub fn reset(&mut self) {
        self.velocity = 0.0;
    }

    /// Advance `x` toward `goal` over `delta_ms` milliseconds.
    ///
    /// `normalization` is the characteristic scale of the quantity; the
    /// value snaps onto the goal once its speed falls below a fraction of
    /// that scale. A zero normalization, or a value already resting at its
    /// goal, returns the goal immediately. Negative time steps leave `x`
    /// unchanged.
    pub fn update(
        &mut self,
        x: f32,
        goal: f32,
        delta_ms: f32,
        normalization: f32,
    ) -> f32 {
        if normalization == 0.0 || !x.is_finite() {
            self.velocity = 0.0;
            return goal;
        }
        if x == goal && self.velocity == 0.0 {
            return goal;
        }
        if delta_ms < 0.0 {
            return x;
        }

        let w = self.natural_frequency;
        let nil_speed = NIL_SPEED_FACTOR * w;

        // x(t) = (dx + (v0 + w dx) t) e^{-wt}
        let dx = x - goal;
        let intermediate_velocity = self.velocity + w * dx;
        let intermediate_x = dx + delta_ms * intermediate_velocity;
        let decay = (-w * delta_ms).exp();
        let new_velocity = (intermediate_velocity - w * intermediate_x) * decay;
        let acceleration = -w * (new_velocity + intermediate_velocity * decay);

        if new_velocity.abs() < nil_speed * normalization.abs()
            && acceleration * dx >= 0.0
        {
            self.velocity = 0.0;
            goal
        } else {
            self.velocity = new_velocity;
            goal + intermediate_x * decay
        }
    }
}
