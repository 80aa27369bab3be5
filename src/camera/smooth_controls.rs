//! Damped orbit camera controller.
//!
//! [`SmoothControls`] holds two copies of the camera state: the *goal*
//! (where the camera should end up) and the *current* state (where it is
//! this frame). Goals are written either programmatically (`set_orbit`,
//! `set_target`, `set_field_of_view`) or by user input; once per frame
//! [`SmoothControls::update`] moves every axis toward its goal with a
//! critically damped spring and records a [`ChangeEvent`] tagged with the
//! cause of the motion.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::core::Camera;
use super::spherical::SphericalPosition;
use crate::input::{InputEvent, Key};
use crate::util::damper::{Damper, DECAY_MILLISECONDS};

/// Default vertical field of view in degrees.
pub const DEFAULT_FIELD_OF_VIEW: f32 = 45.0;

/// Azimuth/polar step for one arrow-key press.
const KEYBOARD_ORBIT_STEP: f32 = PI / 8.0;

/// Exponential zoom rate per wheel notch.
const ZOOM_RATE: f32 = 0.1;

/// Who caused a camera change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    /// Pointer, wheel, or keyboard input.
    UserInteraction,
    /// Programmatic goal changes, re-framing, jumps.
    None,
}

impl ChangeSource {
    /// Attribute-style name (`"user-interaction"` / `"none"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserInteraction => "user-interaction",
            Self::None => "none",
        }
    }
}

/// Notification that the current camera state moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Cause of the change.
    pub source: ChangeSource,
}

/// When user input is allowed to move the camera.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionPolicy {
    /// Input always moves the camera.
    #[default]
    AlwaysAllow,
    /// Input is ignored unless the viewer holds focus.
    AllowWhenFocused,
}

impl InteractionPolicy {
    /// Parse the `interaction-policy` attribute value.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "always-allow" => Some(Self::AlwaysAllow),
            "allow-when-focused" => Some(Self::AllowWhenFocused),
            _ => None,
        }
    }
}

/// Constraints and tuning for [`SmoothControls`]. Angles are radians,
/// fields of view are degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothControlsOptions {
    /// Closest allowed orbit radius.
    pub minimum_radius: f32,
    /// Farthest allowed orbit radius.
    pub maximum_radius: f32,
    /// Smallest polar angle (looking down from above).
    pub minimum_polar_angle: f32,
    /// Largest polar angle (looking up from below).
    pub maximum_polar_angle: f32,
    /// Smallest azimuth; `-inf` leaves azimuth unbounded.
    pub minimum_azimuthal_angle: f32,
    /// Largest azimuth; `+inf` leaves azimuth unbounded.
    pub maximum_azimuthal_angle: f32,
    /// Narrowest field of view.
    pub minimum_field_of_view: f32,
    /// Widest field of view.
    pub maximum_field_of_view: f32,
    /// Input gating policy.
    pub interaction_policy: InteractionPolicy,
    /// Drag-to-orbit multiplier.
    pub orbit_sensitivity: f32,
    /// Wheel/keyboard zoom multiplier.
    pub zoom_sensitivity: f32,
    /// Damping time constant in milliseconds.
    pub decay_milliseconds: f32,
}

impl Default for SmoothControlsOptions {
    fn default() -> Self {
        Self {
            minimum_radius: 0.0,
            maximum_radius: f32::INFINITY,
            minimum_polar_angle: PI / 8.0,
            maximum_polar_angle: PI - PI / 8.0,
            minimum_azimuthal_angle: f32::NEG_INFINITY,
            maximum_azimuthal_angle: f32::INFINITY,
            minimum_field_of_view: 10.0,
            maximum_field_of_view: DEFAULT_FIELD_OF_VIEW,
            interaction_policy: InteractionPolicy::AlwaysAllow,
            orbit_sensitivity: 1.0,
            zoom_sensitivity: 1.0,
            decay_milliseconds: DECAY_MILLISECONDS,
        }
    }
}

/// Partial update for [`SmoothControlsOptions`]; `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptionsPatch {
    /// New minimum radius.
    pub minimum_radius: Option<f32>,
    /// New maximum radius.
    pub maximum_radius: Option<f32>,
    /// New minimum polar angle.
    pub minimum_polar_angle: Option<f32>,
    /// New maximum polar angle.
    pub maximum_polar_angle: Option<f32>,
    /// New minimum azimuth.
    pub minimum_azimuthal_angle: Option<f32>,
    /// New maximum azimuth.
    pub maximum_azimuthal_angle: Option<f32>,
    /// New minimum field of view.
    pub minimum_field_of_view: Option<f32>,
    /// New maximum field of view.
    pub maximum_field_of_view: Option<f32>,
    /// New input policy.
    pub interaction_policy: Option<InteractionPolicy>,
    /// New drag sensitivity.
    pub orbit_sensitivity: Option<f32>,
    /// New zoom sensitivity.
    pub zoom_sensitivity: Option<f32>,
    /// New damping time constant.
    pub decay_milliseconds: Option<f32>,
}

/// Damped orbit controller around a movable target.
pub struct SmoothControls {
    options: SmoothControlsOptions,

    spherical: SphericalPosition,
    goal_spherical: SphericalPosition,
    target: Vec3,
    goal_target: Vec3,
    fov: f32,
    goal_fov: f32,

    theta_damper: Damper,
    phi_damper: Damper,
    radius_damper: Damper,
    fov_damper: Damper,
    target_dampers: [Damper; 3],

    near: f32,
    far: f32,
    aspect: f32,

    interaction_enabled: bool,
    focused: bool,
    pointer: Option<Vec2>,
    viewport_height: f32,

    user_change: bool,
    events: Vec<ChangeEvent>,
}

impl Default for SmoothControls {
    fn default() -> Self {
        Self::new(SmoothControlsOptions::default())
    }
}

impl SmoothControls {
    /// Create a controller resting at the equator, one unit from the origin.
    #[must_use]
    pub fn new(options: SmoothControlsOptions) -> Self {
        let damper = Damper::new(options.decay_milliseconds);
        let spherical = SphericalPosition::new(0.0, PI / 2.0, 1.0);
        Self {
            options,
            spherical,
            goal_spherical: spherical,
            target: Vec3::ZERO,
            goal_target: Vec3::ZERO,
            fov: DEFAULT_FIELD_OF_VIEW,
            goal_fov: DEFAULT_FIELD_OF_VIEW,
            theta_damper: damper,
            phi_damper: damper,
            radius_damper: damper,
            fov_damper: damper,
            target_dampers: [damper; 3],
            near: 0.01,
            far: 100.0,
            aspect: 1.0,
            interaction_enabled: false,
            focused: false,
            pointer: None,
            viewport_height: 1.0,
            user_change: false,
            events: Vec::new(),
        }
    }

    /// Current constraints and tuning.
    #[must_use]
    pub fn options(&self) -> &SmoothControlsOptions {
        &self.options
    }

    /// Merge `patch` into the options and re-clamp the goals to the new
    /// constraints.
    pub fn apply_options(&mut self, patch: OptionsPatch) {
        let o = &mut self.options;
        o.minimum_radius = patch.minimum_radius.unwrap_or(o.minimum_radius);
        o.maximum_radius = patch.maximum_radius.unwrap_or(o.maximum_radius);
        o.minimum_polar_angle =
            patch.minimum_polar_angle.unwrap_or(o.minimum_polar_angle);
        o.maximum_polar_angle =
            patch.maximum_polar_angle.unwrap_or(o.maximum_polar_angle);
        o.minimum_azimuthal_angle = patch
            .minimum_azimuthal_angle
            .unwrap_or(o.minimum_azimuthal_angle);
        o.maximum_azimuthal_angle = patch
            .maximum_azimuthal_angle
            .unwrap_or(o.maximum_azimuthal_angle);
        o.minimum_field_of_view =
            patch.minimum_field_of_view.unwrap_or(o.minimum_field_of_view);
        o.maximum_field_of_view =
            patch.maximum_field_of_view.unwrap_or(o.maximum_field_of_view);
        o.interaction_policy =
            patch.interaction_policy.unwrap_or(o.interaction_policy);
        o.orbit_sensitivity =
            patch.orbit_sensitivity.unwrap_or(o.orbit_sensitivity);
        o.zoom_sensitivity =
            patch.zoom_sensitivity.unwrap_or(o.zoom_sensitivity);
        o.decay_milliseconds =
            patch.decay_milliseconds.unwrap_or(o.decay_milliseconds);

        if let Some(decay) = patch.decay_milliseconds {
            for damper in self.dampers_mut() {
                damper.set_decay_time(decay);
            }
        }

        let goal = self.goal_spherical;
        let _ = self.set_orbit_goal(goal.theta, goal.phi, goal.radius);
        let _ = self.set_fov_goal(self.goal_fov);
    }

    /// Set the orbit goal programmatically. Non-finite components keep their
    /// previous goal. Returns `true` if the goal changed.
    pub fn set_orbit(&mut self, theta: f32, phi: f32, radius: f32) -> bool {
        self.user_change = false;
        self.set_orbit_goal(theta, phi, radius)
    }

    /// Set the target goal programmatically. Returns `true` if it changed.
    pub fn set_target(&mut self, target: Vec3) -> bool {
        self.user_change = false;
        if !target.is_finite() || target == self.goal_target {
            return false;
        }
        self.goal_target = target;
        true
    }

    /// Set the field-of-view goal (degrees) programmatically. Returns `true`
    /// if it changed.
    pub fn set_field_of_view(&mut self, degrees: f32) -> bool {
        self.user_change = false;
        self.set_fov_goal(degrees)
    }

    /// Current (animated) field of view in degrees.
    #[must_use]
    pub fn field_of_view(&self) -> f32 {
        self.fov
    }

    /// Field-of-view goal in degrees.
    #[must_use]
    pub fn goal_field_of_view(&self) -> f32 {
        self.goal_fov
    }

    /// Current (animated) target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Target goal.
    #[must_use]
    pub fn goal_target(&self) -> Vec3 {
        self.goal_target
    }

    /// Current (animated) spherical position.
    #[must_use]
    pub fn camera_spherical(&self) -> SphericalPosition {
        self.spherical
    }

    /// Orbit goal.
    #[must_use]
    pub fn goal_spherical(&self) -> SphericalPosition {
        self.goal_spherical
    }

    /// Update projection intrinsics written by [`Self::apply_to_camera`].
    pub fn update_intrinsics(&mut self, near: f32, far: f32, aspect: f32) {
        self.near = near;
        self.far = far;
        self.aspect = aspect;
    }

    /// Viewport size in CSS pixels; drags are scaled by its height.
    pub fn set_viewport_size(&mut self, _width: f32, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    /// Snap the current state onto the goal with no animation.
    pub fn jump_to_goal(&mut self) {
        self.spherical = self.goal_spherical;
        self.target = self.goal_target;
        self.fov = self.goal_fov;
        for damper in self.dampers_mut() {
            damper.reset();
        }
        self.emit_change();
    }

    /// Whether every axis rests on its goal.
    #[must_use]
    pub fn is_at_goal(&self) -> bool {
        self.spherical == self.goal_spherical
            && self.target == self.goal_target
            && self.fov == self.goal_fov
    }

    /// Advance every axis toward its goal by `delta_ms` milliseconds and
    /// record a change event if anything moved.
    pub fn update(&mut self, _time: f64, delta_ms: f32) {
        if self.is_at_goal() {
            return;
        }

        if self.azimuth_unbounded() {
            // Travel the short way around.
            let goal = self.goal_spherical.theta;
            let diff = (goal - self.spherical.theta + PI).rem_euclid(TAU) - PI;
            self.spherical.theta = goal - diff;
        }

        let goal = self.goal_spherical;
        let radius_scale = if self.options.maximum_radius.is_finite() {
            self.options.maximum_radius
        } else {
            goal.radius.max(1.0)
        };

        self.spherical.theta = self.theta_damper.update(
            self.spherical.theta,
            goal.theta,
            delta_ms,
            PI,
        );
        self.spherical.phi =
            self.phi_damper
                .update(self.spherical.phi, goal.phi, delta_ms, PI);
        self.spherical.radius = self.radius_damper.update(
            self.spherical.radius,
            goal.radius,
            delta_ms,
            radius_scale,
        );
        self.fov = self.fov_damper.update(
            self.fov,
            self.goal_fov,
            delta_ms,
            self.options.maximum_field_of_view,
        );

        let mut target = self.target.to_array();
        let goal_target = self.goal_target.to_array();
        for ((value, goal), damper) in target
            .iter_mut()
            .zip(goal_target)
            .zip(self.target_dampers.iter_mut())
        {
            *value = damper.update(*value, goal, delta_ms, radius_scale);
        }
        self.target = Vec3::from_array(target);

        self.emit_change();
    }

    /// Allow user input to move the camera.
    pub fn enable_interaction(&mut self) {
        self.interaction_enabled = true;
    }

    /// Ignore user input; an in-progress drag is dropped.
    pub fn disable_interaction(&mut self) {
        self.interaction_enabled = false;
        self.pointer = None;
    }

    /// Whether user input is currently enabled.
    #[must_use]
    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Whether the controller believes its element holds focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Feed one input event. Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Focus => {
                self.focused = true;
                false
            }
            InputEvent::Blur => {
                self.focused = false;
                self.pointer = None;
                false
            }
            _ if !self.can_interact() => false,
            InputEvent::PointerDown { x, y } => {
                self.pointer = Some(Vec2::new(x, y));
                true
            }
            InputEvent::PointerMove { x, y } => {
                let Some(last) = self.pointer else {
                    return false;
                };
                let position = Vec2::new(x, y);
                self.pointer = Some(position);
                self.orbit_by_pixels(position - last)
            }
            InputEvent::PointerUp => self.pointer.take().is_some(),
            InputEvent::Wheel { delta } => self.user_zoom(delta),
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    /// Drain change events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Write the current state into a perspective camera.
    pub fn apply_to_camera(&self, camera: &mut Camera) {
        camera.target = self.target;
        camera.eye = self.target + self.spherical.to_offset();
        camera.up = Vec3::Y;
        camera.fovy = self.fov;
        camera.znear = self.near;
        camera.zfar = self.far;
        camera.aspect = self.aspect;
    }

    fn can_interact(&self) -> bool {
        self.interaction_enabled
            && (self.options.interaction_policy
                == InteractionPolicy::AlwaysAllow
                || self.focused)
    }

    fn azimuth_unbounded(&self) -> bool {
        self.options.minimum_azimuthal_angle == f32::NEG_INFINITY
            && self.options.maximum_azimuthal_angle == f32::INFINITY
    }

    fn dampers_mut(&mut self) -> impl Iterator<Item = &mut Damper> {
        [
            &mut self.theta_damper,
            &mut self.phi_damper,
            &mut self.radius_damper,
            &mut self.fov_damper,
        ]
        .into_iter()
        .chain(self.target_dampers.iter_mut())
    }

    fn emit_change(&mut self) {
        let source = if self.user_change {
            ChangeSource::UserInteraction
        } else {
            ChangeSource::None
        };
        self.events.push(ChangeEvent { source });
    }

    fn set_orbit_goal(&mut self, theta: f32, phi: f32, radius: f32) -> bool {
        let o = &self.options;
        let current = self.goal_spherical;
        let pick = |value: f32, fallback: f32| {
            if value.is_finite() {
                value
            } else {
                fallback
            }
        };
        let next = SphericalPosition::new(
            clamp(
                pick(theta, current.theta),
                o.minimum_azimuthal_angle,
                o.maximum_azimuthal_angle,
            ),
            clamp(
                pick(phi, current.phi),
                o.minimum_polar_angle,
                o.maximum_polar_angle,
            ),
            clamp(
                pick(radius, current.radius),
                o.minimum_radius,
                o.maximum_radius,
            ),
        );
        if next == current {
            return false;
        }
        self.goal_spherical = next;
        true
    }

    fn set_fov_goal(&mut self, degrees: f32) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        let next = clamp(
            degrees,
            self.options.minimum_field_of_view,
            self.options.maximum_field_of_view,
        );
        if next == self.goal_fov {
            return false;
        }
        self.goal_fov = next;
        true
    }

    fn user_adjust_orbit(&mut self, d_theta: f32, d_phi: f32) -> bool {
        self.user_change = true;
        let goal = self.goal_spherical;
        self.set_orbit_goal(goal.theta + d_theta, goal.phi + d_phi, goal.radius)
    }

    fn orbit_by_pixels(&mut self, delta: Vec2) -> bool {
        let scale = TAU * self.options.orbit_sensitivity / self.viewport_height;
        self.user_adjust_orbit(-delta.x * scale, -delta.y * scale)
    }

    /// Zoom by `notches` (positive = in). Zooming in spends the radius range
    /// first and then narrows the field of view; zooming out widens the
    /// field of view back to its maximum before pulling the radius out.
    fn user_zoom(&mut self, notches: f32) -> bool {
        if notches == 0.0 || !notches.is_finite() {
            return false;
        }
        self.user_change = true;
        let factor = (-notches * ZOOM_RATE * self.options.zoom_sensitivity).exp();
        let goal = self.goal_spherical;
        let min_radius = self.options.minimum_radius;
        let max_fov = self.options.maximum_field_of_view;

        if factor < 1.0 {
            let desired = goal.radius * factor;
            if desired >= min_radius {
                return self.set_orbit_goal(goal.theta, goal.phi, desired);
            }
            let leftover = if min_radius > 0.0 {
                desired / min_radius
            } else {
                factor
            };
            let radius_changed =
                self.set_orbit_goal(goal.theta, goal.phi, min_radius);
            let fov_changed = self.set_fov_goal(self.goal_fov * leftover);
            return radius_changed || fov_changed;
        }

        if self.goal_fov < max_fov {
            let desired = self.goal_fov * factor;
            if desired <= max_fov {
                return self.set_fov_goal(desired);
            }
            let leftover = desired / max_fov;
            let fov_changed = self.set_fov_goal(max_fov);
            let radius_changed = self.set_orbit_goal(
                goal.theta,
                goal.phi,
                goal.radius * leftover,
            );
            return fov_changed || radius_changed;
        }

        self.set_orbit_goal(goal.theta, goal.phi, goal.radius * factor)
    }

    fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::ArrowLeft => self.user_adjust_orbit(-KEYBOARD_ORBIT_STEP, 0.0),
            Key::ArrowRight => self.user_adjust_orbit(KEYBOARD_ORBIT_STEP, 0.0),
            Key::ArrowUp => self.user_adjust_orbit(0.0, -KEYBOARD_ORBIT_STEP),
            Key::ArrowDown => self.user_adjust_orbit(0.0, KEYBOARD_ORBIT_STEP),
            Key::PageUp => self.user_zoom(1.0),
            Key::PageDown => self.user_zoom(-1.0),
        }
    }
}

/// `f32::clamp` without the `min <= max` panic; an inverted range pins to
/// `min`.
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max.max(min))
}
