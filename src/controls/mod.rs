//! Controls orchestrator.
//!
//! [`StageControls`] binds the declarative camera attributes to a live
//! [`SmoothControls`] controller and a [`ModelScene`]. It owns the attribute
//! table, resolves `auto` values against the current model, re-frames the
//! camera when the model or viewport changes, drives the controller once per
//! frame, and runs the interaction prompt and accessibility label alongside.
//!
//! Typical frame loop:
//!
//! ```ignore
//! controls.set_attribute("camera-controls", "");
//! controls.model_loaded(&scene, now);
//! loop {
//!     for event in pending_input() {
//!         let _ = controls.handle_input(event);
//!     }
//!     controls.tick(&mut scene, now, delta);
//!     for change in controls.take_camera_change_events() { /* ... */ }
//! }
//! ```

pub mod a11y;
pub mod attributes;
pub mod deferred;
pub mod prompt;

use std::f32::consts::PI;

use glam::Vec3;

pub use self::a11y::AriaLabel;
pub use self::attributes::{Attribute, AttributeStore};
pub use self::deferred::{DeferredQueue, DeferredTask};
pub use self::prompt::{
    InteractionPrompt, InteractionPromptStrategy, PromptState, PROMPT_LABEL,
};
use crate::camera::{
    ChangeEvent, ChangeSource, InteractionPolicy, OptionsPatch, SmoothControls,
    SphericalPosition,
};
use crate::input::InputEvent;
use crate::options::Options;
use crate::scene::ModelScene;
use crate::util::units::{
    angle_to_degrees, angle_to_radians, length_to_meters, NumberNode, Unit,
    ValueNode,
};

/// Polar angle used when `camera-orbit` leaves phi as `auto`.
const DEFAULT_POLAR_ANGLE: f32 = 75.0 * PI / 180.0;
/// Radius (percent of ideal distance) used when `camera-orbit` leaves the
/// radius as `auto`.
const DEFAULT_RADIUS_PERCENT: f32 = 105.0;
/// Polar limits used when `min-camera-orbit` / `max-camera-orbit` leave phi
/// as `auto`.
const DEFAULT_MIN_POLAR_ANGLE: f32 = PI / 8.0;
const DEFAULT_MAX_POLAR_ANGLE: f32 = PI - PI / 8.0;
/// `max-camera-orbit` radius when `auto`, as a multiple of the ideal
/// distance.
const MAX_RADIUS_FACTOR: f32 = 2.0;
/// Narrowest field of view when `min-field-of-view` is `auto`.
const DEFAULT_MIN_FIELD_OF_VIEW: f32 = 25.0;
/// Ratio of far to near clip plane.
const NEAR_FAR_RATIO: f32 = 1000.0;
/// Pivot yaw (radians) per pixel of prompt-graphic offset.
const PROMPT_NUDGE_RADIANS_PER_PIXEL: f32 = 0.001;

/// Camera controls for one viewer.
pub struct StageControls {
    controller: SmoothControls,
    attributes: AttributeStore,
    prompt: InteractionPrompt,
    aria: AriaLabel,
    deferred: DeferredQueue,
    camera_controls: bool,
    last_framed_fov: Option<f32>,
    nudged: bool,
    change_events: Vec<ChangeEvent>,
}

impl Default for StageControls {
    fn default() -> Self {
        Self::new()
    }
}

impl StageControls {
    /// Controls with every attribute at its default. Nothing is applied to
    /// the controller until the first [`Self::apply_changes`] or
    /// [`Self::model_loaded`].
    #[must_use]
    pub fn new() -> Self {
        let controller = SmoothControls::default();
        let aria = AriaLabel::new(controller.camera_spherical());
        Self {
            controller,
            attributes: AttributeStore::new(),
            prompt: InteractionPrompt::default(),
            aria,
            deferred: DeferredQueue::default(),
            camera_controls: false,
            last_framed_fov: None,
            nudged: false,
            change_events: Vec::new(),
        }
    }

    /// Controls configured from loaded options: controller tuning from
    /// `[camera]` and attribute values from `[controls]`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let mut controls = Self::new();
        controls.controller.apply_options(options.camera.to_patch());
        for (attribute, value) in options.controls.attributes() {
            let _ = controls.set_attribute(attribute.name(), &value);
        }
        controls
    }

    // ── Attributes ──────────────────────────────────────────────────────

    /// Set a declarative attribute by name. Takes effect on the next
    /// [`Self::apply_changes`] (or tick). Returns `true` if the value
    /// changed.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        self.attributes.set(name, value)
    }

    /// Remove an attribute so its default applies again.
    pub fn remove_attribute(&mut self, attribute: Attribute) {
        self.attributes.remove(attribute);
    }

    /// Raw value of an attribute (the default if unset).
    #[must_use]
    pub fn attribute(&self, attribute: Attribute) -> &str {
        self.attributes.get(attribute)
    }

    /// Apply every attribute changed since the last pass. Limits are
    /// applied before goals so the new goals clamp against them.
    pub fn apply_changes<S: ModelScene>(&mut self, scene: &S) {
        let dirty = self.attributes.take_dirty();
        if dirty.is_empty() {
            return;
        }

        let mut bounds_changed = false;
        for attribute in &dirty {
            match attribute {
                Attribute::CameraControls => self.sync_camera_controls(),
                Attribute::InteractionPolicy => self.sync_interaction_policy(),
                Attribute::InteractionPrompt => self.sync_prompt_strategy(),
                Attribute::InteractionPromptThreshold => {
                    self.prompt.set_threshold(self.attributes.prompt_threshold());
                }
                Attribute::MinCameraOrbit
                | Attribute::MaxCameraOrbit
                | Attribute::MinFieldOfView
                | Attribute::MaxFieldOfView => bounds_changed = true,
                Attribute::CameraOrbit
                | Attribute::CameraTarget
                | Attribute::FieldOfView => {}
            }
        }
        if bounds_changed {
            self.apply_bounds(scene);
            self.jump_camera_to_goal();
        }

        for attribute in dirty {
            match attribute {
                Attribute::CameraOrbit => self.sync_orbit(scene),
                Attribute::CameraTarget => self.sync_target(scene),
                Attribute::FieldOfView => self.sync_field_of_view(scene, 1.0),
                _ => {}
            }
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// A new model was loaded into `scene` at `now` (ms). Resolves every
    /// goal against the new model, re-frames, and restarts the prompt.
    pub fn model_loaded<S: ModelScene>(&mut self, scene: &S, now: f64) {
        self.apply_changes(scene);
        self.apply_bounds(scene);
        self.sync_orbit(scene);
        self.sync_target(scene);
        self.update_framing(scene);
        self.prompt.source_changed(now);
        if !self.camera_controls {
            self.prompt.controls_disabled();
        }
    }

    /// The viewport was resized.
    pub fn resize<S: ModelScene>(&mut self, scene: &S) {
        self.update_framing(scene);
    }

    /// Request that the camera snap onto its goal. Runs at the start of the
    /// next tick.
    pub fn jump_camera_to_goal(&mut self) {
        self.deferred.push(DeferredTask::JumpToGoal);
    }

    /// Re-derive radius/clip/field-of-view framing from the model and snap
    /// the camera onto its goal.
    ///
    /// With `field-of-view="auto"` the current zoom relative to the old
    /// framed field of view is carried over to the new one.
    pub fn update_framing<S: ModelScene>(&mut self, scene: &S) {
        let framed = scene.framed_field_of_view();
        let zoom = match self.last_framed_fov {
            Some(previous) if previous > 0.0 => {
                self.controller.field_of_view() / previous
            }
            _ => 1.0,
        };
        self.apply_bounds(scene);
        self.sync_field_of_view(scene, zoom);
        self.last_framed_fov = Some(framed);
        self.controller.jump_to_goal();
        self.deferred.cancel(DeferredTask::JumpToGoal);
        log::debug!(
            "reframed: ideal distance {:.3}, framed fov {framed:.2}, zoom {zoom:.3}",
            scene.ideal_camera_distance()
        );
    }

    // ── Input ───────────────────────────────────────────────────────────

    /// Feed one normalized input event. Returns `true` if the controller
    /// consumed it.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Focus => {
                if self.camera_controls {
                    self.prompt.focus();
                }
                self.aria.focus();
            }
            InputEvent::Blur => self.prompt.blur(),
            _ => {}
        }
        self.controller.handle_event(event)
    }

    // ── Frame ───────────────────────────────────────────────────────────

    /// Advance one frame. `time` and `delta` are milliseconds.
    ///
    /// Requests deferred during the previous frame run first, then pending
    /// attribute changes are applied.
    pub fn tick<S: ModelScene>(
        &mut self,
        scene: &mut S,
        time: f64,
        delta: f32,
    ) {
        for task in self.deferred.drain() {
            match task {
                DeferredTask::JumpToGoal => self.controller.jump_to_goal(),
            }
        }
        self.apply_changes(scene);

        if self.prompt.tick(time) {
            self.aria.show_prompt(PROMPT_LABEL);
        }

        if self.prompt.is_visible() {
            let rect = scene.canvas_rect();
            let offset = self.prompt.graphic_offset(time, rect.width);
            let yaw = scene.yaw();
            scene.set_pivot_rotation(
                yaw - PROMPT_NUDGE_RADIANS_PER_PIXEL * offset,
            );
            self.nudged = true;
        } else if self.nudged {
            let yaw = scene.yaw();
            scene.set_yaw(yaw);
            self.nudged = false;
        }

        self.controller.update(time, delta);

        let target = self.controller.target();
        if target != scene.pivot_center() {
            scene.set_pivot_center(target);
            let yaw = scene.yaw();
            scene.set_yaw(yaw);
        }
        self.controller.apply_to_camera(scene.active_camera());

        let focused = self.controller.is_focused();
        for event in self.controller.take_events() {
            if event.source == ChangeSource::UserInteraction {
                self.prompt.user_interacted();
            }
            let _ = self
                .aria
                .camera_changed(self.controller.camera_spherical(), focused);
            self.change_events.push(event);
        }
    }

    /// Drain camera-change notifications emitted since the last call.
    pub fn take_camera_change_events(&mut self) -> Vec<ChangeEvent> {
        std::mem::take(&mut self.change_events)
    }

    // ── Getters ─────────────────────────────────────────────────────────

    /// Current (animated) orbit.
    #[must_use]
    pub fn camera_orbit(&self) -> SphericalPosition {
        self.controller.camera_spherical()
    }

    /// Orbit goal.
    #[must_use]
    pub fn goal_camera_orbit(&self) -> SphericalPosition {
        self.controller.goal_spherical()
    }

    /// Current (animated) target.
    #[must_use]
    pub fn camera_target(&self) -> Vec3 {
        self.controller.target()
    }

    /// Current (animated) field of view in degrees.
    #[must_use]
    pub fn field_of_view(&self) -> f32 {
        self.controller.field_of_view()
    }

    /// Whether user input currently moves the camera.
    #[must_use]
    pub fn camera_controls_enabled(&self) -> bool {
        self.camera_controls
    }

    /// Interaction prompt state.
    #[must_use]
    pub fn prompt(&self) -> &InteractionPrompt {
        &self.prompt
    }

    /// Label currently exposed to assistive technology.
    #[must_use]
    pub fn aria_label(&self) -> &str {
        self.aria.shown()
    }

    /// The underlying controller.
    #[must_use]
    pub fn controller(&self) -> &SmoothControls {
        &self.controller
    }

    // ── Attribute application ───────────────────────────────────────────

    fn sync_camera_controls(&mut self) {
        let enabled = self.attributes.camera_controls();
        if enabled == self.camera_controls {
            return;
        }
        self.camera_controls = enabled;
        if enabled {
            self.controller.enable_interaction();
            self.prompt.controls_enabled();
        } else {
            self.controller.disable_interaction();
            self.prompt.controls_disabled();
        }
    }

    fn sync_interaction_policy(&mut self) {
        let value = self.attributes.get(Attribute::InteractionPolicy);
        let policy = InteractionPolicy::from_attribute(value).unwrap_or_else(|| {
            log::warn!("interaction-policy: unknown value '{value}'");
            InteractionPolicy::default()
        });
        self.controller.apply_options(OptionsPatch {
            interaction_policy: Some(policy),
            ..OptionsPatch::default()
        });
    }

    fn sync_prompt_strategy(&mut self) {
        let value = self.attributes.get(Attribute::InteractionPrompt);
        let strategy = InteractionPromptStrategy::from_attribute(value)
            .unwrap_or_else(|| {
                log::warn!("interaction-prompt: unknown value '{value}'");
                InteractionPromptStrategy::default()
            });
        self.prompt.set_strategy(strategy);
    }

    fn sync_orbit<S: ModelScene>(&mut self, scene: &S) {
        let ideal = scene.ideal_camera_distance();
        let [theta, phi, radius] = self.attributes.orbit(Attribute::CameraOrbit);
        let theta = resolve_angle(theta, 0.0);
        let phi = resolve_angle(phi, DEFAULT_POLAR_ANGLE);
        let radius = resolve_radius(radius, ideal, DEFAULT_RADIUS_PERCENT / 100.0);
        let _ = self.controller.set_orbit(theta, phi, radius);
    }

    fn sync_target<S: ModelScene>(&mut self, scene: &S) {
        let center = scene.bounding_box_center();
        let [x, y, z] = self.attributes.target();
        let target = Vec3::new(
            resolve_length(x, center.x),
            resolve_length(y, center.y),
            resolve_length(z, center.z),
        );
        let _ = self.controller.set_target(target);
    }

    /// Push the field-of-view goal. For `auto`, the framed field of view is
    /// scaled by `zoom`.
    fn sync_field_of_view<S: ModelScene>(&mut self, scene: &S, zoom: f32) {
        let degrees =
            match self.attributes.field_of_view(Attribute::FieldOfView) {
                ValueNode::Auto => scene.framed_field_of_view() * zoom,
                ValueNode::Number(node) => angle_to_degrees(node),
            };
        let _ = self.controller.set_field_of_view(degrees);
    }

    /// Push radius, polar, azimuth and field-of-view limits plus clip planes
    /// derived from the model.
    fn apply_bounds<S: ModelScene>(&mut self, scene: &S) {
        let ideal = scene.ideal_camera_distance();
        let framed = scene.framed_field_of_view();
        let [min_theta, min_phi, min_radius] =
            self.attributes.orbit(Attribute::MinCameraOrbit);
        let [max_theta, max_phi, max_radius] =
            self.attributes.orbit(Attribute::MaxCameraOrbit);

        let minimum_radius = resolve_radius(min_radius, ideal, 1.0);
        let maximum_radius = resolve_radius(max_radius, ideal, MAX_RADIUS_FACTOR);
        let minimum_field_of_view = resolve_degrees(
            self.attributes.field_of_view(Attribute::MinFieldOfView),
            DEFAULT_MIN_FIELD_OF_VIEW,
        );
        let maximum_field_of_view = resolve_degrees(
            self.attributes.field_of_view(Attribute::MaxFieldOfView),
            framed,
        );

        self.controller.apply_options(OptionsPatch {
            minimum_radius: Some(minimum_radius),
            maximum_radius: Some(maximum_radius),
            minimum_polar_angle: Some(resolve_angle(
                min_phi,
                DEFAULT_MIN_POLAR_ANGLE,
            )),
            maximum_polar_angle: Some(resolve_angle(
                max_phi,
                DEFAULT_MAX_POLAR_ANGLE,
            )),
            minimum_azimuthal_angle: Some(resolve_angle(
                min_theta,
                f32::NEG_INFINITY,
            )),
            maximum_azimuthal_angle: Some(resolve_angle(max_theta, f32::INFINITY)),
            minimum_field_of_view: Some(minimum_field_of_view),
            maximum_field_of_view: Some(maximum_field_of_view),
            ..OptionsPatch::default()
        });

        let far = 2.0 * (maximum_radius.max(minimum_radius) + ideal);
        self.controller
            .update_intrinsics(far / NEAR_FAR_RATIO, far, scene.aspect());
        let rect = scene.canvas_rect();
        self.controller.set_viewport_size(rect.width, rect.height);
    }
}

fn resolve_angle(value: ValueNode, auto: f32) -> f32 {
    match value {
        ValueNode::Auto => auto,
        ValueNode::Number(node) => angle_to_radians(as_degrees_if_bare(node)),
    }
}

fn resolve_degrees(value: ValueNode, auto: f32) -> f32 {
    match value {
        ValueNode::Auto => auto,
        ValueNode::Number(node) => angle_to_degrees(node),
    }
}

fn resolve_length(value: ValueNode, auto: f32) -> f32 {
    match value {
        ValueNode::Auto => auto,
        ValueNode::Number(node) => length_to_meters(node),
    }
}

/// Radius in meters; percentages (and `auto`, via `auto_factor`) are
/// relative to the ideal camera distance.
fn resolve_radius(value: ValueNode, ideal: f32, auto_factor: f32) -> f32 {
    match value {
        ValueNode::Auto => ideal * auto_factor,
        ValueNode::Number(NumberNode {
            number,
            unit: Unit::Percent,
        }) => ideal * number / 100.0,
        ValueNode::Number(node) => length_to_meters(node),
    }
}

/// Bare numbers in orbit angle positions are degrees.
fn as_degrees_if_bare(node: NumberNode) -> NumberNode {
    if node.unit == Unit::None {
        NumberNode::new(node.number, Unit::Degrees)
    } else {
        node
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::input::Key;
    use crate::scene::{Aabb, StageScene};

    const FRAME_MS: f32 = 16.0;

    fn scene() -> StageScene {
        StageScene::new(
            Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0)),
            800.0,
            600.0,
        )
    }

    fn loaded(scene: &StageScene) -> StageControls {
        let mut controls = StageControls::new();
        let _ = controls.set_attribute("camera-controls", "");
        controls.model_loaded(scene, 0.0);
        controls
    }

    fn run(
        controls: &mut StageControls,
        scene: &mut StageScene,
        from: f64,
        frames: u32,
    ) -> f64 {
        let mut time = from;
        for _ in 0..frames {
            time += f64::from(FRAME_MS);
            controls.tick(scene, time, FRAME_MS);
        }
        time
    }

    #[test]
    fn default_orbit_round_trip() {
        let scene = scene();
        let controls = loaded(&scene);
        let goal = controls.goal_camera_orbit();
        assert_eq!(goal.theta, 0.0);
        assert!((goal.phi - 75.0_f32.to_radians()).abs() < 1e-6);
        assert!((goal.radius - 1.05 * scene.ideal_camera_distance()).abs() < 1e-4);
        assert_eq!(controls.camera_target(), scene.bounding_box_center());
    }

    #[test]
    fn model_load_jumps_immediately() {
        let scene = scene();
        let controls = loaded(&scene);
        assert!(controls.controller().is_at_goal());
        assert!((controls.field_of_view() - scene.framed_field_of_view()).abs() < 1e-4);
    }

    #[test]
    fn orbit_attribute_animates_toward_goal() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = controls.set_attribute("camera-orbit", "90deg 60deg 150%");
        let _ = run(&mut controls, &mut scene, 0.0, 1);
        let orbit = controls.camera_orbit();
        assert!(orbit.theta > 0.0 && orbit.theta < PI / 2.0);
        let _ = run(&mut controls, &mut scene, 16.0, 300);
        let orbit = controls.camera_orbit();
        assert!((orbit.theta - PI / 2.0).abs() < 1e-3);
        let radius = 1.5 * scene.ideal_camera_distance();
        assert!((orbit.radius - radius).abs() < 1e-3);
        let events = controls.take_camera_change_events();
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.source == ChangeSource::None));
    }

    #[test]
    fn camera_follows_target_and_pivot() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = controls.set_attribute("camera-target", "1m auto 50cm");
        let _ = run(&mut controls, &mut scene, 0.0, 300);
        let expected = Vec3::new(1.0, 1.0, 0.5);
        assert!((controls.camera_target() - expected).length() < 1e-3);
        assert!((scene.pivot_center() - expected).length() < 1e-3);
        assert!((scene.camera().target - expected).length() < 1e-3);
    }

    #[test]
    fn resize_preserves_relative_zoom() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let time = run(&mut controls, &mut scene, 0.0, 1);
        for _ in 0..3 {
            let _ = controls.handle_input(InputEvent::Key(Key::PageUp));
        }
        let _ = run(&mut controls, &mut scene, time, 300);
        let before = controls.field_of_view() / scene.framed_field_of_view();
        assert!(before < 1.0);

        scene.set_size(300.0, 600.0);
        controls.resize(&scene);
        let after = controls.field_of_view() / scene.framed_field_of_view();
        assert!((before - after).abs() < 1e-4, "{before} vs {after}");
    }

    #[test]
    fn explicit_field_of_view_is_not_rescaled() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = controls.set_attribute("field-of-view", "30deg");
        let _ = run(&mut controls, &mut scene, 0.0, 300);
        scene.set_size(300.0, 600.0);
        controls.resize(&scene);
        assert!((controls.field_of_view() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn prompt_appears_after_threshold() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = run(&mut controls, &mut scene, 0.0, 180);
        assert!(!controls.prompt().is_visible());
        let _ = run(&mut controls, &mut scene, 2880.0, 10);
        assert!(controls.prompt().is_visible());
        assert_eq!(controls.aria_label(), PROMPT_LABEL);
    }

    #[test]
    fn prompt_nudges_pivot_but_not_yaw() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = run(&mut controls, &mut scene, 0.0, 250);
        assert!(controls.prompt().is_visible());
        assert_eq!(scene.yaw(), 0.0);
        assert!(scene.pivot_rotation() != 0.0);
        assert_eq!(controls.goal_camera_orbit().theta, 0.0);
    }

    #[test]
    fn disabling_controls_while_prompt_visible_latches() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let time = run(&mut controls, &mut scene, 0.0, 250);
        assert!(controls.prompt().is_visible());

        let _ = controls.set_attribute("camera-controls", "false");
        let time = run(&mut controls, &mut scene, time, 1);
        assert!(!controls.prompt().is_visible());
        assert!(!controls.prompt().should_prompt());
        assert_eq!(scene.pivot_rotation(), scene.yaw());

        let _ = controls.set_attribute("camera-controls", "");
        let _ = run(&mut controls, &mut scene, time, 400);
        assert!(!controls.prompt().is_visible());
    }

    #[test]
    fn user_interaction_hides_prompt_for_good() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let time = run(&mut controls, &mut scene, 0.0, 250);
        assert!(controls.handle_input(InputEvent::Key(Key::ArrowLeft)));
        let time = run(&mut controls, &mut scene, time, 1);
        assert_eq!(controls.prompt().state(), PromptState::Suppressed);

        let _ = controls.handle_input(InputEvent::Blur);
        let _ = controls.handle_input(InputEvent::Focus);
        let time = run(&mut controls, &mut scene, time, 400);
        assert!(!controls.prompt().is_visible());

        controls.model_loaded(&scene, time);
        assert_eq!(controls.prompt().state(), PromptState::Waiting);
    }

    #[test]
    fn aria_label_tracks_orbit_while_focused() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = controls.handle_input(InputEvent::Focus);
        let _ = controls.set_attribute("camera-orbit", "180deg 75deg 105%");
        let _ = run(&mut controls, &mut scene, 0.0, 120);
        assert_eq!(controls.aria_label(), "View from stage back");
    }

    #[test]
    fn jump_request_is_deferred_to_next_tick() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = controls.set_attribute("camera-orbit", "45deg 75deg 105%");
        controls.apply_changes(&scene);
        controls.jump_camera_to_goal();
        assert!(!controls.controller().is_at_goal());
        controls.tick(&mut scene, 16.0, FRAME_MS);
        assert!(controls.controller().is_at_goal());
    }

    #[test]
    fn max_orbit_clamps_goal() {
        let mut scene = scene();
        let mut controls = loaded(&scene);
        let _ = controls.set_attribute("max-camera-orbit", "30deg auto 120%");
        let _ = controls.set_attribute("camera-orbit", "90deg 75deg 300%");
        controls.apply_changes(&scene);
        let goal = controls.goal_camera_orbit();
        assert!((goal.theta - PI / 6.0).abs() < 1e-5);
        assert!((goal.radius - 1.2 * scene.ideal_camera_distance()).abs() < 1e-4);
    }

    #[test]
    fn focus_without_camera_controls_never_prompts() {
        let mut scene = scene();
        let mut controls = StageControls::new();
        controls.model_loaded(&scene, 0.0);
        let _ = controls.handle_input(InputEvent::Focus);
        let _ = run(&mut controls, &mut scene, 0.0, 400);
        assert!(!controls.prompt().is_visible());
        assert_ne!(controls.aria_label(), PROMPT_LABEL);
    }

    #[test]
    fn input_ignored_without_camera_controls() {
        let mut scene = scene();
        let mut controls = StageControls::new();
        controls.model_loaded(&scene, 0.0);
        assert!(!controls.handle_input(InputEvent::Key(Key::ArrowLeft)));
        let _ = run(&mut controls, &mut scene, 0.0, 400);
        assert!(!controls.prompt().is_visible());
    }
}
