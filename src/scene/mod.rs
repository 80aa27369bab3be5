//! The scene/model collaborator the controls read and write.
//!
//! [`ModelScene`] is the narrow contract the controls orchestrator needs
//! from whatever owns the rendered model: framing metrics derived from the
//! model's bounds, the viewport aspect and on-screen rectangle, and the
//! pivot node (rotation and center) the camera orbits. [`StageScene`] is a
//! self-contained implementation over an axis-aligned bounding box.

mod stage;

use glam::Vec3;

use crate::camera::smooth_controls::DEFAULT_FIELD_OF_VIEW;
use crate::camera::Camera;

pub use stage::{Aabb, StageScene};

/// On-screen rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Scene/model state consumed by the controls.
pub trait ModelScene {
    /// Camera distance that frames the whole model at the default field of
    /// view.
    fn ideal_camera_distance(&self) -> f32;

    /// Center of the model's bounding box.
    fn bounding_box_center(&self) -> Vec3;

    /// Horizontal-to-vertical extent ratio the model needs to be framed.
    fn field_of_view_aspect(&self) -> f32;

    /// Viewport aspect ratio (width / height).
    fn aspect(&self) -> f32;

    /// The canvas's on-screen rectangle.
    fn canvas_rect(&self) -> ScreenRect;

    /// Authoritative model yaw in radians.
    fn yaw(&self) -> f32;

    /// Set the model yaw; the pivot rotation follows it.
    fn set_yaw(&mut self, yaw: f32);

    /// Rotate the pivot without touching the authoritative yaw (cosmetic).
    fn set_pivot_rotation(&mut self, radians: f32);

    /// Point the pivot is centered on.
    fn pivot_center(&self) -> Vec3;

    /// Move the pivot center.
    fn set_pivot_center(&mut self, center: Vec3);

    /// The camera used for rendering.
    fn active_camera(&mut self) -> &mut Camera;

    /// Vertical field of view (degrees) that frames the model for the
    /// current viewport aspect.
    ///
    /// The default field of view fits the model vertically; when the model
    /// is wider than the viewport the vertical field of view is widened until
    /// the horizontal extent fits too.
    fn framed_field_of_view(&self) -> f32 {
        let half = (DEFAULT_FIELD_OF_VIEW.to_radians() * 0.5).tan();
        let aspect = self.aspect();
        let widen = if aspect > 0.0 {
            (self.field_of_view_aspect() / aspect).max(1.0)
        } else {
            1.0
        };
        2.0 * (half * widen).atan().to_degrees()
    }
}
