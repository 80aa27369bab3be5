use glam::{Mat4, Vec3};

use super::{ModelScene, ScreenRect};
use crate::camera::smooth_controls::DEFAULT_FIELD_OF_VIEW;
use crate::camera::Camera;

/// Smallest bounding radius used for framing, so an empty model still gets
/// a usable camera distance.
const MIN_FRAMING_RADIUS: f32 = 0.001;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two corners (in any order).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        Some(points.iter().fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        }))
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere through the box corners.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        self.size().length() * 0.5
    }
}

/// In-memory scene: one model described by its bounds, a pivot node, a
/// perspective camera, and the canvas it is drawn into.
#[derive(Debug, Clone)]
pub struct StageScene {
    bounds: Aabb,
    canvas: ScreenRect,
    aspect: f32,
    yaw: f32,
    pivot_rotation: f32,
    pivot_center: Vec3,
    camera: Camera,
}

impl StageScene {
    /// Scene for a model with `bounds`, drawn into a `width` x `height`
    /// canvas at the page origin.
    #[must_use]
    pub fn new(bounds: Aabb, width: f32, height: f32) -> Self {
        let mut scene = Self {
            bounds,
            canvas: ScreenRect::default(),
            aspect: 1.0,
            yaw: 0.0,
            pivot_rotation: 0.0,
            pivot_center: bounds.center(),
            camera: Camera::default(),
        };
        scene.set_size(width, height);
        scene
    }

    /// Replace the model bounds (a new model was loaded).
    pub fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = bounds;
    }

    /// Current model bounds.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Resize the canvas. Zero-sized dimensions are ignored.
    pub fn set_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.canvas.width = width;
            self.canvas.height = height;
            self.aspect = width / height;
            self.camera.aspect = self.aspect;
        }
    }

    /// Move the canvas on the page.
    pub fn set_canvas_origin(&mut self, x: f32, y: f32) {
        self.canvas.x = x;
        self.canvas.y = y;
    }

    /// Current pivot rotation (yaw plus any cosmetic nudge).
    #[must_use]
    pub fn pivot_rotation(&self) -> f32 {
        self.pivot_rotation
    }

    /// Read-only camera access.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Model transform: rotation about the pivot center by the pivot
    /// rotation.
    #[must_use]
    pub fn pivot_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pivot_center)
            * Mat4::from_rotation_y(self.pivot_rotation)
            * Mat4::from_translation(-self.pivot_center)
    }
}

impl ModelScene for StageScene {
    fn ideal_camera_distance(&self) -> f32 {
        let radius = self.bounds.bounding_radius().max(MIN_FRAMING_RADIUS);
        radius / (DEFAULT_FIELD_OF_VIEW.to_radians() * 0.5).sin()
    }

    fn bounding_box_center(&self) -> Vec3 {
        self.bounds.center()
    }

    fn field_of_view_aspect(&self) -> f32 {
        let size = self.bounds.size();
        if size.y <= 0.0 {
            return 1.0;
        }
        size.x.max(size.z) / size.y
    }

    fn aspect(&self) -> f32 {
        self.aspect
    }

    fn canvas_rect(&self) -> ScreenRect {
        self.canvas
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.pivot_rotation = yaw;
    }

    fn set_pivot_rotation(&mut self, radians: f32) {
        self.pivot_rotation = radians;
    }

    fn pivot_center(&self) -> Vec3 {
        self.pivot_center
    }

    fn set_pivot_center(&mut self, center: Vec3) {
        self.pivot_center = center;
    }

    fn active_camera(&mut self) -> &mut Camera {
        &mut self.camera
    }
}
