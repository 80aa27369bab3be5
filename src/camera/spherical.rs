use glam::Vec3;

/// Polar coordinates of the camera relative to its target.
///
/// `theta` is the azimuth around the +Y axis (0 looks from +Z toward the
/// target), `phi` is the polar angle measured down from +Y, and `radius` is
/// the distance to the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPosition {
    /// Azimuthal angle in radians.
    pub theta: f32,
    /// Polar angle in radians, in `[0, PI]`.
    pub phi: f32,
    /// Distance from the target.
    pub radius: f32,
}

impl Default for SphericalPosition {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
            radius: 1.0,
        }
    }
}

impl SphericalPosition {
    /// Construct from components.
    #[must_use]
    pub const fn new(theta: f32, phi: f32, radius: f32) -> Self {
        Self { theta, phi, radius }
    }

    /// Cartesian offset of the camera from its target.
    #[must_use]
    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.radius * self.phi.cos(),
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Spherical coordinates of a Cartesian offset. A zero offset maps to
    /// `theta = phi = 0` with zero radius.
    #[must_use]
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn equator_front_is_plus_z() {
        let offset = SphericalPosition::new(0.0, FRAC_PI_2, 2.0).to_offset();
        assert!((offset - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn quarter_turn_is_plus_x() {
        let offset =
            SphericalPosition::new(FRAC_PI_2, FRAC_PI_2, 1.0).to_offset();
        assert!((offset - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn offset_round_trip() {
        let s = SphericalPosition::new(FRAC_PI_4, 1.2, 3.5);
        let back = SphericalPosition::from_offset(s.to_offset());
        assert!((back.theta - s.theta).abs() < 1e-5);
        assert!((back.phi - s.phi).abs() < 1e-5);
        assert!((back.radius - s.radius).abs() < 1e-5);
    }

    #[test]
    fn zero_offset() {
        let s = SphericalPosition::from_offset(Vec3::ZERO);
        assert_eq!(s.radius, 0.0);
    }
}
