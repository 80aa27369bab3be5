//! Cube face addressing, mirrored from `modules/cube_uv.wgsl` and from
//! the face selection the GPU performs when sampling a cube view.
//!
//! Faces are numbered in texture layer order +X, -X, +Y, -Y, +Z, -Z.
//! Face-local coordinates run over [-1, 1] with `v` pointing down the face,
//! so texel `(x, y)` of an `s`-sized face sits at
//! `((x + 0.5) / s * 2 - 1, (y + 0.5) / s * 2 - 1)`.

use glam::{Vec2, Vec3};

/// Direction through face-local coordinate `uv` of `face` (not normalized).
#[must_use]
pub fn face_direction(face: u32, uv: Vec2) -> Vec3 {
    let (u, v) = (uv.x, uv.y);
    match face {
        0 => Vec3::new(1.0, -v, -u),
        1 => Vec3::new(-1.0, -v, u),
        2 => Vec3::new(u, 1.0, v),
        3 => Vec3::new(u, -1.0, -v),
        4 => Vec3::new(u, -v, 1.0),
        _ => Vec3::new(-u, -v, -1.0),
    }
}

/// Face whose major axis is the largest component of `dir`.
#[must_use]
pub fn choose_face(dir: Vec3) -> u32 {
    let a = dir.abs();
    let axis = if a.x > a.z && a.x > a.y {
        0
    } else if a.z >= a.x && a.z > a.y {
        2
    } else {
        1
    };
    axis as u32 * 2 + u32::from(dir[axis] <= 0.0)
}

/// Face-local coordinate of `dir` projected onto `face`.
///
/// Values outside [-1, 1] mean the direction belongs to a neighbouring face.
#[must_use]
pub fn direction_to_face_uv(dir: Vec3, face: u32) -> Vec2 {
    match face {
        0 => Vec2::new(-dir.z, -dir.y) / dir.x.abs(),
        1 => Vec2::new(dir.z, -dir.y) / dir.x.abs(),
        2 => Vec2::new(dir.x, dir.z) / dir.y.abs(),
        3 => Vec2::new(dir.x, -dir.z) / dir.y.abs(),
        4 => Vec2::new(dir.x, -dir.y) / dir.z.abs(),
        _ => Vec2::new(-dir.x, -dir.y) / dir.z.abs(),
    }
}

/// Face-local coordinate of the center of texel `(x, y)` on an `size`-sized
/// face.
#[must_use]
pub fn texel_uv(x: u32, y: u32, size: u32) -> Vec2 {
    let s = size as f32;
    Vec2::new(
        (x as f32 + 0.5) / s * 2.0 - 1.0,
        (y as f32 + 0.5) / s * 2.0 - 1.0,
    )
}

/// Resolve a possibly out-of-range coordinate on `face` to the face and
/// in-range coordinate that actually holds it.
#[must_use]
pub fn remap(face: u32, uv: Vec2) -> (u32, Vec2) {
    let dir = face_direction(face, uv);
    let target = choose_face(dir);
    (target, direction_to_face_uv(dir, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn round_trips_on_every_face() {
        for face in 0..6 {
            for &(u, v) in &[(0.0, 0.0), (0.5, -0.25), (-0.9, 0.7)] {
                let uv = Vec2::new(u, v);
                let dir = face_direction(face, uv);
                assert_eq!(choose_face(dir), face, "face {face} uv {uv}");
                let back = direction_to_face_uv(dir, face);
                assert!((back - uv).length() < EPS, "face {face}: {back} vs {uv}");
            }
        }
    }

    #[test]
    fn face_centers_are_axes() {
        let axes = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        for (face, axis) in axes.into_iter().enumerate() {
            assert_eq!(face_direction(face as u32, Vec2::ZERO), axis);
        }
    }

    #[test]
    fn overflow_crosses_into_neighbour() {
        // Just past the right edge of +Z is the left edge of +X.
        let (face, uv) = remap(4, Vec2::new(1.05, 0.0));
        assert_eq!(face, 0);
        assert!((uv.x + 1.0 / 1.05).abs() < EPS);
        assert!(uv.y.abs() < EPS);

        // Just past the top edge of +Z is the bottom edge of +Y.
        let (face, uv) = remap(4, Vec2::new(0.2, -1.05));
        assert_eq!(face, 2);
        assert!((uv.y - 1.0 / 1.05).abs() < EPS);
    }

    #[test]
    fn shared_edges_agree() {
        // A point on the +X/+Z edge maps to the same direction from both faces.
        let from_x = face_direction(0, Vec2::new(-1.0, 0.3)).normalize();
        let from_z = face_direction(4, Vec2::new(1.0, 0.3)).normalize();
        assert!((from_x - from_z).length() < EPS);
    }

    #[test]
    fn texel_centers() {
        assert_eq!(texel_uv(0, 0, 2), Vec2::new(-0.5, -0.5));
        assert_eq!(texel_uv(1, 1, 2), Vec2::new(0.5, 0.5));
        assert_eq!(texel_uv(0, 0, 1), Vec2::ZERO);
    }
}
