//! Procedural studio environment used when no captured cubemap is supplied.
//!
//! A soft vertical gradient (warm above, cool below, neutral at the horizon)
//! plus one bright key light above and in front of the stage. Values are
//! HDR: the key light is well above 1.0 so the blurred mip levels still
//! carry a visible highlight.

use glam::{Vec2, Vec3};
use half::f16;

use super::face::{face_direction, texel_uv};
use super::ENVIRONMENT_FORMAT;
use crate::gpu::texture::{CubeRenderTarget, CUBE_FACES};
use crate::options::EnvironmentOptions;

const SKY: Vec3 = Vec3::new(0.9, 0.85, 0.75);
const GROUND: Vec3 = Vec3::new(0.12, 0.13, 0.18);
const KEY_COLOR: Vec3 = Vec3::new(1.0, 0.96, 0.9);
/// Cosine of the key light's angular radius.
const KEY_CUTOFF: f32 = 0.97;

/// Studio cubemap generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudioEnvironment {
    /// Face size in texels.
    pub face_size: u32,
    /// Key light brightness multiplier.
    pub key_light_intensity: f32,
    /// Direction towards the key light.
    pub key_direction: Vec3,
}

impl Default for StudioEnvironment {
    fn default() -> Self {
        Self::from_options(&EnvironmentOptions::default())
    }
}

impl StudioEnvironment {
    /// Build from the `[environment]` options.
    #[must_use]
    pub fn from_options(options: &EnvironmentOptions) -> Self {
        Self {
            face_size: options.face_size.max(1),
            key_light_intensity: options.key_light_intensity,
            key_direction: Vec3::new(-0.4, 0.8, 0.45).normalize(),
        }
    }

    /// Linear radiance seen along `dir`.
    #[must_use]
    pub fn radiance(&self, dir: Vec3) -> Vec3 {
        let dir = dir.normalize_or_zero();

        let t = dir.y * 0.5 + 0.5;
        let t = t * t * (3.0 - 2.0 * t);
        let ambient = GROUND.lerp(SKY, t);

        let cos = dir.dot(self.key_direction);
        let k = ((cos - KEY_CUTOFF) / (1.0 - KEY_CUTOFF)).clamp(0.0, 1.0);
        let key = KEY_COLOR * (self.key_light_intensity * k * k * (3.0 - 2.0 * k));

        ambient + key
    }

    /// RGBA half-float texels of one face, row-major from the top.
    #[must_use]
    pub fn face_texels(&self, face: u32) -> Vec<f16> {
        let size = self.face_size;
        let mut data = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let uv: Vec2 = texel_uv(x, y, size);
                let c = self.radiance(face_direction(face, uv));
                data.extend([c.x, c.y, c.z, 1.0].map(f16::from_f32));
            }
        }
        data
    }

    /// Allocate a cube on the GPU and upload every face.
    #[must_use]
    pub fn upload(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> CubeRenderTarget {
        let size = self.face_size;
        let cube = CubeRenderTarget::new(
            device,
            "Studio Environment",
            size,
            ENVIRONMENT_FORMAT,
        );

        for face in 0..CUBE_FACES {
            let texels = self.face_texels(face);
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &cube.texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d {
                        x: 0,
                        y: 0,
                        z: face,
                    },
                    aspect: wgpu::TextureAspect::All,
                },
                bytemuck::cast_slice(&texels),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(size * 8),
                    rows_per_image: Some(size),
                },
                wgpu::Extent3d {
                    width: size,
                    height: size,
                    depth_or_array_layers: 1,
                },
            );
        }
        log::debug!("uploaded {size}px studio environment");

        cube
    }
}
