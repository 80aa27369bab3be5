//! Off-screen render targets: flat 2D textures and six-layer cubes.

use crate::error::StagecamError;

/// Number of layers in a cube texture.
pub const CUBE_FACES: u32 = 6;

/// A render-target texture and its default view.
///
/// Created with `RENDER_ATTACHMENT | TEXTURE_BINDING | COPY_SRC` usage so
/// it can be drawn into, sampled, and read back.
pub struct RenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl RenderTarget {
    /// Create a new render-target texture with the given dimensions and format.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// Width and height in texels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.texture.width(), self.texture.height())
    }
}

/// A square six-layer texture viewed as a cube for sampling and as one 2D
/// view per face for rendering into a single face.
pub struct CubeRenderTarget {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// Edge length of each face in texels.
    pub size: u32,
    /// Cube view for direction sampling.
    pub cube_view: wgpu::TextureView,
    /// Per-face 2D views, in layer order +X, -X, +Y, -Y, +Z, -Z.
    pub face_views: Vec<wgpu::TextureView>,
}

impl CubeRenderTarget {
    /// Allocate a cube that can be rendered into, sampled and written.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        size: u32,
        format: wgpu::TextureFormat,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: CUBE_FACES,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        Self::with_views(texture)
    }

    /// Wrap an existing texture after checking it is a usable cube.
    ///
    /// # Errors
    ///
    /// Returns [`StagecamError::InvalidEnvironment`] if the texture does not
    /// have exactly six square, sampleable layers.
    pub fn from_texture(texture: wgpu::Texture) -> Result<Self, StagecamError> {
        let layers = texture.depth_or_array_layers();
        if texture.dimension() != wgpu::TextureDimension::D2 || layers != CUBE_FACES {
            return Err(StagecamError::InvalidEnvironment(format!(
                "expected {CUBE_FACES} 2D layers, got {layers}"
            )));
        }
        if texture.width() != texture.height() || texture.width() == 0 {
            return Err(StagecamError::InvalidEnvironment(format!(
                "faces must be square, got {}x{}",
                texture.width(),
                texture.height()
            )));
        }
        if !texture.usage().contains(wgpu::TextureUsages::TEXTURE_BINDING) {
            return Err(StagecamError::InvalidEnvironment(
                "texture is not sampleable".into(),
            ));
        }
        Ok(Self::with_views(texture))
    }

    fn with_views(texture: wgpu::Texture) -> Self {
        let cube_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Cube View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            ..Default::default()
        });
        let face_views = (0..CUBE_FACES)
            .map(|face| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    label: Some("Cube Face View"),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    base_array_layer: face,
                    array_layer_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();
        Self {
            size: texture.width(),
            texture,
            cube_view,
            face_views,
        }
    }
}
