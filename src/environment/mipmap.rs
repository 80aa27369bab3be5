//! Cubemap mip chain generation and atlas packing.
//!
//! [`MipmapGenerator::update`] runs two passes over a source cube:
//!
//! 1. **Downsample**: each level is box-filtered from the one above it, one
//!    face per draw. Samples that straddle a face edge are remapped onto the
//!    neighbouring face, so the chain has no seams.
//! 2. **Pack**: every face of every level is drawn into its tile of a flat
//!    atlas (see [`super::layout`]), with a one-texel border blended from
//!    the neighbouring faces so bilinear lookups near a tile edge stay on
//!    the cube.
//!
//! Both passes must write linear data, so the renderer's output encoding is
//! overridden for their duration and restored afterwards.

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::layout::{atlas_height, atlas_width, level_size, AtlasLayout};
use super::ENVIRONMENT_FORMAT;
use crate::error::StagecamError;
use crate::gpu::output::OutputOverride;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, dynamic_uniform_buffer, filtering_sampler,
    linear_sampler, texture_cube, uniform_stride,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::{CubeRenderTarget, RenderTarget, CUBE_FACES};

/// Largest level count whose atlas fits the default texture size limit.
pub const MAX_LODS: u32 = 10;

/// Per-face uniform of the downsample pass. Must match `DownsampleParams`
/// in `downsample.wgsl` (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct DownsampleParams {
    face: u32,
    exposure: f32,
    tone_mapping: u32,
    gamma: u32,
}

/// Per-tile uniform of the pack pass. Must match `PackParams` in
/// `pack.wgsl` (112 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct PackParams {
    ortho: [[f32; 4]; 4],
    rect: [f32; 4],
    face: u32,
    face_size: f32,
    exposure: f32,
    tone_mapping: u32,
    gamma: u32,
    _pad: [u32; 3],
}

/// Projection from atlas pixels (origin top-left, y down) to clip space.
#[must_use]
pub fn atlas_projection(width: u32, height: u32) -> Mat4 {
    Mat4::orthographic_rh(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
}

/// Converts a source cubemap into a blurred mip chain and a packed atlas.
///
/// Intermediate cube targets are cached by size: calling
/// [`update`](Self::update) again with a cube of the same size reuses them,
/// and a different size only allocates the levels that changed.
pub struct MipmapGenerator {
    lods: u32,
    downsample_pipeline: wgpu::RenderPipeline,
    downsample_layout: wgpu::BindGroupLayout,
    downsample_uniforms: wgpu::Buffer,
    downsample_stride: u64,
    pack_pipeline: wgpu::RenderPipeline,
    pack_layout: wgpu::BindGroupLayout,
    pack_uniforms: wgpu::Buffer,
    pack_stride: u64,
    sampler: wgpu::Sampler,
    /// Targets for levels `1..lods`; `None` where the level is the source
    /// size and reads the source directly.
    levels: Vec<Option<CubeRenderTarget>>,
    source_size: Option<u32>,
    layout: AtlasLayout,
    atlas: RenderTarget,
    ortho: Mat4,
}

impl MipmapGenerator {
    /// Compile both passes and allocate the atlas for `lods` levels.
    ///
    /// # Errors
    ///
    /// Returns [`StagecamError::Shader`] if a pass fails to compose.
    pub fn new(
        device: &wgpu::Device,
        composer: &mut ShaderComposer,
        lods: u32,
    ) -> Result<Self, StagecamError> {
        let lods = clamp_lods(lods);

        let downsample_shader = composer.compose(
            device,
            "Environment Downsample Shader",
            include_str!("../../assets/shaders/environment/downsample.wgsl"),
            "environment/downsample.wgsl",
        )?;
        let pack_shader = composer.compose(
            device,
            "Environment Pack Shader",
            include_str!("../../assets/shaders/environment/pack.wgsl"),
            "environment/pack.wgsl",
        )?;

        let downsample_size = size_of::<DownsampleParams>() as u64;
        let downsample_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Environment Downsample Layout"),
                entries: &[
                    texture_cube(0),
                    filtering_sampler(1),
                    dynamic_uniform_buffer(
                        2,
                        wgpu::ShaderStages::FRAGMENT,
                        downsample_size,
                    ),
                ],
            });
        let pack_size = size_of::<PackParams>() as u64;
        let pack_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Environment Pack Layout"),
                entries: &[
                    texture_cube(0),
                    filtering_sampler(1),
                    dynamic_uniform_buffer(
                        2,
                        wgpu::ShaderStages::VERTEX_FRAGMENT,
                        pack_size,
                    ),
                ],
            });

        let downsample_pipeline = create_screen_space_pipeline(
            device,
            "Environment Downsample",
            &downsample_shader,
            ENVIRONMENT_FORMAT,
            &[&downsample_layout],
        );
        let pack_pipeline = create_screen_space_pipeline(
            device,
            "Environment Pack",
            &pack_shader,
            ENVIRONMENT_FORMAT,
            &[&pack_layout],
        );

        let downsample_stride = uniform_stride(device, downsample_size);
        let downsample_uniforms = uniform_slots(
            device,
            "Environment Downsample Uniforms",
            downsample_stride,
            CUBE_FACES,
        );
        let pack_stride = uniform_stride(device, pack_size);
        let pack_uniforms = uniform_slots(
            device,
            "Environment Pack Uniforms",
            pack_stride,
            lods * CUBE_FACES,
        );

        let (width, height) = (atlas_width(lods), atlas_height(lods));
        Ok(Self {
            lods,
            downsample_pipeline,
            downsample_layout,
            downsample_uniforms,
            downsample_stride,
            pack_pipeline,
            pack_layout,
            pack_uniforms,
            pack_stride,
            sampler: linear_sampler(device, "Environment Sampler"),
            levels: Vec::new(),
            source_size: None,
            layout: AtlasLayout::new(1 << lods, lods),
            atlas: RenderTarget::new(
                device,
                "Environment Atlas",
                width,
                height,
                ENVIRONMENT_FORMAT,
            ),
            ortho: atlas_projection(width, height),
        })
    }

    /// Number of levels generated and packed.
    #[must_use]
    pub fn lods(&self) -> u32 {
        self.lods
    }

    /// The packed atlas from the last [`update`](Self::update).
    #[must_use]
    pub fn atlas(&self) -> &RenderTarget {
        &self.atlas
    }

    /// Tile placement used by the last [`update`](Self::update).
    #[must_use]
    pub fn layout(&self) -> &AtlasLayout {
        &self.layout
    }

    /// Change the level count. Reallocates the atlas, its projection and
    /// the per-tile uniforms; the mip chain is rebuilt on the next update.
    pub fn set_lods(&mut self, device: &wgpu::Device, lods: u32) {
        let lods = clamp_lods(lods);
        if lods == self.lods {
            return;
        }
        let (width, height) = (atlas_width(lods), atlas_height(lods));
        log::debug!("reallocating {width}x{height} environment atlas for {lods} levels");
        self.lods = lods;
        self.atlas = RenderTarget::new(
            device,
            "Environment Atlas",
            width,
            height,
            ENVIRONMENT_FORMAT,
        );
        self.ortho = atlas_projection(width, height);
        self.pack_uniforms = uniform_slots(
            device,
            "Environment Pack Uniforms",
            self.pack_stride,
            lods * CUBE_FACES,
        );
        self.source_size = None;
    }

    /// Generate the mip chain for `source`, pack it, and return the atlas.
    pub fn update(
        &mut self,
        context: &mut RenderContext,
        source: &CubeRenderTarget,
    ) -> &RenderTarget {
        let _ = self.setup(&context.device, source);
        let mut output = context.output.linear_override();
        self.generate_mipmaps(&context.device, &context.queue, &mut output, source);
        self.pack_mipmaps(&context.device, &context.queue, &mut output, source);
        drop(output);
        &self.atlas
    }

    /// Make sure a target exists for every level of a `source`-sized chain.
    /// Does nothing when the source size is unchanged. Returns how many
    /// level targets had to be allocated.
    pub fn setup(&mut self, device: &wgpu::Device, source: &CubeRenderTarget) -> usize {
        if self.source_size == Some(source.size) {
            return 0;
        }

        let mut allocated = 0;
        let mut previous = std::mem::take(&mut self.levels);
        self.levels = (1..self.lods)
            .map(|level| {
                let size = level_size(source.size, level);
                (size != source.size).then(|| {
                    previous
                        .iter_mut()
                        .find_map(|slot| slot.take_if(|t| t.size == size))
                        .unwrap_or_else(|| {
                            allocated += 1;
                            CubeRenderTarget::new(
                                device,
                                "Environment Mip Level",
                                size,
                                ENVIRONMENT_FORMAT,
                            )
                        })
                })
            })
            .collect();
        log::debug!(
            "{} environment levels for a {}px source, {allocated} newly allocated",
            self.lods,
            source.size
        );
        self.layout = AtlasLayout::new(source.size, self.lods);
        self.source_size = Some(source.size);
        allocated
    }

    /// Box-filter each level from the one above it.
    pub fn generate_mipmaps(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        output: &mut OutputOverride<'_>,
        source: &CubeRenderTarget,
    ) {
        let encoding = output.encoding();
        let params: Vec<DownsampleParams> = (0..CUBE_FACES)
            .map(|face| DownsampleParams {
                face,
                exposure: encoding.exposure,
                tone_mapping: encoding.tone_mapping,
                gamma: encoding.gamma,
            })
            .collect();
        write_slots(queue, &self.downsample_uniforms, self.downsample_stride, &params);

        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Environment Downsample Encoder"),
            });
        for (index, target) in self.levels.iter().enumerate() {
            let Some(target) = target else {
                continue;
            };
            let level = index as u32 + 1;
            let bind_group = self.bind_group(
                device,
                &self.downsample_layout,
                self.level_view(source, level - 1),
                &self.downsample_uniforms,
                size_of::<DownsampleParams>() as u64,
            );
            for (face, view) in target.face_views.iter().enumerate() {
                output.set_render_target(Some(view.clone()));
                let mut pass = begin_pass(&mut encoder, "Environment Downsample", view);
                pass.set_pipeline(&self.downsample_pipeline);
                pass.set_bind_group(
                    0,
                    &bind_group,
                    &[(face as u64 * self.downsample_stride) as u32],
                );
                pass.draw(0..3, 0..1);
            }
        }
        let _ = queue.submit(std::iter::once(encoder.finish()));
    }

    /// Draw every face of every level into its atlas tile.
    pub fn pack_mipmaps(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        output: &mut OutputOverride<'_>,
        source: &CubeRenderTarget,
    ) {
        let encoding = output.encoding();
        let ortho = self.ortho.to_cols_array_2d();
        let params: Vec<PackParams> = self
            .layout
            .tiles
            .iter()
            .map(|tile| PackParams {
                ortho,
                rect: tile.rect(),
                face: tile.face,
                face_size: tile.face_size as f32,
                exposure: encoding.exposure,
                tone_mapping: encoding.tone_mapping,
                gamma: encoding.gamma,
                _pad: [0; 3],
            })
            .collect();
        write_slots(queue, &self.pack_uniforms, self.pack_stride, &params);

        let bind_groups: Vec<wgpu::BindGroup> = (0..self.lods)
            .map(|level| {
                self.bind_group(
                    device,
                    &self.pack_layout,
                    self.level_view(source, level),
                    &self.pack_uniforms,
                    size_of::<PackParams>() as u64,
                )
            })
            .collect();

        let mut encoder =
            device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Environment Pack Encoder"),
            });
        output.set_render_target(Some(self.atlas.view.clone()));
        {
            let mut pass = begin_pass(&mut encoder, "Environment Pack", &self.atlas.view);
            pass.set_pipeline(&self.pack_pipeline);
            for (slot, tile) in self.layout.tiles.iter().enumerate() {
                let Some(bind_group) = bind_groups.get(tile.level as usize) else {
                    continue;
                };
                pass.set_bind_group(
                    0,
                    bind_group,
                    &[(slot as u64 * self.pack_stride) as u32],
                );
                pass.draw(0..6, 0..1);
            }
        }
        let _ = queue.submit(std::iter::once(encoder.finish()));
    }

    /// Cube view holding `level`, falling back up the chain to the source
    /// for levels that alias it.
    fn level_view<'a>(
        &'a self,
        source: &'a CubeRenderTarget,
        level: u32,
    ) -> &'a wgpu::TextureView {
        (1..=level)
            .rev()
            .find_map(|l| self.levels.get(l as usize - 1)?.as_ref())
            .map_or(&source.cube_view, |target| &target.cube_view)
    }

    fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        uniforms: &wgpu::Buffer,
        slot_size: u64,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Environment Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: uniforms,
                        offset: 0,
                        size: wgpu::BufferSize::new(slot_size),
                    }),
                },
            ],
        })
    }
}

fn clamp_lods(lods: u32) -> u32 {
    let clamped = lods.clamp(1, MAX_LODS);
    if clamped != lods {
        log::warn!("environment level count {lods} out of range, using {clamped}");
    }
    clamped
}

fn uniform_slots(
    device: &wgpu::Device,
    label: &str,
    stride: u64,
    count: u32,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: stride * u64::from(count.max(1)),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Lay `params` out one per `stride` bytes and upload them.
fn write_slots<T: Pod>(
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    stride: u64,
    params: &[T],
) {
    if params.is_empty() {
        return;
    }
    queue.write_buffer(buffer, 0, &pack_slots(stride, params));
}

fn pack_slots<T: Pod>(stride: u64, params: &[T]) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = vec![0u8; stride * params.len()];
    for (chunk, value) in bytes.chunks_exact_mut(stride).zip(params) {
        chunk[..size_of::<T>()].copy_from_slice(bytemuck::bytes_of(value));
    }
    bytes
}

fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    label: &str,
    view: &wgpu::TextureView,
) -> wgpu::RenderPass<'e> {
    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};
    use half::f16;

    use super::*;
    use crate::environment::face::{face_direction, texel_uv};
    use crate::environment::procedural::StudioEnvironment;
    use crate::environment::DEFAULT_LODS;

    /// Headless device, or `None` on machines without an adapter.
    fn gpu() -> Option<RenderContext> {
        pollster::block_on(RenderContext::new_headless()).ok()
    }

    /// Copy `target` back to the CPU as rows of RGBA texels.
    fn read_back(context: &RenderContext, target: &RenderTarget) -> (u32, Vec<Vec4>) {
        let (width, height) = target.size();
        let row_bytes = width * 8;
        let padded_row = row_bytes.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);
        let buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Atlas Readback"),
            size: u64::from(padded_row * height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });
        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        encoder.copy_texture_to_buffer(
            target.texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        let _ = context.queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        slice.map_async(wgpu::MapMode::Read, |result| result.unwrap());
        let _ = context.device.poll(wgpu::PollType::Wait).unwrap();
        let bytes = slice.get_mapped_range();
        let channel = |t: &[u8], i: usize| f16::from_le_bytes([t[i], t[i + 1]]).to_f32();
        let texels = bytes
            .chunks_exact(padded_row as usize)
            .flat_map(|row| {
                row[..row_bytes as usize].chunks_exact(8).map(|t| {
                    Vec4::new(channel(t, 0), channel(t, 2), channel(t, 4), channel(t, 6))
                })
            })
            .collect();
        (width, texels)
    }

    fn assert_close(got: Vec3, want: Vec3, what: &str) {
        let tolerance = 0.02 * (1.0 + want.max_element());
        assert!(
            (got - want).abs().max_element() < tolerance,
            "{what}: got {got}, want {want}"
        );
    }

    #[test]
    fn uniform_layouts_match_wgsl() {
        assert_eq!(size_of::<DownsampleParams>(), 16);
        assert_eq!(size_of::<PackParams>(), 112);
    }

    #[test]
    fn projection_maps_atlas_corners() {
        let ortho = atlas_projection(774, 1054);
        let top_left = ortho * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = ortho * Vec4::new(774.0, 1054.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-5);
        assert!((top_left.y - 1.0).abs() < 1e-5);
        assert!((bottom_right.x - 1.0).abs() < 1e-5);
        assert!((bottom_right.y + 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&top_left.z));
    }

    #[test]
    fn slots_are_stride_aligned() {
        let params = [
            DownsampleParams {
                face: 1,
                exposure: 1.0,
                tone_mapping: 0,
                gamma: 0,
            },
            DownsampleParams {
                face: 2,
                exposure: 1.0,
                tone_mapping: 0,
                gamma: 0,
            },
        ];
        let bytes = pack_slots(256, &params);
        assert_eq!(bytes.len(), 512);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[256], 2);
        assert!(bytes[16..256].iter().all(|b| *b == 0));
    }

    #[test]
    fn level_count_is_clamped() {
        assert_eq!(clamp_lods(0), 1);
        assert_eq!(clamp_lods(8), 8);
        assert_eq!(clamp_lods(40), MAX_LODS);
    }

    #[test]
    fn atlas_tiles_match_studio_radiance() {
        let Some(mut context) = gpu() else {
            return;
        };
        let mut composer = ShaderComposer::new().unwrap();
        let mut generator = MipmapGenerator::new(&context.device, &mut composer, 4).unwrap();
        let studio = StudioEnvironment {
            face_size: 16,
            ..StudioEnvironment::default()
        };
        let source = studio.upload(&context.device, &context.queue);
        let _ = generator.update(&mut context, &source);
        assert_eq!(generator.layout().tiles.len(), 24);

        let (width, texels) = read_back(&context, generator.atlas());
        let at = |x: u32, y: u32| texels[(y * width + x) as usize];
        let radiance = |face: u32, x: u32, y: u32, size: u32| {
            studio.radiance(face_direction(face, texel_uv(x, y, size)))
        };

        // Every padded tile is filled, borders included.
        for tile in &generator.layout().tiles {
            for y in tile.y..tile.y + tile.padded_size() {
                for x in tile.x..tile.x + tile.padded_size() {
                    let texel = at(x, y);
                    assert!((texel.w - 1.0).abs() < 1e-3, "alpha at ({x}, {y})");
                    assert!(texel.x > 0.05, "black texel at ({x}, {y})");
                }
            }
        }

        for face in 0..CUBE_FACES {
            let tile = generator.layout().tile(0, face).unwrap();
            for y in 0..16 {
                for x in 0..16 {
                    assert_close(
                        at(tile.x + 1 + x, tile.y + 1 + y).truncate(),
                        radiance(face, x, y, 16),
                        &format!("level 0 face {face} texel ({x}, {y})"),
                    );
                }
            }

            // Level 1 is the 2x2 box of level 0.
            let tile = generator.layout().tile(1, face).unwrap();
            for y in 0..8 {
                for x in 0..8 {
                    let want = (radiance(face, 2 * x, 2 * y, 16)
                        + radiance(face, 2 * x + 1, 2 * y, 16)
                        + radiance(face, 2 * x, 2 * y + 1, 16)
                        + radiance(face, 2 * x + 1, 2 * y + 1, 16))
                        * 0.25;
                    assert_close(
                        at(tile.x + 1 + x, tile.y + 1 + y).truncate(),
                        want,
                        &format!("level 1 face {face} texel ({x}, {y})"),
                    );
                }
            }
        }
    }

    #[test]
    fn targets_follow_source_size() {
        let Some(mut context) = gpu() else {
            return;
        };
        let mut composer = ShaderComposer::new().unwrap();
        let mut generator =
            MipmapGenerator::new(&context.device, &mut composer, DEFAULT_LODS).unwrap();
        let cube = |size| {
            CubeRenderTarget::new(&context.device, "Test Source", size, ENVIRONMENT_FORMAT)
        };
        let (large, small, tiny) = (cube(256), cube(128), cube(16));
        let level_sizes = |generator: &MipmapGenerator| -> Vec<Option<u32>> {
            generator
                .levels
                .iter()
                .map(|level| level.as_ref().map(|t| t.size))
                .collect()
        };

        assert_eq!(generator.setup(&context.device, &large), 7);
        let _ = generator.update(&mut context, &large);
        assert_eq!(generator.setup(&context.device, &large), 0);
        assert_eq!(generator.layout().source_size, 256);
        assert_eq!(generator.layout().tiles.len(), 48);
        assert_eq!(generator.atlas().size(), (774, 1054));

        // Halving the source only needs the new 1px level.
        assert_eq!(generator.setup(&context.device, &small), 1);
        let _ = generator.update(&mut context, &small);
        assert_eq!(
            level_sizes(&generator),
            [64, 32, 16, 8, 4, 2, 1].map(Some).to_vec()
        );
        assert_eq!(generator.layout().source_size, 128);
        assert_eq!(generator.layout().tiles.len(), 48);
        assert_eq!(generator.atlas().size(), (774, 1054));

        generator.set_lods(&context.device, 4);
        assert_eq!(generator.lods(), 4);
        assert_eq!(generator.atlas().size(), (54, 78));
        assert_eq!(generator.ortho, atlas_projection(54, 78));
        assert_eq!(generator.setup(&context.device, &tiny), 0);
        let _ = generator.update(&mut context, &tiny);
        assert_eq!(level_sizes(&generator), [8, 4, 2].map(Some).to_vec());
        assert_eq!(generator.layout().source_size, 16);
        assert_eq!(generator.layout().tiles.len(), 24);
    }
}
