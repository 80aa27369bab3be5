//! Environment map pre-filtering.
//!
//! [`MipmapGenerator`] turns a source cubemap into a chain of box-filtered
//! cube levels and packs every face of every level into one flat atlas
//! (see [`layout`] for where each tile lands). [`procedural`] builds a
//! studio-style cubemap to feed it when no captured environment exists.

pub mod face;
pub mod layout;
pub mod mipmap;
pub mod procedural;

pub use layout::{AtlasLayout, Tile};
pub use mipmap::MipmapGenerator;

/// Number of mip levels generated and packed. Fixed regardless of the
/// source resolution.
pub const DEFAULT_LODS: u32 = 8;

/// Texture format of every intermediate level and of the atlas.
pub const ENVIRONMENT_FORMAT: wgpu::TextureFormat =
    wgpu::TextureFormat::Rgba16Float;
