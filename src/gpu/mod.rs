//! GPU resource management utilities.
//!
//! Provides headless wgpu device initialization, output encoding state,
//! render targets, and shader composition.

/// Renderer output encoding with a scoped linear override.
pub mod output;
/// Shared wgpu boilerplate helpers for the environment passes.
pub mod pipeline_helpers;
/// wgpu device and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Flat and cube render targets.
pub mod texture;
