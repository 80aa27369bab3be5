// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit camera controls and environment-map packing for embedded 3D model
//! viewers, built on wgpu.
//!
//! Stagecam turns declarative camera attributes (`camera-orbit`,
//! `camera-target`, `field-of-view`, ...) into goals for a damped orbit
//! controller, drives that controller once per rendered frame, and manages
//! the interaction prompt that tells users the camera can be moved. It also
//! ships the GPU pipeline that pre-filters an environment cubemap into a mip
//! chain and packs every face of every level into one flat atlas.
//!
//! # Key entry points
//!
//! - [`controls::StageControls`] - the controls orchestrator
//! - [`camera::smooth_controls::SmoothControls`] - the damped orbit
//!   controller it drives
//! - [`scene::ModelScene`] - the scene/model contract the controls read and
//!   write
//! - [`environment::MipmapGenerator`] - cubemap mip chain + atlas packing
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Frame model
//!
//! Everything runs on one thread. The embedder forwards normalized input
//! events as they arrive and calls [`controls::StageControls::tick`] once per
//! rendered frame; work that must not run re-entrantly (jumping the camera
//! to its goal) is queued and drained at a fixed point inside `tick`.

pub mod camera;
pub mod controls;
pub mod environment;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;

pub use error::StagecamError;
