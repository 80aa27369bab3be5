//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the stagecam crate.
///
/// Attribute parsing never fails (bad values fall back to defaults), so the
/// fallible surface is GPU setup, shader composition, option files and
/// malformed environment sources.
#[derive(Debug)]
pub enum StagecamError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The texture handed to the mipmap pipeline is not a square six-layer
    /// cubemap.
    InvalidEnvironment(String),
    /// A WGSL module failed to register or compose.
    Shader(String),
}

impl fmt::Display for StagecamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidEnvironment(msg) => {
                write!(f, "invalid environment cubemap: {msg}")
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
        }
    }
}

impl std::error::Error for StagecamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for StagecamError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for StagecamError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
