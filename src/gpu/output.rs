//! Renderer output encoding: tone mapping, gamma, exposure, and the active
//! render target.
//!
//! Passes that produce data rather than display images (mip generation,
//! atlas packing) need linear output. [`OutputState::linear_override`]
//! switches to linear/no-gamma/unit-exposure for the lifetime of the
//! returned guard and puts the previous settings back when it drops, on
//! every exit path.

use std::ops::{Deref, DerefMut};

/// Tone-mapping operator applied before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneMapping {
    /// No tone mapping.
    Linear,
    /// Reinhard `x / (1 + x)`.
    Reinhard,
    /// ACES filmic fit.
    #[default]
    Aces,
}

impl ToneMapping {
    /// Value written into shader uniforms (matches `output.wgsl`).
    #[must_use]
    pub fn shader_id(self) -> u32 {
        match self {
            Self::Linear => 0,
            Self::Reinhard => 1,
            Self::Aces => 2,
        }
    }
}

/// Current output encoding of the renderer.
#[derive(Debug, Clone)]
pub struct OutputState {
    /// Tone-mapping operator.
    pub tone_mapping: ToneMapping,
    /// Whether output is gamma encoded.
    pub gamma_output: bool,
    /// Exposure multiplier applied before tone mapping.
    pub exposure: f32,
    /// Where draws currently land; `None` is the presentation surface.
    pub render_target: Option<wgpu::TextureView>,
}

impl Default for OutputState {
    fn default() -> Self {
        Self {
            tone_mapping: ToneMapping::default(),
            gamma_output: true,
            exposure: 1.0,
            render_target: None,
        }
    }
}

impl OutputState {
    /// Force linear, non-gamma, unit-exposure output until the guard drops.
    pub fn linear_override(&mut self) -> OutputOverride<'_> {
        let saved = (
            self.tone_mapping,
            self.gamma_output,
            self.exposure,
            self.render_target.clone(),
        );
        self.tone_mapping = ToneMapping::Linear;
        self.gamma_output = false;
        self.exposure = 1.0;
        OutputOverride { state: self, saved }
    }

    /// The fields passes copy into their uniforms.
    #[must_use]
    pub fn encoding(&self) -> OutputEncoding {
        OutputEncoding {
            exposure: self.exposure,
            tone_mapping: self.tone_mapping.shader_id(),
            gamma: u32::from(self.gamma_output),
        }
    }
}

/// The output fields as they are laid out in shader uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputEncoding {
    /// Exposure multiplier.
    pub exposure: f32,
    /// [`ToneMapping::shader_id`].
    pub tone_mapping: u32,
    /// 1 if gamma encoded.
    pub gamma: u32,
}

type SavedOutput = (ToneMapping, bool, f32, Option<wgpu::TextureView>);

/// Scoped override of an [`OutputState`]; restores the saved settings and
/// render target on drop.
pub struct OutputOverride<'a> {
    state: &'a mut OutputState,
    saved: SavedOutput,
}

impl OutputOverride<'_> {
    /// Point subsequent draws at `view`.
    pub fn set_render_target(&mut self, view: Option<wgpu::TextureView>) {
        self.state.render_target = view;
    }
}

impl Deref for OutputOverride<'_> {
    type Target = OutputState;

    fn deref(&self) -> &OutputState {
        self.state
    }
}

impl DerefMut for OutputOverride<'_> {
    fn deref_mut(&mut self) -> &mut OutputState {
        self.state
    }
}

impl Drop for OutputOverride<'_> {
    fn drop(&mut self) {
        let (tone_mapping, gamma_output, exposure, render_target) =
            self.saved.clone();
        self.state.tone_mapping = tone_mapping;
        self.state.gamma_output = gamma_output;
        self.state.exposure = exposure;
        self.state.render_target = render_target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_state() -> OutputState {
        OutputState {
            tone_mapping: ToneMapping::Reinhard,
            gamma_output: true,
            exposure: 2.5,
            render_target: None,
        }
    }

    #[test]
    fn override_forces_linear() {
        let mut state = display_state();
        let guard = state.linear_override();
        assert_eq!(
            guard.encoding(),
            OutputEncoding {
                exposure: 1.0,
                tone_mapping: 0,
                gamma: 0,
            }
        );
    }

    #[test]
    fn drop_restores_previous_settings() {
        let mut state = display_state();
        {
            let mut guard = state.linear_override();
            guard.exposure = 7.0;
        }
        assert_eq!(state.tone_mapping, ToneMapping::Reinhard);
        assert!(state.gamma_output);
        assert_eq!(state.exposure, 2.5);
    }

    #[test]
    fn restores_on_early_return() {
        fn failing_pass(state: &mut OutputState) -> Result<(), ()> {
            let _guard = state.linear_override();
            Err(())
        }
        let mut state = display_state();
        assert!(failing_pass(&mut state).is_err());
        assert_eq!(state.encoding(), display_state().encoding());
    }
}
