//! Interaction-prompt state machine.
//!
//! The prompt is a small animated affordance telling the user the camera
//! can be moved. It appears once the model has been loaded for longer than
//! a threshold without the user touching the camera, and disappears (for
//! good, once it has been seen) as soon as the user interacts.
//!
//! Time is supplied by the caller in milliseconds; nothing here reads a
//! clock, so the threshold resolution is whatever the frame loop provides.

use std::f64::consts::TAU;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default idle time before the prompt appears.
pub const DEFAULT_PROMPT_THRESHOLD_MS: f64 = 3000.0;

/// Duration of one full swing of the prompt animation.
const PROMPT_ANIMATION_PERIOD_MS: f64 = 5000.0;

/// Peak horizontal travel of the prompt graphic as a fraction of the canvas
/// width.
const PROMPT_SWING_FRACTION: f32 = 0.1;

/// Screen-reader text shown while the prompt is visible.
pub const PROMPT_LABEL: &str =
    "Use mouse, touch or arrow keys to control the camera!";

/// When the prompt is allowed to appear (`interaction-prompt`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionPromptStrategy {
    /// Start counting as soon as camera controls are enabled.
    #[default]
    Auto,
    /// Start counting only when the viewer gains focus.
    WhenFocused,
    /// Never show the prompt.
    None,
}

impl InteractionPromptStrategy {
    /// Parse the `interaction-prompt` attribute value.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value.trim() {
            "auto" => Some(Self::Auto),
            "when-focused" => Some(Self::WhenFocused),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Where the prompt currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PromptState {
    /// No timer running.
    Idle,
    /// Timer running toward the threshold.
    Waiting,
    /// Prompt shown; `since` is the time it appeared.
    Visible {
        /// Time (ms) the prompt became visible.
        since: f64,
    },
    /// Already shown once for this model; will not come back until a new
    /// model loads.
    Suppressed,
}

/// Interaction-prompt controller.
#[derive(Debug, Clone)]
pub struct InteractionPrompt {
    strategy: InteractionPromptStrategy,
    threshold_ms: f64,
    state: PromptState,
    prompted_once: bool,
    should_prompt: bool,
    loaded_at: Option<f64>,
    focused: bool,
}

impl Default for InteractionPrompt {
    fn default() -> Self {
        Self::new(InteractionPromptStrategy::Auto, DEFAULT_PROMPT_THRESHOLD_MS)
    }
}

impl InteractionPrompt {
    /// Create an idle prompt.
    #[must_use]
    pub fn new(strategy: InteractionPromptStrategy, threshold_ms: f64) -> Self {
        Self {
            strategy,
            threshold_ms,
            state: PromptState::Idle,
            prompted_once: false,
            should_prompt: true,
            loaded_at: None,
            focused: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Whether the prompt is on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self.state, PromptState::Visible { .. })
    }

    /// Whether the prompt has been shown since the last model load.
    #[must_use]
    pub fn prompted_once(&self) -> bool {
        self.prompted_once
    }

    /// Whether the prompt may still be shown for this model.
    #[must_use]
    pub fn should_prompt(&self) -> bool {
        self.should_prompt
    }

    /// Current strategy.
    #[must_use]
    pub fn strategy(&self) -> InteractionPromptStrategy {
        self.strategy
    }

    /// Change the strategy. Switching to `None` hides a visible prompt.
    pub fn set_strategy(&mut self, strategy: InteractionPromptStrategy) {
        self.strategy = strategy;
        if strategy == InteractionPromptStrategy::None {
            self.defer();
        }
    }

    /// Change the idle threshold. Non-finite or negative values are ignored.
    pub fn set_threshold(&mut self, threshold_ms: f64) {
        if threshold_ms.is_finite() && threshold_ms >= 0.0 {
            self.threshold_ms = threshold_ms;
        }
    }

    /// Camera controls were enabled.
    pub fn controls_enabled(&mut self) {
        if self.strategy == InteractionPromptStrategy::Auto
            && self.should_prompt
            && !self.prompted_once
        {
            self.transition(PromptState::Waiting);
        }
    }

    /// Camera controls were disabled.
    pub fn controls_disabled(&mut self) {
        self.defer();
    }

    /// A new model was loaded at `now`. Clears the once-per-model latch and
    /// restarts the wait.
    pub fn source_changed(&mut self, now: f64) {
        self.defer();
        self.prompted_once = false;
        self.should_prompt = true;
        self.loaded_at = Some(now);
        let eligible = match self.strategy {
            InteractionPromptStrategy::Auto => true,
            InteractionPromptStrategy::WhenFocused => self.focused,
            InteractionPromptStrategy::None => false,
        };
        self.transition(if eligible {
            PromptState::Waiting
        } else {
            PromptState::Idle
        });
    }

    /// The user moved the camera.
    pub fn user_interacted(&mut self) {
        if matches!(self.state, PromptState::Waiting | PromptState::Visible { .. })
        {
            self.defer();
        }
    }

    /// The viewer gained focus.
    pub fn focus(&mut self) {
        self.focused = true;
        if self.strategy != InteractionPromptStrategy::None
            && self.should_prompt
            && !self.prompted_once
        {
            self.transition(PromptState::Waiting);
        }
    }

    /// The viewer lost focus. Hides the prompt without latching.
    pub fn blur(&mut self) {
        self.focused = false;
        self.transition(self.resting_state());
    }

    /// Advance the timer. Returns `true` on the frame the prompt appears.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.state != PromptState::Waiting
            || self.strategy == InteractionPromptStrategy::None
        {
            return false;
        }
        let Some(loaded_at) = self.loaded_at else {
            return false;
        };
        if now - loaded_at < self.threshold_ms {
            return false;
        }
        self.prompted_once = true;
        self.transition(PromptState::Visible { since: now });
        true
    }

    /// Horizontal offset (CSS px) of the prompt graphic from the canvas
    /// center at `now`, for a canvas `width` pixels wide. Zero while hidden.
    #[must_use]
    pub fn graphic_offset(&self, now: f64, width: f32) -> f32 {
        let PromptState::Visible { since } = self.state else {
            return 0.0;
        };
        let phase = ((now - since) / PROMPT_ANIMATION_PERIOD_MS).fract();
        (phase * TAU).sin() as f32 * width * PROMPT_SWING_FRACTION
    }

    /// Cancel the wait and hide the prompt. Once the prompt has been seen,
    /// this also latches it off until the next model load.
    pub fn defer(&mut self) {
        if self.prompted_once {
            self.should_prompt = false;
        }
        self.transition(self.resting_state());
    }

    fn resting_state(&self) -> PromptState {
        if self.should_prompt {
            PromptState::Idle
        } else {
            PromptState::Suppressed
        }
    }

    fn transition(&mut self, next: PromptState) {
        if std::mem::discriminant(&next) != std::mem::discriminant(&self.state)
        {
            log::debug!("interaction prompt: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}
