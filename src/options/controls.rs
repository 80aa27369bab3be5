use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::InteractionPolicy;
use crate::controls::prompt::DEFAULT_PROMPT_THRESHOLD_MS;
use crate::controls::{Attribute, InteractionPromptStrategy};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Declarative camera attributes, written the same way as in markup.
pub struct ControlsOptions {
    /// Whether user input moves the camera.
    #[schemars(title = "Camera Controls")]
    pub camera_controls: bool,
    /// Goal orbit, e.g. `"0deg 75deg 105%"`.
    #[schemars(title = "Camera Orbit")]
    pub camera_orbit: String,
    /// Goal target, e.g. `"auto auto auto"` or `"0m 1m 0m"`.
    #[schemars(title = "Camera Target")]
    pub camera_target: String,
    /// Goal field of view, e.g. `"auto"` or `"30deg"`.
    #[schemars(title = "Field of View")]
    pub field_of_view: String,
    /// Lower orbit bounds.
    #[schemars(skip)]
    pub min_camera_orbit: String,
    /// Upper orbit bounds.
    #[schemars(skip)]
    pub max_camera_orbit: String,
    /// Narrowest field of view.
    #[schemars(skip)]
    pub min_field_of_view: String,
    /// Widest field of view.
    #[schemars(skip)]
    pub max_field_of_view: String,
    /// When the interaction prompt may appear.
    #[schemars(title = "Interaction Prompt")]
    pub interaction_prompt: InteractionPromptStrategy,
    /// When user input is allowed to move the camera.
    #[schemars(title = "Interaction Policy")]
    pub interaction_policy: InteractionPolicy,
    /// Idle time before the prompt appears, in milliseconds.
    #[schemars(
        title = "Prompt Delay (ms)",
        range(min = 0.0, max = 60000.0),
        extend("step" = 100.0)
    )]
    pub interaction_prompt_threshold: f64,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        let default = |a: Attribute| a.default_value().to_owned();
        Self {
            camera_controls: false,
            camera_orbit: default(Attribute::CameraOrbit),
            camera_target: default(Attribute::CameraTarget),
            field_of_view: default(Attribute::FieldOfView),
            min_camera_orbit: default(Attribute::MinCameraOrbit),
            max_camera_orbit: default(Attribute::MaxCameraOrbit),
            min_field_of_view: default(Attribute::MinFieldOfView),
            max_field_of_view: default(Attribute::MaxFieldOfView),
            interaction_prompt: InteractionPromptStrategy::Auto,
            interaction_policy: InteractionPolicy::AlwaysAllow,
            interaction_prompt_threshold: DEFAULT_PROMPT_THRESHOLD_MS,
        }
    }
}

impl ControlsOptions {
    /// Attribute name/value pairs equivalent to these options.
    #[must_use]
    pub fn attributes(&self) -> Vec<(Attribute, String)> {
        let prompt = match self.interaction_prompt {
            InteractionPromptStrategy::Auto => "auto",
            InteractionPromptStrategy::WhenFocused => "when-focused",
            InteractionPromptStrategy::None => "none",
        };
        let policy = match self.interaction_policy {
            InteractionPolicy::AlwaysAllow => "always-allow",
            InteractionPolicy::AllowWhenFocused => "allow-when-focused",
        };
        vec![
            (
                Attribute::CameraControls,
                if self.camera_controls { "true" } else { "false" }.to_owned(),
            ),
            (Attribute::CameraOrbit, self.camera_orbit.clone()),
            (Attribute::CameraTarget, self.camera_target.clone()),
            (Attribute::FieldOfView, self.field_of_view.clone()),
            (Attribute::MinCameraOrbit, self.min_camera_orbit.clone()),
            (Attribute::MaxCameraOrbit, self.max_camera_orbit.clone()),
            (Attribute::MinFieldOfView, self.min_field_of_view.clone()),
            (Attribute::MaxFieldOfView, self.max_field_of_view.clone()),
            (Attribute::InteractionPrompt, prompt.to_owned()),
            (Attribute::InteractionPolicy, policy.to_owned()),
            (
                Attribute::InteractionPromptThreshold,
                self.interaction_prompt_threshold.to_string(),
            ),
        ]
    }
}
