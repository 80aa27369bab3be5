//! Configuration with TOML file support.
//!
//! Camera attributes, controller tuning, and environment pre-filtering
//! settings live here. Every section uses `#[serde(default)]`, so a partial
//! file (e.g. only `[controls]`) works.

mod camera;
mod controls;
mod environment;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlsOptions;
pub use environment::EnvironmentOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::StagecamError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Declarative camera attributes.
    pub controls: ControlsOptions,
    /// Orbit controller tuning.
    pub camera: CameraOptions,
    /// Environment-map pipeline parameters.
    pub environment: EnvironmentOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StagecamError::Io`] if the file cannot be read and
    /// [`StagecamError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, StagecamError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`StagecamError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, StagecamError> {
        toml::from_str(content)
            .map_err(|e| StagecamError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`StagecamError::OptionsParse`] if serialization fails and
    /// [`StagecamError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StagecamError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StagecamError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::InteractionPolicy;
    use crate::controls::{
        Attribute, InteractionPromptStrategy, StageControls,
    };

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[controls]
camera_controls = true
camera_orbit = "30deg 60deg 2m"
interaction_prompt = "when-focused"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert!(opts.controls.camera_controls);
        assert_eq!(opts.controls.camera_orbit, "30deg 60deg 2m");
        assert_eq!(
            opts.controls.interaction_prompt,
            InteractionPromptStrategy::WhenFocused
        );
        assert_eq!(
            opts.controls.interaction_policy,
            InteractionPolicy::AlwaysAllow
        );
        assert_eq!(opts.controls.interaction_prompt_threshold, 3000.0);
        assert_eq!(opts.environment.lods, 8);
        assert_eq!(opts.camera, CameraOptions::default());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[controls\n").unwrap_err();
        assert!(matches!(err, StagecamError::OptionsParse(_)));
    }

    #[test]
    fn options_feed_the_attribute_table() {
        let mut opts = Options::default();
        opts.controls.camera_controls = true;
        opts.controls.field_of_view = "30deg".into();
        opts.controls.interaction_prompt_threshold = 500.0;
        let controls = StageControls::from_options(&opts);
        assert_eq!(controls.attribute(Attribute::FieldOfView), "30deg");
        assert_eq!(controls.attribute(Attribute::CameraControls), "true");
        assert_eq!(
            controls.attribute(Attribute::InteractionPromptThreshold),
            "500"
        );
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("environment"));

        let controls = &props["controls"]["properties"];
        assert!(controls.get("camera_orbit").is_some());
        assert!(controls.get("min_camera_orbit").is_none());
        let environment = &props["environment"]["properties"];
        assert!(environment.get("lods").is_none());
    }
}
