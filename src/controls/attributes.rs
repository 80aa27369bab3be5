//! Declarative camera attributes.
//!
//! Every attribute the controls understand is a variant of [`Attribute`];
//! the enum is the whole table. Values are stored as raw strings in an
//! [`AttributeStore`], which remembers which attributes changed since the
//! last apply pass. Parsing is fail-soft: a bad value falls back to the
//! attribute's default and logs a warning, it never errors.

use rustc_hash::FxHashMap;

use crate::util::units::{
    parse_single, parse_token, parse_triple, UnitKind, ValueNode,
};

/// Allowed units for an angle position (bare numbers are degrees or
/// radians depending on the converter).
const ANGLE: &[UnitKind] = &[UnitKind::Angle, UnitKind::Unitless];
/// Allowed units for a radius position.
const RADIUS: &[UnitKind] =
    &[UnitKind::Length, UnitKind::Percent, UnitKind::Unitless];
/// Allowed units for a target coordinate.
const LENGTH: &[UnitKind] = &[UnitKind::Length, UnitKind::Unitless];

/// A declarative camera attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `camera-controls`: whether user input moves the camera.
    CameraControls,
    /// `camera-orbit`: goal `theta phi radius`.
    CameraOrbit,
    /// `camera-target`: goal target `x y z`.
    CameraTarget,
    /// `field-of-view`: goal vertical field of view.
    FieldOfView,
    /// `min-camera-orbit`: lower orbit bounds.
    MinCameraOrbit,
    /// `max-camera-orbit`: upper orbit bounds.
    MaxCameraOrbit,
    /// `min-field-of-view`: narrowest field of view.
    MinFieldOfView,
    /// `max-field-of-view`: widest field of view.
    MaxFieldOfView,
    /// `interaction-prompt`: prompt strategy.
    InteractionPrompt,
    /// `interaction-policy`: input gating policy.
    InteractionPolicy,
    /// `interaction-prompt-threshold`: idle time before the prompt (ms).
    InteractionPromptThreshold,
}

impl Attribute {
    /// Every attribute, in apply order.
    pub const ALL: [Self; 11] = [
        Self::CameraControls,
        Self::InteractionPolicy,
        Self::InteractionPrompt,
        Self::InteractionPromptThreshold,
        Self::MinCameraOrbit,
        Self::MaxCameraOrbit,
        Self::MinFieldOfView,
        Self::MaxFieldOfView,
        Self::CameraOrbit,
        Self::CameraTarget,
        Self::FieldOfView,
    ];

    /// Attribute name as written in markup.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CameraControls => "camera-controls",
            Self::CameraOrbit => "camera-orbit",
            Self::CameraTarget => "camera-target",
            Self::FieldOfView => "field-of-view",
            Self::MinCameraOrbit => "min-camera-orbit",
            Self::MaxCameraOrbit => "max-camera-orbit",
            Self::MinFieldOfView => "min-field-of-view",
            Self::MaxFieldOfView => "max-field-of-view",
            Self::InteractionPrompt => "interaction-prompt",
            Self::InteractionPolicy => "interaction-policy",
            Self::InteractionPromptThreshold => "interaction-prompt-threshold",
        }
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Value used when the attribute is absent.
    #[must_use]
    pub fn default_value(self) -> &'static str {
        match self {
            Self::CameraControls => "false",
            Self::CameraOrbit => "0deg 75deg 105%",
            Self::CameraTarget | Self::MinCameraOrbit | Self::MaxCameraOrbit => {
                "auto auto auto"
            }
            Self::FieldOfView | Self::MaxFieldOfView => "auto",
            Self::MinFieldOfView => "25deg",
            Self::InteractionPrompt => "auto",
            Self::InteractionPolicy => "always-allow",
            Self::InteractionPromptThreshold => "3000",
        }
    }
}

/// Raw attribute values plus the set changed since the last apply pass.
#[derive(Debug)]
pub struct AttributeStore {
    values: FxHashMap<Attribute, String>,
    dirty: Vec<Attribute>,
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeStore {
    /// Store with every attribute absent and marked dirty, so the first
    /// apply pass resolves all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
            dirty: Attribute::ALL.to_vec(),
        }
    }

    /// Set an attribute by name. Unknown names are logged and ignored.
    /// Returns `true` if the stored value changed.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let Some(attribute) = Attribute::from_name(name) else {
            log::warn!("ignoring unknown camera attribute '{name}'");
            return false;
        };
        if self.values.get(&attribute).map(String::as_str) == Some(value) {
            return false;
        }
        let _ = self.values.insert(attribute, value.into());
        self.mark(attribute);
        true
    }

    /// Remove an attribute so its default applies again.
    pub fn remove(&mut self, attribute: Attribute) {
        if self.values.remove(&attribute).is_some() {
            self.mark(attribute);
        }
    }

    /// Current raw value (the default if absent).
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> &str {
        self.values
            .get(&attribute)
            .map_or(attribute.default_value(), String::as_str)
    }

    /// Take the attributes changed since the last call, in apply order.
    pub fn take_dirty(&mut self) -> Vec<Attribute> {
        let mut dirty = std::mem::take(&mut self.dirty);
        dirty.sort_by_key(|a| Attribute::ALL.iter().position(|b| b == a));
        dirty
    }

    fn mark(&mut self, attribute: Attribute) {
        if !self.dirty.contains(&attribute) {
            self.dirty.push(attribute);
        }
    }

    /// `theta phi radius` triple of an orbit attribute.
    #[must_use]
    pub fn orbit(&self, attribute: Attribute) -> [ValueNode; 3] {
        self.triple(attribute, [ANGLE, ANGLE, RADIUS])
    }

    /// `x y z` triple of `camera-target`.
    #[must_use]
    pub fn target(&self) -> [ValueNode; 3] {
        self.triple(Attribute::CameraTarget, [LENGTH, LENGTH, LENGTH])
    }

    /// Single angle of a field-of-view attribute.
    #[must_use]
    pub fn field_of_view(&self, attribute: Attribute) -> ValueNode {
        let default =
            parse_token(attribute.default_value()).unwrap_or(ValueNode::Auto);
        let value = self.get(attribute);
        let parsed = parse_single(value, ANGLE, default);
        if parsed == default && value != attribute.default_value() {
            log::warn!(
                "{}: could not parse '{value}', using default",
                attribute.name()
            );
        }
        parsed
    }

    /// Whether `camera-controls` is on. Any value other than `false` enables
    /// it, matching boolean attribute presence.
    #[must_use]
    pub fn camera_controls(&self) -> bool {
        self.values
            .get(&Attribute::CameraControls)
            .is_some_and(|v| v.trim() != "false")
    }

    /// `interaction-prompt-threshold` in milliseconds.
    #[must_use]
    pub fn prompt_threshold(&self) -> f64 {
        let attribute = Attribute::InteractionPromptThreshold;
        let value = self.get(attribute);
        match value.trim().parse::<f64>() {
            Ok(ms) if ms.is_finite() && ms >= 0.0 => ms,
            _ => {
                log::warn!(
                    "{}: could not parse '{value}', using default",
                    attribute.name()
                );
                attribute.default_value().parse().unwrap_or(0.0)
            }
        }
    }

    fn triple(
        &self,
        attribute: Attribute,
        allowed: [&[UnitKind]; 3],
    ) -> [ValueNode; 3] {
        let defaults = parse_triple(
            attribute.default_value(),
            allowed,
            [ValueNode::Auto; 3],
        );
        let value = self.get(attribute);
        let parsed = parse_triple(value, allowed, defaults);
        if value.split_whitespace().count() > 3
            || value
                .split_whitespace()
                .zip(parsed)
                .any(|(token, node)| parse_token(token) != Some(node))
        {
            log::warn!(
                "{}: malformed value '{value}', substituting defaults",
                attribute.name()
            );
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::units::Unit;

    #[test]
    fn names_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(Attribute::from_name(attribute.name()), Some(attribute));
        }
        assert_eq!(Attribute::from_name("camera-zoom"), None);
    }

    #[test]
    fn dirty_tracking() {
        let mut store = AttributeStore::new();
        assert_eq!(store.take_dirty().len(), Attribute::ALL.len());
        assert!(store.take_dirty().is_empty());

        assert!(store.set("field-of-view", "30deg"));
        assert!(!store.set("field-of-view", "30deg"));
        assert!(store.set("camera-orbit", "1rad 1rad 2m"));
        assert!(!store.set("camera-zoom", "2"));
        assert_eq!(
            store.take_dirty(),
            vec![Attribute::CameraOrbit, Attribute::FieldOfView]
        );

        store.remove(Attribute::FieldOfView);
        assert_eq!(store.get(Attribute::FieldOfView), "auto");
        assert_eq!(store.take_dirty(), vec![Attribute::FieldOfView]);
    }

    #[test]
    fn default_orbit() {
        let store = AttributeStore::new();
        assert_eq!(
            store.orbit(Attribute::CameraOrbit),
            [
                ValueNode::number(0.0, Unit::Degrees),
                ValueNode::number(75.0, Unit::Degrees),
                ValueNode::number(105.0, Unit::Percent),
            ]
        );
    }

    #[test]
    fn bad_tokens_fall_back_per_position() {
        let mut store = AttributeStore::new();
        let _ = store.set("camera-orbit", "45deg banana 2m");
        assert_eq!(
            store.orbit(Attribute::CameraOrbit),
            [
                ValueNode::number(45.0, Unit::Degrees),
                ValueNode::number(75.0, Unit::Degrees),
                ValueNode::number(2.0, Unit::Meters),
            ]
        );

        let _ = store.set("camera-target", "1m 2% auto");
        assert_eq!(
            store.target(),
            [
                ValueNode::number(1.0, Unit::Meters),
                ValueNode::Auto,
                ValueNode::Auto,
            ]
        );
    }

    #[test]
    fn field_of_view_values() {
        let mut store = AttributeStore::new();
        assert_eq!(store.field_of_view(Attribute::FieldOfView), ValueNode::Auto);
        let _ = store.set("field-of-view", "1m");
        assert_eq!(store.field_of_view(Attribute::FieldOfView), ValueNode::Auto);
        assert_eq!(
            store.field_of_view(Attribute::MinFieldOfView),
            ValueNode::number(25.0, Unit::Degrees)
        );
    }

    #[test]
    fn booleans_and_numbers() {
        let mut store = AttributeStore::new();
        assert!(!store.camera_controls());
        let _ = store.set("camera-controls", "");
        assert!(store.camera_controls());
        let _ = store.set("camera-controls", "false");
        assert!(!store.camera_controls());

        assert_eq!(store.prompt_threshold(), 3000.0);
        let _ = store.set("interaction-prompt-threshold", "soon");
        assert_eq!(store.prompt_threshold(), 3000.0);
        let _ = store.set("interaction-prompt-threshold", "500");
        assert_eq!(store.prompt_threshold(), 500.0);
    }
}
