//! Length/angle value nodes and the fail-soft tokenizer for declarative
//! attribute strings such as `"0deg 75deg 105%"`.
//!
//! Conversions are pure: a [`NumberNode`] carries a value and a unit tag and
//! is normalized into canonical units (meters for lengths, radians for
//! angles). Percentages and unitless numbers pass through unchanged.

use std::f32::consts::PI;

/// Unit tag attached to a parsed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Bare number with no suffix.
    None,
    /// Meters (`m`).
    Meters,
    /// Centimeters (`cm`).
    Centimeters,
    /// Millimeters (`mm`).
    Millimeters,
    /// Degrees (`deg`).
    Degrees,
    /// Radians (`rad`).
    Radians,
    /// Percent (`%`).
    Percent,
}

/// Broad category of a [`Unit`], used to validate attribute positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// No unit suffix.
    Unitless,
    /// `m`, `cm`, `mm`.
    Length,
    /// `deg`, `rad`.
    Angle,
    /// `%`.
    Percent,
}

impl Unit {
    /// Parse a unit suffix. The empty string maps to [`Unit::None`].
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Self::None),
            "m" => Some(Self::Meters),
            "cm" => Some(Self::Centimeters),
            "mm" => Some(Self::Millimeters),
            "deg" => Some(Self::Degrees),
            "rad" => Some(Self::Radians),
            "%" => Some(Self::Percent),
            _ => None,
        }
    }

    /// Category of this unit.
    #[must_use]
    pub fn kind(self) -> UnitKind {
        match self {
            Self::None => UnitKind::Unitless,
            Self::Meters | Self::Centimeters | Self::Millimeters => {
                UnitKind::Length
            }
            Self::Degrees | Self::Radians => UnitKind::Angle,
            Self::Percent => UnitKind::Percent,
        }
    }
}

/// A number with its unit, as produced by the attribute tokenizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberNode {
    /// Numeric value in `unit`.
    pub number: f32,
    /// Unit the value is expressed in.
    pub unit: Unit,
}

impl NumberNode {
    /// Construct a node.
    #[must_use]
    pub const fn new(number: f32, unit: Unit) -> Self {
        Self { number, unit }
    }

    /// Convert lengths to meters and angles to radians. Percentages and
    /// unitless values are returned unchanged.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self.unit.kind() {
            UnitKind::Length => Self::new(length_to_meters(self), Unit::Meters),
            UnitKind::Angle => Self::new(angle_to_radians(self), Unit::Radians),
            UnitKind::Unitless | UnitKind::Percent => self,
        }
    }
}

/// One whitespace-separated token of an attribute string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueNode {
    /// The keyword `auto`: derive the value from the current model.
    Auto,
    /// A number with a unit.
    Number(NumberNode),
}

impl ValueNode {
    /// Shorthand for a numeric node.
    #[must_use]
    pub const fn number(number: f32, unit: Unit) -> Self {
        Self::Number(NumberNode::new(number, unit))
    }
}

/// Length in meters. Unitless numbers are taken to be meters already.
#[must_use]
pub fn length_to_meters(node: NumberNode) -> f32 {
    match node.unit {
        Unit::Centimeters => node.number / 100.0,
        Unit::Millimeters => node.number / 1000.0,
        _ => node.number,
    }
}

/// Angle in radians. Unitless numbers are taken to be radians already.
#[must_use]
pub fn angle_to_radians(node: NumberNode) -> f32 {
    match node.unit {
        Unit::Degrees => node.number * PI / 180.0,
        _ => node.number,
    }
}

/// Angle in degrees. Unitless numbers are taken to be degrees already.
#[must_use]
pub fn angle_to_degrees(node: NumberNode) -> f32 {
    match node.unit {
        Unit::Radians => node.number * 180.0 / PI,
        _ => node.number,
    }
}

/// Parse a single token. Returns `None` for anything that is not `auto` or a
/// finite number followed by a known unit suffix.
#[must_use]
pub fn parse_token(token: &str) -> Option<ValueNode> {
    if token.eq_ignore_ascii_case("auto") {
        return Some(ValueNode::Auto);
    }

    let split = numeric_prefix_len(token);
    if split == 0 {
        return None;
    }
    let (number, suffix) = token.split_at(split);
    let number: f32 = number.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    let unit = Unit::from_suffix(suffix)?;
    Some(ValueNode::number(number, unit))
}

/// Tokenize an attribute string. Each slot is `None` when its token could
/// not be parsed; callers substitute the default for that position.
#[must_use]
pub fn parse_values(input: &str) -> Vec<Option<ValueNode>> {
    input.split_whitespace().map(parse_token).collect()
}

/// Resolve an attribute string into exactly three slots, replacing missing
/// tokens, unparseable tokens, and tokens whose unit does not belong in that
/// position with the matching entry of `defaults`.
#[must_use]
pub fn parse_triple(
    input: &str,
    allowed: [&[UnitKind]; 3],
    defaults: [ValueNode; 3],
) -> [ValueNode; 3] {
    let parsed = parse_values(input);
    let mut out = defaults;
    for ((slot, kinds), value) in out.iter_mut().zip(allowed).zip(parsed) {
        match value {
            Some(ValueNode::Auto) => *slot = ValueNode::Auto,
            Some(ValueNode::Number(n)) if kinds.contains(&n.unit.kind()) => {
                *slot = ValueNode::Number(n);
            }
            _ => {}
        }
    }
    out
}

/// Resolve a single-value attribute (e.g. `field-of-view`), falling back to
/// `default` on a missing, unparseable, or wrongly-typed token.
#[must_use]
pub fn parse_single(
    input: &str,
    allowed: &[UnitKind],
    default: ValueNode,
) -> ValueNode {
    match parse_values(input).first().copied().flatten() {
        Some(ValueNode::Auto) => ValueNode::Auto,
        Some(ValueNode::Number(n)) if allowed.contains(&n.unit.kind()) => {
            ValueNode::Number(n)
        }
        _ => default,
    }
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` run.
fn numeric_prefix_len(token: &str) -> usize {
    let bytes = token.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let mantissa_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i == mantissa_start {
        return 0;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORBIT_UNITS: [&[UnitKind]; 3] = [
        &[UnitKind::Angle],
        &[UnitKind::Angle],
        &[UnitKind::Length, UnitKind::Percent],
    ];

    #[test]
    fn converts_lengths_to_meters() {
        assert_eq!(length_to_meters(NumberNode::new(2.0, Unit::Meters)), 2.0);
        assert!(
            (length_to_meters(NumberNode::new(25.0, Unit::Centimeters)) - 0.25)
                .abs()
                < 1e-6
        );
        assert!(
            (length_to_meters(NumberNode::new(5.0, Unit::Millimeters)) - 0.005)
                .abs()
                < 1e-6
        );
    }

    #[test]
    fn converts_angles_to_radians() {
        let rad = angle_to_radians(NumberNode::new(180.0, Unit::Degrees));
        assert!((rad - PI).abs() < 1e-6);
        assert_eq!(angle_to_radians(NumberNode::new(1.5, Unit::Radians)), 1.5);
        let deg = angle_to_degrees(NumberNode::new(PI / 2.0, Unit::Radians));
        assert!((deg - 90.0).abs() < 1e-4);
    }

    #[test]
    fn normalize_leaves_percent_alone() {
        let node = NumberNode::new(105.0, Unit::Percent).normalize();
        assert_eq!(node, NumberNode::new(105.0, Unit::Percent));
        let node = NumberNode::new(10.0, Unit::Centimeters).normalize();
        assert_eq!(node.unit, Unit::Meters);
    }

    #[test]
    fn parses_tokens() {
        assert_eq!(
            parse_token("75deg"),
            Some(ValueNode::number(75.0, Unit::Degrees))
        );
        assert_eq!(
            parse_token("-1.5e1m"),
            Some(ValueNode::number(-15.0, Unit::Meters))
        );
        assert_eq!(parse_token("AUTO"), Some(ValueNode::Auto));
        assert_eq!(parse_token("3"), Some(ValueNode::number(3.0, Unit::None)));
        assert_eq!(parse_token("deg"), None);
        assert_eq!(parse_token("12furlongs"), None);
        assert_eq!(parse_token("."), None);
    }

    #[test]
    fn triple_parses_default_orbit() {
        let defaults = [ValueNode::Auto; 3];
        let parsed = parse_triple("0deg 75deg 105%", ORBIT_UNITS, defaults);
        assert_eq!(parsed[0], ValueNode::number(0.0, Unit::Degrees));
        assert_eq!(parsed[1], ValueNode::number(75.0, Unit::Degrees));
        assert_eq!(parsed[2], ValueNode::number(105.0, Unit::Percent));
    }

    #[test]
    fn triple_falls_back_per_slot() {
        let defaults = [
            ValueNode::number(0.0, Unit::Degrees),
            ValueNode::number(75.0, Unit::Degrees),
            ValueNode::number(105.0, Unit::Percent),
        ];
        // Bad number, wrong unit kind, and a missing third token.
        let parsed = parse_triple("abc 3m", ORBIT_UNITS, defaults);
        assert_eq!(parsed, defaults);

        let parsed = parse_triple("45deg auto 2m", ORBIT_UNITS, defaults);
        assert_eq!(parsed[0], ValueNode::number(45.0, Unit::Degrees));
        assert_eq!(parsed[1], ValueNode::Auto);
        assert_eq!(parsed[2], ValueNode::number(2.0, Unit::Meters));
    }

    #[test]
    fn single_value_fallback() {
        let default = ValueNode::Auto;
        assert_eq!(
            parse_single("30deg", &[UnitKind::Angle], default),
            ValueNode::number(30.0, Unit::Degrees)
        );
        assert_eq!(parse_single("", &[UnitKind::Angle], default), default);
        assert_eq!(parse_single("30m", &[UnitKind::Angle], default), default);
    }
}
