//! Variable store types as exposed by the host.
//!
//! These mirror the host's data model and are read-only to the plugin core.
//! [`ColorVariable`] is the only derived type; it is built fresh on every export.

use serde::{Deserialize, Serialize};

/// A named group of variables sharing a set of modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Host-assigned collection id
    pub id: String,
    /// Display name
    pub name: String,
    /// Modes defined by this collection (e.g. Light / Dark)
    #[serde(default)]
    pub modes: Vec<Mode>,
    /// Ids of the variables in this collection
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

impl Collection {
    /// Create a collection with no modes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, variable_ids: Vec<String>) -> Self {
        Self { id: id.into(), name: name.into(), modes: Vec::new(), variable_ids }
    }
}

/// A value-set dimension within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

/// The type a variable resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
}

/// An RGB(A) color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Rgba {
    /// An opaque color without an alpha channel.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// A color with an explicit alpha channel.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }
}

/// Marker for the `type` field of an alias value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasKind {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// A reference to another variable by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    pub id: String,
}

/// A single per-mode value of a variable.
///
/// Alias is listed first so `{"type": "VARIABLE_ALIAS", "id": ..}` never
/// falls through to another shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Color(Rgba),
    Boolean(bool),
    Float(f64),
    Text(String),
}

impl VariableValue {
    /// Build an alias value pointing at `id`.
    pub fn alias(id: impl Into<String>) -> Self {
        Self::Alias(VariableAlias { kind: AliasKind::VariableAlias, id: id.into() })
    }
}

/// A named design token with one value per mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub resolved_type: ResolvedType,
    /// Values keyed by mode id, in the order the host reports them
    #[serde(default, with = "mode_values")]
    pub values_by_mode: Vec<(String, VariableValue)>,
}

impl Variable {
    /// Create a color variable with the given per-mode values.
    pub fn color(
        id: impl Into<String>,
        name: impl Into<String>,
        values_by_mode: Vec<(String, VariableValue)>,
    ) -> Self {
        Self { id: id.into(), name: name.into(), resolved_type: ResolvedType::Color, values_by_mode }
    }

    /// Whether this variable resolves to a color.
    pub fn is_color(&self) -> bool {
        self.resolved_type == ResolvedType::Color
    }

    /// Value of the first mode, used when following aliases.
    pub fn first_value(&self) -> Option<&VariableValue> {
        self.values_by_mode.first().map(|(_, value)| value)
    }
}

/// Resolved hex colors of a variable, or the unresolved sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexColor {
    /// `(mode id, hex)` pairs in mode order; `None` marks a mode that
    /// could not be resolved
    Modes(Vec<(String, Option<String>)>),
    /// No mode could be resolved to a concrete color
    Unresolved,
}

/// A color variable ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorVariable {
    /// Raw variable name as authored in the host
    pub name: String,
    pub hex_color: HexColor,
}

impl ColorVariable {
    /// A resolved variable.
    pub fn resolved(name: impl Into<String>, modes: Vec<(String, String)>) -> Self {
        let modes = modes.into_iter().map(|(mode, hex)| (mode, Some(hex))).collect();
        Self { name: name.into(), hex_color: HexColor::Modes(modes) }
    }

    /// A variable whose value could not be resolved.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self { name: name.into(), hex_color: HexColor::Unresolved }
    }

    /// Hex of the first mode, or `None` when that mode is unresolved.
    pub fn primary_hex(&self) -> Option<&str> {
        match &self.hex_color {
            HexColor::Modes(modes) => modes.first().and_then(|(_, hex)| hex.as_deref()),
            HexColor::Unresolved => None,
        }
    }
}

/// Order-preserving (de)serialization of `valuesByMode`.
mod mode_values {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};

    use super::VariableValue;

    pub fn serialize<S: Serializer>(
        values: &[(String, VariableValue)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(values.iter().map(|(mode, value)| (mode, value)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, VariableValue)>, D::Error> {
        struct ModeValuesVisitor;

        impl<'de> Visitor<'de> for ModeValuesVisitor {
            type Value = Vec<(String, VariableValue)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of mode ids to variable values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, VariableValue>()? {
                    values.push(entry);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_map(ModeValuesVisitor)
    }
}
