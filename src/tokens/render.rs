//! SCSS, CSS and JSON rendering of resolved color variables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::model::ColorVariable;
use super::naming::{format_variable_name, sort_key};

/// Placeholder written for unresolved values in JSON output.
pub const UNRESOLVED_REFERENCE: &str = "unresolved reference";

/// Target output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Scss,
    Css,
    Json,
}

impl OutputFormat {
    /// Format name as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scss => "scss",
            Self::Css => "css",
            Self::Json => "json",
        }
    }

    /// File extension for downloads.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scss" => Ok(Self::Scss),
            "css" => Ok(Self::Css),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown output format '{other}' (expected scss, css or json)")),
        }
    }
}

/// Ordering of variables within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Keep the order the host supplied
    #[default]
    Source,
    /// Sort by name prefix, then by trailing number
    Name,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source" => Ok(Self::Source),
            "name" => Ok(Self::Name),
            other => Err(format!("Unknown sort mode '{other}' (expected source or name)")),
        }
    }
}

/// Options shared by all renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub sort: SortMode,
    /// Wrap CSS custom properties in a `:root` block
    pub wrap_root: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { sort: SortMode::Source, wrap_root: true }
    }
}

/// One collection's worth of resolved variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSection {
    pub collection: String,
    pub variables: Vec<ColorVariable>,
}

/// Apply the requested ordering. Name ordering is stable.
pub fn sort_color_variables(variables: &[ColorVariable], sort: SortMode) -> Vec<&ColorVariable> {
    let mut ordered: Vec<&ColorVariable> = variables.iter().collect();
    if sort == SortMode::Name {
        ordered.sort_by_cached_key(|variable| sort_key(&variable.name));
    }
    ordered
}

fn format_declaration(variable: &ColorVariable, prefix: &str) -> String {
    let clean_name = format_variable_name(&variable.name);

    match variable.primary_hex() {
        Some(hex) => format!("{prefix}{clean_name}: {hex};"),
        None => format!(
            "{prefix}{clean_name}: undefined; /* \"{}\" is a reference variable, unable to resolve */",
            variable.name
        ),
    }
}

/// One `$name: value;` line per variable.
pub fn generate_scss_output(variables: &[ColorVariable], sort: SortMode) -> String {
    sort_color_variables(variables, sort)
        .into_iter()
        .map(|variable| format_declaration(variable, "$"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `--name: value;` line per variable, optionally inside `:root { }`.
pub fn generate_css_output(variables: &[ColorVariable], sort: SortMode, wrap_root: bool) -> String {
    let output = sort_color_variables(variables, sort)
        .into_iter()
        .map(|variable| format_declaration(variable, "--"))
        .collect::<Vec<_>>()
        .join("\n");

    if wrap_root {
        format!(":root {{\n{output}\n}}")
    } else {
        output
    }
}

/// Flat map from cleaned name to hex (or [`UNRESOLVED_REFERENCE`]).
///
/// Later duplicates of a cleaned name overwrite earlier ones.
pub fn generate_json_output(variables: &[ColorVariable], sort: SortMode) -> Map<String, Value> {
    let mut map = Map::new();
    for variable in sort_color_variables(variables, sort) {
        let value = variable.primary_hex().unwrap_or(UNRESOLVED_REFERENCE);
        map.insert(format_variable_name(&variable.name), Value::String(value.to_string()));
    }
    map
}

/// Render a full multi-collection export.
///
/// SCSS and CSS sections get a `/* Collection */` header and are separated
/// by a blank line. JSON nests each flat map under its collection name and
/// is pretty-printed with two-space indentation.
pub fn render_export(
    sections: &[ExportSection],
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => {
            let mut collections = Map::new();
            for section in sections {
                collections.insert(
                    section.collection.clone(),
                    Value::Object(generate_json_output(&section.variables, options.sort)),
                );
            }
            serde_json::to_string_pretty(&Value::Object(collections))
        }
        OutputFormat::Scss | OutputFormat::Css => Ok(sections
            .iter()
            .map(|section| {
                let body = if format == OutputFormat::Css {
                    generate_css_output(&section.variables, options.sort, options.wrap_root)
                } else {
                    generate_scss_output(&section.variables, options.sort)
                };
                format!("/* {} */\n{body}", section.collection)
            })
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}
