//! Color design tokens.
//!
//! Turns host variables into exportable text:
//!
//! - **model**: collections, variables and per-mode values as the host exposes them
//! - **color**: RGB(A) to hex conversion and bounded alias resolution
//! - **naming**: output-safe variable names and the name sort key
//! - **render**: SCSS, CSS and JSON renderers
//! - **export**: discovery of color collections and multi-collection export

mod color;
mod export;
mod model;
mod naming;
mod render;

pub use color::{format_color_variable, resolve_color, rgb_to_hex, MAX_ALIAS_HOPS};
pub use export::{
    collect_sections, color_variables, discover_collections, export_collections,
    CollectionSummary,
};
pub use model::{
    AliasKind, Collection, ColorVariable, HexColor, Mode, ResolvedType, Rgba, Variable,
    VariableAlias, VariableValue,
};
pub use naming::{format_variable_name, sort_key};
pub use render::{
    generate_css_output, generate_json_output, generate_scss_output, render_export,
    sort_color_variables, ExportSection, OutputFormat, RenderOptions, SortMode,
    UNRESOLVED_REFERENCE,
};
