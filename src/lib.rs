//! # Hexify
//!
//! Export color design tokens from a design tool's variable store as SCSS,
//! CSS, or JSON.
//!
//! Hexify runs as a plugin core inside a host application. The host owns the
//! variable store and the UI panel; Hexify discovers collections that contain
//! color variables, resolves each variable's value (following alias chains to
//! a concrete color), and renders the result as text for download.
//!
//! ## Features
//!
//! - **Alias resolution**: follows variable references up to a fixed hop limit
//! - **Three formats**: SCSS variables, CSS custom properties, nested JSON
//! - **Injected host**: every host call goes through [`plugin::VariableHost`]
//! - **CLI**: run discovery and exports against a JSON variable store
//!
//! ## Quick Start
//!
//! ```bash
//! # List color collections in an exported store
//! hexify collections --store variables.json
//!
//! # Export everything as CSS custom properties
//! hexify export --store variables.json --format css
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod core;
pub mod plugin;
pub mod tokens;

// Re-export commonly used types
pub use crate::core::Config;
pub use plugin::{MemoryHost, PluginSession, VariableHost};
pub use tokens::{OutputFormat, SortMode};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "hexify";
