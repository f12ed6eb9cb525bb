//! Core functionality for Hexify.
//!
//! This module holds application-level configuration shared by the
//! command line front end and the plugin session.

mod config;

pub use config::{Config, ExportConfig, LOCAL_CONFIG_FILE};
