//! Host capability interface.
//!
//! The host owns variable storage, the UI panel and the message channel.
//! The plugin core only sees them through [`VariableHost`], which is injected
//! rather than reached through a global, so tests can substitute an
//! in-memory host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CoreMessage, HostResult};
use crate::tokens::{Collection, Variable};

/// Options for showing the UI panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Panel width in pixels
    pub width: u32,
    /// Panel height in pixels
    pub height: u32,
    /// Panel title
    pub title: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self { width: 600, height: 560, title: "Hexify".to_string() }
    }
}

/// Capabilities the host provides to the plugin core.
///
/// Data calls are async and fallible. Callers treat failures as "not found"
/// and keep going.
#[async_trait]
pub trait VariableHost: Send + Sync {
    /// List every local variable collection.
    async fn fetch_collections(&self) -> HostResult<Vec<Collection>>;

    /// Look up a single collection.
    ///
    /// The default implementation searches [`Self::fetch_collections`].
    async fn fetch_collection(&self, id: &str) -> HostResult<Option<Collection>> {
        Ok(self.fetch_collections().await?.into_iter().find(|collection| collection.id == id))
    }

    /// Look up a single variable.
    async fn fetch_variable(&self, id: &str) -> HostResult<Option<Variable>>;

    /// Send a message to the UI panel.
    async fn post_to_ui(&self, message: CoreMessage) -> HostResult<()>;

    /// Show a short notification to the user.
    fn notify(&self, message: &str);

    /// Show the UI panel.
    fn show_ui(&self, options: &PanelOptions);

    /// End the plugin session.
    fn close(&self);
}
