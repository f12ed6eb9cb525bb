//! In-memory host backed by a variable store document.
//!
//! Used by the command line front end and by tests. Everything the core
//! sends back (UI messages, notifications, panel requests) is recorded so it
//! can be inspected or forwarded.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{CoreMessage, HostError, HostResult, PanelOptions, VariableHost};
use crate::tokens::{Collection, Variable};

/// Serialized form of a host variable store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableStore {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl VariableStore {
    /// Parse a store from JSON text.
    pub fn from_json(content: &str) -> HostResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a store from a JSON file.
    pub fn load(path: &Path) -> HostResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// A [`VariableHost`] that serves a [`VariableStore`] from memory.
#[derive(Debug)]
pub struct MemoryHost {
    collections: Vec<Collection>,
    variables: HashMap<String, Variable>,
    /// Ids whose fetch fails with [`HostError::Unavailable`]
    failing: HashSet<String>,
    fail_listing: bool,
    posted: Mutex<Vec<CoreMessage>>,
    notifications: Mutex<Vec<String>>,
    panel: Mutex<Option<PanelOptions>>,
    closed: AtomicBool,
}

impl MemoryHost {
    /// Create a host serving `store`.
    pub fn new(store: VariableStore) -> Self {
        let variables =
            store.variables.into_iter().map(|variable| (variable.id.clone(), variable)).collect();

        Self {
            collections: store.collections,
            variables,
            failing: HashSet::new(),
            fail_listing: false,
            posted: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
            panel: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    /// Load a store file and serve it.
    pub fn from_file(path: &Path) -> HostResult<Self> {
        Ok(Self::new(VariableStore::load(path)?))
    }

    /// Make fetches of the collection or variable `id` fail.
    pub fn failing_on(mut self, id: impl Into<String>) -> Self {
        self.failing.insert(id.into());
        self
    }

    /// Make listing collections fail.
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Messages posted to the UI so far.
    pub fn posted(&self) -> Vec<CoreMessage> {
        self.posted.lock().clone()
    }

    /// Drain the messages posted to the UI.
    pub fn take_posted(&self) -> Vec<CoreMessage> {
        std::mem::take(&mut *self.posted.lock())
    }

    /// Notifications shown so far.
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().clone()
    }

    /// Drain the notifications shown so far.
    pub fn take_notifications(&self) -> Vec<String> {
        std::mem::take(&mut *self.notifications.lock())
    }

    /// Options of the last `show_ui` call.
    pub fn panel(&self) -> Option<PanelOptions> {
        self.panel.lock().clone()
    }

    /// Whether the session was closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn check_available(&self, id: &str) -> HostResult<()> {
        if self.failing.contains(id) {
            return Err(HostError::Unavailable(format!("fetch of '{id}' failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl VariableHost for MemoryHost {
    async fn fetch_collections(&self) -> HostResult<Vec<Collection>> {
        if self.fail_listing {
            return Err(HostError::Unavailable("collection listing failed".to_string()));
        }
        Ok(self.collections.clone())
    }

    async fn fetch_collection(&self, id: &str) -> HostResult<Option<Collection>> {
        self.check_available(id)?;
        Ok(self.collections.iter().find(|collection| collection.id == id).cloned())
    }

    async fn fetch_variable(&self, id: &str) -> HostResult<Option<Variable>> {
        self.check_available(id)?;
        Ok(self.variables.get(id).cloned())
    }

    async fn post_to_ui(&self, message: CoreMessage) -> HostResult<()> {
        if self.is_closed() {
            return Err(HostError::Closed);
        }
        self.posted.lock().push(message);
        Ok(())
    }

    fn notify(&self, message: &str) {
        tracing::info!("Notification: {}", message);
        self.notifications.lock().push(message.to_string());
    }

    fn show_ui(&self, options: &PanelOptions) {
        tracing::debug!(width = options.width, height = options.height, "Showing UI panel");
        *self.panel.lock() = Some(options.clone());
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::OutputFormat;

    const STORE: &str = r#"{
        "collections": [
            {"id": "c1", "name": "Brand", "modes": [{"modeId": "m1", "name": "Light"}], "variableIds": ["v1"]}
        ],
        "variables": [
            {"id": "v1", "name": "brand/500", "resolvedType": "COLOR",
             "valuesByMode": {"m1": {"r": 0, "g": 0.4, "b": 1, "a": 1}}}
        ]
    }"#;

    #[tokio::test]
    async fn test_store_round_trip_through_host() {
        let host = MemoryHost::new(VariableStore::from_json(STORE).unwrap());

        let collections = host.fetch_collections().await.unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].modes[0].name, "Light");

        let variable = host.fetch_variable("v1").await.unwrap().unwrap();
        assert_eq!(variable.name, "brand/500");
        assert!(host.fetch_variable("v2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failing_ids() {
        let host = MemoryHost::new(VariableStore::from_json(STORE).unwrap()).failing_on("v1");
        assert!(matches!(host.fetch_variable("v1").await, Err(HostError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_collection() {
        let host = MemoryHost::new(VariableStore::from_json(STORE).unwrap());
        assert!(host.fetch_collection("c1").await.unwrap().is_some());
        assert!(host.fetch_collection("c2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_after_close_fails() {
        let host = MemoryHost::new(VariableStore::default());
        let message = CoreMessage::DownloadFile { content: String::new(), format: OutputFormat::Css };

        host.post_to_ui(message.clone()).await.unwrap();
        host.close();
        assert!(matches!(host.post_to_ui(message).await, Err(HostError::Closed)));
        assert_eq!(host.take_posted().len(), 1);
        assert!(host.posted().is_empty());
    }

    #[test]
    fn test_invalid_store() {
        assert!(matches!(VariableStore::from_json("{\"collections\": 3}"), Err(HostError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = VariableStore::load(Path::new("/nonexistent/hexify/store.json"));
        assert!(matches!(result, Err(HostError::Io(_))));
    }
}
