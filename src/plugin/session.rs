//! Plugin session and UI message dispatch.

use std::sync::Arc;

use futures::{Stream, StreamExt};

use super::{CoreMessage, HostResult, PanelOptions, UiMessage, VariableHost};
use crate::tokens::{discover_collections, export_collections, RenderOptions};

/// Notification shown when handling a message fails.
pub const ERROR_NOTICE: &str = "An error occurred. Please check the console for details.";

/// Whether the session keeps processing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Close,
}

/// A running plugin session bound to one host.
///
/// Each message is handled to completion before the next one is taken.
pub struct PluginSession<H: VariableHost> {
    host: Arc<H>,
    render: RenderOptions,
}

impl<H: VariableHost> std::fmt::Debug for PluginSession<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginSession").field("render", &self.render).finish()
    }
}

impl<H: VariableHost> PluginSession<H> {
    /// Create a session rendering exports with `render`.
    pub fn new(host: Arc<H>, render: RenderOptions) -> Self {
        Self { host, render }
    }

    /// The host this session talks to.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Show the UI panel.
    pub fn start(&self, panel: &PanelOptions) {
        self.host.show_ui(panel);
    }

    /// Handle one UI message.
    pub async fn handle(&self, message: UiMessage) -> HostResult<Flow> {
        match message {
            UiMessage::UiReady => {
                let collections = discover_collections(&*self.host).await;
                self.host.post_to_ui(CoreMessage::PopulateDropdown { collections }).await?;
                Ok(Flow::Continue)
            }
            UiMessage::GenerateOutput { format, collection_ids } => {
                let content =
                    export_collections(&*self.host, &collection_ids, format, &self.render).await?;
                self.host.post_to_ui(CoreMessage::DownloadFile { content, format }).await?;
                Ok(Flow::Continue)
            }
            UiMessage::Cancel | UiMessage::DownloadCompleted => {
                self.host.close();
                Ok(Flow::Close)
            }
        }
    }

    /// Handle one UI message, reporting failures to the user.
    ///
    /// Errors never end the session.
    pub async fn dispatch(&self, message: UiMessage) -> Flow {
        match self.handle(message).await {
            Ok(flow) => flow,
            Err(e) => {
                tracing::error!("Error handling UI message: {}", e);
                self.host.notify(ERROR_NOTICE);
                Flow::Continue
            }
        }
    }

    /// Parse and handle a raw JSON message.
    pub async fn dispatch_raw(&self, raw: &str) -> Flow {
        match UiMessage::from_json(raw) {
            Ok(message) => self.dispatch(message).await,
            Err(e) => {
                tracing::error!("Malformed UI message: {}", e);
                self.host.notify(ERROR_NOTICE);
                Flow::Continue
            }
        }
    }

    /// Process UI messages until the session closes or the stream ends.
    pub async fn run<S>(&self, messages: S)
    where
        S: Stream<Item = UiMessage>,
    {
        futures::pin_mut!(messages);
        while let Some(message) = messages.next().await {
            if self.dispatch(message).await == Flow::Close {
                tracing::debug!("Plugin session closed");
                break;
            }
        }
    }
}
