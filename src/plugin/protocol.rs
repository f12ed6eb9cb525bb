//! UI message protocol.
//!
//! Messages are JSON objects tagged by a `type` field, exchanged over the
//! host's message channel.

use serde::{Deserialize, Deserializer, Serialize};

use crate::tokens::{CollectionSummary, OutputFormat};

/// Messages sent from the UI panel to the plugin core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiMessage {
    /// The panel finished loading and wants the collection list
    UiReady,
    /// Export the selected collections
    #[serde(rename_all = "camelCase")]
    GenerateOutput {
        format: OutputFormat,
        #[serde(deserialize_with = "one_or_many")]
        collection_ids: Vec<String>,
    },
    /// The user dismissed the panel
    Cancel,
    /// The panel saved the exported file
    DownloadCompleted,
}

impl UiMessage {
    /// Parse a raw JSON message.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// Messages sent from the plugin core to the UI panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CoreMessage {
    /// Collections available for export
    PopulateDropdown { collections: Vec<CollectionSummary> },
    /// Rendered export, to be saved by the panel
    DownloadFile { content: String, format: OutputFormat },
}

/// Accept either a single id or a list of ids.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(id) => vec![id],
        OneOrMany::Many(ids) => ids,
    })
}
