//! Plugin core for Hexify.
//!
//! This module connects the token exporter to a host application.
//!
//! # Architecture
//!
//! The host owns the event loop, the variable store and the UI panel. The
//! core reaches them only through the [`VariableHost`] trait and reacts to
//! [`UiMessage`]s posted by the panel:
//!
//! - `uiReady`: discover color collections and reply with `populateDropdown`
//! - `generateOutput`: export the selected collections and reply with `downloadFile`
//! - `cancel` / `downloadCompleted`: close the session
//!
//! [`MemoryHost`] implements the trait over a JSON variable store and backs
//! both the command line front end and the test suite.

mod error;
mod host;
mod memory;
mod protocol;
mod session;

pub use error::{HostError, HostResult};
pub use host::{PanelOptions, VariableHost};
pub use memory::{MemoryHost, VariableStore};
pub use protocol::{CoreMessage, UiMessage};
pub use session::{Flow, PluginSession, ERROR_NOTICE};
