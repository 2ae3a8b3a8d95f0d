//! Apidesk Protocol
//!
//! Shared types for communication between the embedding host and the
//! webview editor. These types are serialized as JSON across the
//! host/webview boundary.

pub mod codec;
pub mod host;
pub mod types;
pub mod ui;

pub use codec::{CodecError, Encoding};
pub use host::{HostMessage, HostMessageKind};
pub use types::*;
pub use ui::{ChangePayload, EditBroadcast, UiMessage};
