//! Webview → Host messages

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages sent from the webview editor to the embedding host.
///
/// The wire shape is the flat envelope `{type, data, ...}` spoken by the
/// original editor builds; variants that carry no payload tolerate (and
/// ignore) the legacy `data`/`extRefs`/`workspacePath` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    /// The webview finished booting and is asking for the file content.
    Ready,

    /// Serialized spec text to write back to the session's file.
    SaveReq { data: String },

    /// Error text to surface as a host-level notification.
    Alert { data: String },

    /// Workspace-relative path the UI wants read on its behalf.
    ReadLocal { data: String },
}

/// Live-edit notification posted to the embedding frame when running
/// outside the extension host. Not part of the host session protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EditBroadcast {
    #[serde(rename = "apicurio_onChange")]
    Change { data: ChangePayload },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePayload {
    pub content: Value,
}
