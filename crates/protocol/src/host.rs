//! Host → Webview messages

use serde::{Deserialize, Serialize};

use crate::types::ReferenceRecord;

/// Messages sent from the embedding host to the webview editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostMessage {
    /// The opened file's raw text plus everything the host resolved for it.
    Open {
        data: String,
        #[serde(rename = "extRefs", default)]
        ext_refs: Vec<ReferenceRecord>,
        #[serde(rename = "workspacePath", default)]
        workspace_path: String,
    },

    /// Confirms that a `save-req` write completed.
    SaveRes,
}

/// Dispatch key for a [`HostMessage`], used by the webview bridge to look
/// up registered handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostMessageKind {
    Open,
    SaveRes,
}

impl HostMessage {
    pub fn kind(&self) -> HostMessageKind {
        match self {
            HostMessage::Open { .. } => HostMessageKind::Open,
            HostMessage::SaveRes => HostMessageKind::SaveRes,
        }
    }

    /// The workspace path carried by this envelope, when it carries one.
    pub fn workspace_path(&self) -> Option<&str> {
        match self {
            HostMessage::Open { workspace_path, .. } => Some(workspace_path),
            HostMessage::SaveRes => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_open() {
        let msg = HostMessage::Open {
            data: "{\"openapi\":\"3.0.2\"}".to_string(),
            ext_refs: vec![ReferenceRecord {
                path: "./models/pet.json".to_string(),
                content: "{}".to_string(),
            }],
            workspace_path: "/workspace/project".to_string(),
        };

        let json = serde_json::to_string(&msg).expect("serialize");
        assert!(json.contains(r#""type":"open""#));
        assert!(json.contains(r#""extRefs""#));
        assert!(json.contains(r#""workspacePath""#));

        let reparsed: HostMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(reparsed, msg);
    }

    #[test]
    fn open_without_refs_defaults_to_empty() {
        let json = r#"{"type":"open","data":"asyncapi: 2.0.0"}"#;
        let parsed: HostMessage = serde_json::from_str(json).expect("parse open");
        match parsed {
            HostMessage::Open {
                ext_refs,
                workspace_path,
                ..
            } => {
                assert!(ext_refs.is_empty());
                assert!(workspace_path.is_empty());
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn deserializes_legacy_save_res_envelope() {
        let json = r#"{"type":"save-res","data":null,"extRefs":[],"workspacePath":""}"#;
        let parsed: HostMessage = serde_json::from_str(json).expect("parse save-res");
        assert_eq!(parsed, HostMessage::SaveRes);
        assert_eq!(parsed.kind(), HostMessageKind::SaveRes);
        assert_eq!(parsed.workspace_path(), None);
    }
}
