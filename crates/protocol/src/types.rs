//! Shared record types

use serde::{Deserialize, Serialize};

/// A relative external reference discovered in a spec document, paired
/// with the eagerly-loaded text of the referenced file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// The literal `$ref` value, e.g. `./models/pet.json`.
    pub path: String,
    /// Full text of the referenced file at scan time.
    pub content: String,
}

/// A candidate model file discovered under a configured model folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFileRecord {
    /// Bare file name, e.g. `pet.json`.
    pub name: String,
    /// Path relative to the workspace root.
    pub path: String,
}

/// Optional workspace configuration, read from
/// `.vscode/apicurio-config.json` when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdtConfig {
    #[serde(rename = "modelFolders", default)]
    pub model_folders: Vec<String>,
}

/// Which editing profile the opened document calls for. Decided once at
/// open time by content sniffing, never re-evaluated during the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorProfile {
    #[serde(rename = "OPENAPI")]
    OpenApi,
    #[serde(rename = "ASYNCAPI")]
    AsyncApi,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adt_config_uses_wire_field_name() {
        let parsed: AdtConfig =
            serde_json::from_str(r#"{"modelFolders":["models","shared/models"]}"#)
                .expect("parse adt config");
        assert_eq!(parsed.model_folders, vec!["models", "shared/models"]);
    }

    #[test]
    fn adt_config_missing_folders_defaults_to_empty() {
        let parsed: AdtConfig = serde_json::from_str("{}").expect("parse empty config");
        assert!(parsed.model_folders.is_empty());
    }

    #[test]
    fn reference_record_roundtrip() {
        let record = ReferenceRecord {
            path: "./models/pet.json".to_string(),
            content: "{\"type\":\"object\"}".to_string(),
        };
        let json = serde_json::to_string(&record).expect("serialize");
        let reparsed: ReferenceRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(reparsed, record);
    }
}
