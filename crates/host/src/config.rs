//! Workspace configuration
//!
//! The ADT configuration lives at a fixed workspace-relative path and is
//! entirely optional: a missing or malformed file disables model-folder
//! pre-fetching and nothing else.

use std::path::Path;

use apidesk_protocol::AdtConfig;
use tracing::{info, warn};

pub const ADT_CONFIG_PATH: &str = ".vscode/apicurio-config.json";

/// Read and parse the optional ADT configuration. Any failure is
/// configuration-absent, not an error.
pub async fn load_adt_config(workspace_root: &Path) -> Option<AdtConfig> {
    let path = workspace_root.join(ADT_CONFIG_PATH);
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) => {
            warn!(
                component = "adt_config",
                event = "config.read_failed",
                path = %path.display(),
                error = %e,
                "Unable to read adt configuration"
            );
            return None;
        }
    };

    match serde_json::from_str::<AdtConfig>(&text) {
        Ok(config) => {
            info!(
                component = "adt_config",
                event = "config.loaded",
                folders = config.model_folders.len(),
                "Loaded adt configuration"
            );
            Some(config)
        }
        Err(e) => {
            warn!(
                component = "adt_config",
                event = "config.parse_failed",
                path = %path.display(),
                error = %e,
                "adt configuration is not valid JSON"
            );
            None
        }
    }
}
