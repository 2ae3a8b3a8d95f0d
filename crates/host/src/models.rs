//! Model folder fetcher
//!
//! Recursively enumerates candidate model files under a workspace-relative
//! folder configured in the ADT configuration. No file-type filtering yet;
//! every leaf entry is reported.
//! TODO: filter to data-model/spec files once the accepted extensions are
//! settled.

use std::path::Path;

use apidesk_protocol::ModelFileRecord;
use tracing::warn;

use crate::MAX_WALK_DEPTH;

/// List every file under `folder` (relative to the workspace root),
/// recursing into subdirectories. Paths in the result stay
/// workspace-relative. A missing or unreadable folder yields an empty
/// result.
pub fn fetch_models_from_folder(workspace_root: &Path, folder: &str) -> Vec<ModelFileRecord> {
    let mut records = Vec::new();
    collect(workspace_root, Path::new(folder), 0, &mut records);
    records
}

fn collect(root: &Path, dir: &Path, depth: usize, out: &mut Vec<ModelFileRecord>) {
    if depth > MAX_WALK_DEPTH {
        warn!(
            component = "model_fetch",
            event = "models.depth_exceeded",
            dir = %dir.display(),
            max_depth = MAX_WALK_DEPTH,
            "Folder nesting exceeds traversal bound, stopping descent"
        );
        return;
    }

    let full_dir = root.join(dir);
    let entries = match std::fs::read_dir(&full_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                component = "model_fetch",
                event = "models.read_dir_failed",
                dir = %full_dir.display(),
                error = %e,
                "Model folder could not be listed"
            );
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let relative = dir.join(&name);
        match entry.file_type() {
            Ok(file_type) if file_type.is_dir() => collect(root, &relative, depth + 1, out),
            Ok(_) => out.push(ModelFileRecord {
                name: name.to_string_lossy().into_owned(),
                path: relative.to_string_lossy().into_owned(),
            }),
            Err(e) => {
                warn!(
                    component = "model_fetch",
                    event = "models.stat_failed",
                    path = %relative.display(),
                    error = %e,
                    "Entry type could not be determined, skipping"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_files_recursively_with_workspace_relative_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("models/common")).expect("mkdir");
        std::fs::write(dir.path().join("models/pet.json"), "{}").expect("write");
        std::fs::write(dir.path().join("models/common/address.yaml"), "type: object")
            .expect("write");

        let mut records = fetch_models_from_folder(dir.path(), "models");
        records.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "address.yaml");
        assert_eq!(records[0].path, "models/common/address.yaml");
        assert_eq!(records[1].name, "pet.json");
        assert_eq!(records[1].path, "models/pet.json");
    }

    #[test]
    fn no_filtering_is_applied_to_leaf_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("models")).expect("mkdir");
        std::fs::write(dir.path().join("models/notes.txt"), "not a model").expect("write");

        let records = fetch_models_from_folder(dir.path(), "models");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "notes.txt");
    }

    #[test]
    fn missing_folder_yields_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(fetch_models_from_folder(dir.path(), "no-such-folder").is_empty());
    }
}
