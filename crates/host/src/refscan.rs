//! External reference scanner
//!
//! Depth-first walk over a parsed spec document collecting every relative
//! external `$ref` (values starting with `./`), reading the referenced
//! file eagerly so the webview never needs file system access. Internal
//! (`#/...`) and absolute references are left alone.

use std::path::Path;

use apidesk_protocol::ReferenceRecord;
use serde_json::Value;
use tracing::warn;

use crate::MAX_WALK_DEPTH;

const REF_KEY: &str = "$ref";

/// Collect all relative external references in `doc`, in traversal order.
pub fn scan_external_refs(workspace_root: &Path, doc: &Value) -> Vec<ReferenceRecord> {
    let mut records = Vec::new();
    walk(workspace_root, doc, 0, &mut records);
    records
}

fn walk(root: &Path, node: &Value, depth: usize, out: &mut Vec<ReferenceRecord>) {
    if depth > MAX_WALK_DEPTH {
        warn!(
            component = "refscan",
            event = "refscan.depth_exceeded",
            max_depth = MAX_WALK_DEPTH,
            "Document nesting exceeds traversal bound, stopping descent"
        );
        return;
    }

    match node {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(target) if key == REF_KEY && target.starts_with("./") => {
                        read_reference(root, target, out);
                    }
                    other => walk(root, other, depth + 1, out),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(root, item, depth + 1, out);
            }
        }
        _ => {}
    }
}

fn read_reference(root: &Path, target: &str, out: &mut Vec<ReferenceRecord>) {
    let full_path = root.join(target);
    match std::fs::read_to_string(&full_path) {
        Ok(content) => out.push(ReferenceRecord {
            path: target.to_string(),
            content,
        }),
        Err(e) => {
            // One unreadable reference must not abort the whole scan.
            warn!(
                component = "refscan",
                event = "refscan.read_failed",
                path = %full_path.display(),
                error = %e,
                "Referenced file could not be read, skipping"
            );
        }
    }
}
