//! Rewriting of embedded local paths after a remote fetch
//!
//! A document pulled out of a git download or an npm package carries
//! relative paths that only make sense next to that document. Before its
//! contribution is merged into a parent living somewhere else entirely,
//! those paths are rewritten to be absolute, anchored at the fetched
//! document's own base directory. Downstream consumers may then assume
//! every local path in a resolved document is already correct.

use aicfg_fs::NormalizedPath;
use aicfg_source::{SourceRef, classify};
use serde_json::{Map, Value};

/// Sections whose map values may carry local paths.
const PATH_SECTIONS: [&str; 3] = ["skills", "rules", "prompts"];

/// Object fields that hold a path-shaped reference.
const PATH_FIELDS: [&str; 2] = ["path", "source"];

/// Rewrite relative local paths in the known path-bearing sections to be
/// absolute, anchored at `base_dir`.
///
/// Git/npm/URL references and already-absolute paths pass through
/// unchanged. The classifier is the single authority on what counts as
/// local-path-shaped.
pub fn normalize_local_paths(
    mut doc: Map<String, Value>,
    base_dir: &NormalizedPath,
) -> Map<String, Value> {
    for section in PATH_SECTIONS {
        if let Some(Value::Object(entries)) = doc.get_mut(section) {
            for entry in entries.values_mut() {
                normalize_entry(entry, base_dir);
            }
        }
    }
    doc
}

fn normalize_entry(entry: &mut Value, base_dir: &NormalizedPath) {
    match entry {
        Value::String(reference) => {
            if let Some(absolute) = rewritten(reference, base_dir) {
                *reference = absolute;
            }
        }
        Value::Object(fields) => {
            for field in PATH_FIELDS {
                if let Some(Value::String(reference)) = fields.get_mut(field) {
                    if let Some(absolute) = rewritten(reference, base_dir) {
                        *reference = absolute;
                    }
                }
            }
        }
        _ => {}
    }
}

/// The absolute form of `reference`, or None when it should pass through.
fn rewritten(reference: &str, base_dir: &NormalizedPath) -> Option<String> {
    match classify(reference) {
        SourceRef::Local(path) => {
            let stripped = path.strip_prefix("file:").unwrap_or(&path);
            let normalized = NormalizedPath::new(stripped);
            if normalized.is_absolute() {
                None
            } else {
                Some(normalized.absolutize(base_dir).to_string())
            }
        }
        _ => None,
    }
}
