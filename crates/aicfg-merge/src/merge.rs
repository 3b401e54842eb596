//! Recursive JSON merge

use serde_json::{Map, Value};

use crate::rules::MergeResolution;

/// The site a resolver is consulted at: one key, at one dotted path, with
/// the value each side holds there.
#[derive(Debug)]
pub struct MergeSite<'a> {
    /// The key being merged
    pub key: &'a str,
    /// Dotted path to the key from the document root (includes the key)
    pub path: &'a str,
    /// Base-side value, if the base has this key
    pub base: Option<&'a Value>,
    /// Overlay-side value
    pub overlay: &'a Value,
}

/// Deep-merge `overlay` on top of `base` with default semantics.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    deep_merge_with(base, overlay, &|_| MergeResolution::Default)
}

/// Deep-merge `overlay` on top of `base`, consulting `resolver` at every
/// key before applying default behavior.
///
/// Non-mutating: both inputs are left untouched and a new tree is
/// returned. Defaults: two objects merge recursively; any other pairing —
/// arrays, scalars, `null`, object-vs-scalar — takes the overlay value
/// wholesale. `Keep` discards the overlay value at that key, `Replace`
/// takes it without recursing even when both sides are objects.
pub fn deep_merge_with(
    base: &Value,
    overlay: &Value,
    resolver: &dyn Fn(&MergeSite) -> MergeResolution,
) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_objects(base_map, overlay_map, "", resolver))
        }
        _ => overlay.clone(),
    }
}

fn merge_objects(
    base: &Map<String, Value>,
    overlay: &Map<String, Value>,
    prefix: &str,
    resolver: &dyn Fn(&MergeSite) -> MergeResolution,
) -> Map<String, Value> {
    let mut merged = base.clone();

    for (key, overlay_value) in overlay {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let site = MergeSite {
            key,
            path: &path,
            base: base.get(key),
            overlay: overlay_value,
        };
        match resolver(&site) {
            MergeResolution::Keep => continue,
            MergeResolution::Replace => {
                merged.insert(key.clone(), overlay_value.clone());
                continue;
            }
            MergeResolution::Default => {}
        }

        match (base.get(key), overlay_value) {
            (Some(Value::Object(base_child)), Value::Object(overlay_child)) => {
                merged.insert(
                    key.clone(),
                    Value::Object(merge_objects(base_child, overlay_child, &path, resolver)),
                );
            }
            _ => {
                merged.insert(key.clone(), overlay_value.clone());
            }
        }
    }

    merged
}
