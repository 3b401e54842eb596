//! Project-local override merge
//!
//! `ai.local.json` layers on top of the fully resolved base document with
//! different semantics than the extends merge: entries in the map
//! sections are independent units, so a local entry replaces the base
//! entry wholesale and the literal sentinel `false` deletes it. Only the
//! `editors` section deep-merges, because editor sub-configs are additive
//! by field. Reusing the generic deep merge here would silently combine
//! the internals of an entry the user meant to replace.

use aicfg_merge::deep_merge;
use serde_json::{Map, Value};

/// Sections whose entries follow replace-with-delete-sentinel semantics.
const SENTINEL_SECTIONS: [&str; 4] = ["skills", "rules", "prompts", "mcp"];

/// Apply an `ai.local.json` document on top of a resolved base document.
///
/// The local document must not carry `extends`; the loader enforces that
/// before calling here.
pub fn apply_local_override(
    base: &Map<String, Value>,
    local: &Map<String, Value>,
) -> Map<String, Value> {
    let mut result = base.clone();

    for (key, local_value) in local {
        if SENTINEL_SECTIONS.contains(&key.as_str()) {
            let base_section = match result.get(key) {
                Some(Value::Object(section)) => section.clone(),
                _ => Map::new(),
            };
            result.insert(key.clone(), override_section(&base_section, local_value));
        } else if key == "editors" {
            let base_value = result
                .get(key)
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            result.insert(key.clone(), deep_merge(&base_value, local_value));
        } else {
            result.insert(key.clone(), local_value.clone());
        }
    }

    result
}

/// Merge one map section with sentinel semantics: `false` deletes the
/// entry, anything else replaces it wholesale, absent keys are untouched.
fn override_section(base: &Map<String, Value>, local: &Value) -> Value {
    let Value::Object(local_map) = local else {
        return local.clone();
    };

    let mut merged = base.clone();
    for (entry_key, entry_value) in local_map {
        if *entry_value == Value::Bool(false) {
            merged.remove(entry_key);
        } else {
            merged.insert(entry_key.clone(), entry_value.clone());
        }
    }
    Value::Object(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_sentinel_false_deletes_entry() {
        let base = doc(json!({"mcp": {"github": {"command": "x"}}}));
        let local = doc(json!({"mcp": {"github": false}}));

        let result = apply_local_override(&base, &local);
        assert_eq!(result["mcp"], json!({}));
    }

    #[test]
    fn test_entry_replaced_wholesale_not_merged() {
        let base = doc(json!({"mcp": {"github": {"command": "x", "env": {"TOKEN": "t"}}}}));
        let local = doc(json!({"mcp": {"github": {"command": "y"}}}));

        let result = apply_local_override(&base, &local);
        assert_eq!(result["mcp"]["github"], json!({"command": "y"}));
    }

    #[test]
    fn test_untouched_entries_survive() {
        let base = doc(json!({"skills": {"keep": {"path": "/a"}, "drop": {"path": "/b"}}}));
        let local = doc(json!({"skills": {"drop": false, "add": {"path": "/c"}}}));

        let result = apply_local_override(&base, &local);
        assert_eq!(
            result["skills"],
            json!({"keep": {"path": "/a"}, "add": {"path": "/c"}})
        );
    }

    #[test]
    fn test_editors_deep_merged() {
        let base = doc(json!({"editors": {"zed": {"theme": "dark", "format": true}}}));
        let local = doc(json!({"editors": {"zed": {"theme": "light"}, "cursor": {}}}));

        let result = apply_local_override(&base, &local);
        assert_eq!(
            result["editors"],
            json!({"zed": {"theme": "light", "format": true}, "cursor": {}})
        );
    }

    #[test]
    fn test_scalar_fields_override_if_present() {
        let base = doc(json!({"$schema": "old", "hooks": {"pre": "a"}}));
        let local = doc(json!({"$schema": "new"}));

        let result = apply_local_override(&base, &local);
        assert_eq!(result["$schema"], "new");
        assert_eq!(result["hooks"], json!({"pre": "a"}));
    }

    #[test]
    fn test_hooks_replaced_not_sentinel_merged() {
        let base = doc(json!({"hooks": {"pre": "a", "post": "b"}}));
        let local = doc(json!({"hooks": {"pre": "c"}}));

        let result = apply_local_override(&base, &local);
        // hooks is not a sentinel section: the local value wins wholesale.
        assert_eq!(result["hooks"], json!({"pre": "c"}));
    }

    #[test]
    fn test_base_untouched_when_local_empty() {
        let base = doc(json!({"skills": {"a": 1}, "editors": {"zed": {}}}));
        let local = doc(json!({}));

        let result = apply_local_override(&base, &local);
        assert_eq!(result, base);
    }
}
