//! End-to-end local override tests
//!
//! `ai.local.json` semantics are different from the extends merge: map
//! sections replace whole entries (with `false` as a delete sentinel)
//! while `editors` deep-merges.

use aicfg_core::{Error, LoadedConfig, StructuralValidator, load_config};
use aicfg_fs::NormalizedPath;
use aicfg_source::Fetcher;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

fn write_json(root: &std::path::Path, rel: &str, value: &Value) {
    std::fs::write(
        root.join(rel),
        serde_json::to_string_pretty(value).unwrap(),
    )
    .unwrap();
}

fn load(dir: &std::path::Path) -> Result<Option<LoadedConfig>, Error> {
    let fetcher = Fetcher::new();
    load_config(&NormalizedPath::new(dir), &fetcher, &StructuralValidator)
}

#[test]
fn sentinel_deletes_and_wholesale_replaces() {
    let temp = TempDir::new().unwrap();
    write_json(
        temp.path(),
        "ai.json",
        &json!({
            "mcp": {
                "github": {"command": "gh-mcp", "env": {"TOKEN": "shared"}},
                "filesystem": {"command": "fs-mcp"}
            }
        }),
    );
    write_json(
        temp.path(),
        "ai.local.json",
        &json!({
            "mcp": {
                "github": {"command": "my-gh-mcp"},
                "filesystem": false
            }
        }),
    );

    let loaded = load(temp.path()).unwrap().unwrap();
    assert!(loaded.has_local_overrides);
    // Replaced wholesale: the base entry's env does not bleed through.
    assert_eq!(loaded.config["mcp"]["github"], json!({"command": "my-gh-mcp"}));
    // Sentinel delete removes the entry entirely.
    assert!(loaded.config["mcp"].get("filesystem").is_none());
}

#[test]
fn override_applies_after_extends_resolution() {
    let temp = TempDir::new().unwrap();
    write_json(
        temp.path(),
        "base.json",
        &json!({"skills": {"inherited": {"path": "/shared/skill"}}}),
    );
    write_json(temp.path(), "ai.json", &json!({"extends": "./base.json"}));
    write_json(
        temp.path(),
        "ai.local.json",
        &json!({"skills": {"inherited": false}}),
    );

    let loaded = load(temp.path()).unwrap().unwrap();
    // The inherited entry exists in the resolved base, and the local
    // sentinel still removes it.
    assert_eq!(loaded.config["skills"], json!({}));
}

#[test]
fn editors_section_deep_merges() {
    let temp = TempDir::new().unwrap();
    write_json(
        temp.path(),
        "ai.json",
        &json!({"editors": {"zed": {"enabled": true, "inlineCompletions": true}}}),
    );
    write_json(
        temp.path(),
        "ai.local.json",
        &json!({"editors": {"zed": {"inlineCompletions": false}}}),
    );

    let loaded = load(temp.path()).unwrap().unwrap();
    assert_eq!(
        loaded.config["editors"]["zed"],
        json!({"enabled": true, "inlineCompletions": false})
    );
}

#[test]
fn local_file_with_extends_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "ai.json", &json!({}));
    write_json(
        temp.path(),
        "ai.local.json",
        &json!({"extends": "./base.json"}),
    );

    let err = load(temp.path()).unwrap_err();
    assert!(matches!(err, Error::LocalExtendsNotAllowed { .. }));
}

#[test]
fn no_local_file_leaves_flag_unset() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "ai.json", &json!({"skills": {}}));

    let loaded = load(temp.path()).unwrap().unwrap();
    assert!(!loaded.has_local_overrides);
    assert!(loaded.local_path.is_none());
}
