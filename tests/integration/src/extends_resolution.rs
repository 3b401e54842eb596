//! End-to-end extends resolution tests
//!
//! These drive the full pipeline through `load_config` over real
//! temporary directories: discovery, classification, fetching, cycle
//! detection, path normalization and merging.

use aicfg_core::{Error, LoadedConfig, StructuralValidator, load_config};
use aicfg_fs::NormalizedPath;
use aicfg_source::Fetcher;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;

fn write_json(root: &std::path::Path, rel: &str, value: &Value) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn load(dir: &std::path::Path) -> Result<Option<LoadedConfig>, Error> {
    let fetcher = Fetcher::new();
    load_config(&NormalizedPath::new(dir), &fetcher, &StructuralValidator)
}

#[test]
fn priority_ordering_across_extends_array() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "b.json", &json!({"skills": {"x": 1}}));
    write_json(temp.path(), "c.json", &json!({"skills": {"x": 2, "y": 3}}));
    write_json(
        temp.path(),
        "ai.json",
        &json!({"extends": ["./b.json", "./c.json"], "skills": {"z": 4}}),
    );

    let loaded = load(temp.path()).unwrap().unwrap();
    assert_eq!(loaded.config["skills"], json!({"x": 2, "y": 3, "z": 4}));
    assert!(loaded.config.get("extends").is_none());
}

#[test]
fn chain_spanning_directories_resolves_relative_to_each_hop() {
    let temp = TempDir::new().unwrap();
    write_json(
        temp.path(),
        "configs/org.json",
        &json!({"extends": "./defaults/base.json", "rules": {"org": {"level": "error"}}}),
    );
    write_json(
        temp.path(),
        "configs/defaults/base.json",
        &json!({"rules": {"base": {"level": "warn"}}, "editors": {"zed": {"enabled": true}}}),
    );
    write_json(
        temp.path(),
        "ai.json",
        &json!({"extends": "./configs/org.json", "rules": {"mine": {"level": "off"}}}),
    );

    let loaded = load(temp.path()).unwrap().unwrap();
    let rules = loaded.config["rules"].as_object().unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(loaded.config["editors"]["zed"]["enabled"], true);
}

#[test]
fn arrays_replace_wholesale_through_the_chain() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "base.json", &json!({"hooks": {"pre": ["a", "b"]}}));
    write_json(
        temp.path(),
        "ai.json",
        &json!({"extends": "./base.json", "hooks": {"pre": ["c"]}}),
    );

    let loaded = load(temp.path()).unwrap().unwrap();
    assert_eq!(loaded.config["hooks"]["pre"], json!(["c"]));
}

#[test]
fn cycle_across_files_reports_full_chain() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "ai.json", &json!({"extends": "./a.json"}));
    write_json(temp.path(), "a.json", &json!({"extends": "./b.json"}));
    write_json(temp.path(), "b.json", &json!({"extends": "./a.json"}));

    let err = load(temp.path()).unwrap_err();
    match err {
        Error::CircularDependency { chain } => {
            assert!(chain.iter().any(|k| k.ends_with("/a.json")));
            assert!(chain.iter().any(|k| k.ends_with("/b.json")));
            assert_eq!(
                chain.last(),
                chain.iter().find(|k| k.ends_with("/a.json"))
            );
        }
        other => panic!("expected CircularDependency, got {other}"),
    }
}

#[test]
fn equivalent_spellings_of_one_file_collide() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "shared.json", &json!({"skills": {}}));
    write_json(
        temp.path(),
        "ai.json",
        &json!({"extends": ["./shared.json", "shared.json"]}),
    );

    let err = load(temp.path()).unwrap_err();
    assert!(matches!(err, Error::CircularDependency { .. }));
}

#[test]
fn npm_extends_normalizes_embedded_paths() {
    let temp = TempDir::new().unwrap();
    let package_root = temp.path().join("node_modules/@acme/ai-base");
    std::fs::create_dir_all(&package_root).unwrap();
    write_json(
        &package_root,
        "ai.json",
        &json!({
            "skills": {"review": {"path": "./skills/review.md"}},
            "prompts": {"fix": "prompts/fix.md"},
            "mcp": {"github": {"command": "gh-mcp"}}
        }),
    );
    write_json(temp.path(), "ai.json", &json!({"extends": "@acme/ai-base"}));

    let loaded = load(temp.path()).unwrap().unwrap();

    // Paths inside the package are rewritten to absolute locations inside
    // the installed package, not left as package-relative strings.
    let skill_path = loaded.config["skills"]["review"]["path"].as_str().unwrap();
    assert!(skill_path.ends_with("node_modules/@acme/ai-base/skills/review.md"));
    assert!(NormalizedPath::new(skill_path).is_absolute());

    let prompt_path = loaded.config["prompts"]["fix"].as_str().unwrap();
    assert!(prompt_path.ends_with("node_modules/@acme/ai-base/prompts/fix.md"));

    // mcp is not a path-bearing section and passes through unchanged.
    assert_eq!(loaded.config["mcp"]["github"]["command"], "gh-mcp");
}

#[test]
fn missing_npm_package_aborts_resolution() {
    let temp = TempDir::new().unwrap();
    write_json(temp.path(), "ai.json", &json!({"extends": "@acme/not-installed"}));

    let err = load(temp.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Source(aicfg_source::Error::PackageResolution { .. })
    ));
}

#[test]
fn plain_http_extends_rejected() {
    let temp = TempDir::new().unwrap();
    write_json(
        temp.path(),
        "ai.json",
        &json!({"extends": "http://example.com/ai.json"}),
    );

    let err = load(temp.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Source(aicfg_source::Error::UnsupportedSource { .. })
    ));
}

#[test]
fn config_base_dir_anchors_remaining_relative_references() {
    let temp = TempDir::new().unwrap();
    write_json(
        temp.path(),
        "ai.json",
        &json!({"skills": {"local": {"path": "./skills/local.md"}}}),
    );

    let loaded = load(temp.path()).unwrap().unwrap();
    // Root-local relative paths are left alone; the base dir tells the
    // projection layer what to resolve them against.
    assert_eq!(loaded.config["skills"]["local"]["path"], "./skills/local.md");
    assert_eq!(
        loaded.config_base_dir,
        NormalizedPath::new(temp.path()).canonical_or_absolute()
    );
}
