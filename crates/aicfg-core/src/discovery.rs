//! Root configuration discovery
//!
//! Walks upward from a starting directory looking for `ai.json` or a
//! `package.json` carrying a top-level `"ai"` object. The first directory
//! with either wins; `ai.local.json` next to it is picked up when
//! present.

use aicfg_fs::{
    CONFIG_FILE_NAME, LOCAL_CONFIG_FILE_NAME, NormalizedPath, PACKAGE_JSON, io, strip_comments,
};
use serde_json::Value;

use crate::error::Result;

/// Where the root document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// A standalone `ai.json`
    File,
    /// The `"ai"` object inside `package.json`
    PackageJson,
}

/// A discovered root configuration, not yet parsed or resolved.
#[derive(Debug)]
pub struct DiscoveredConfig {
    /// Path of the file the text came from
    pub path: NormalizedPath,
    /// Raw JSONC text of the root document
    pub content: String,
    pub source: ConfigSource,
    /// Directory the config lives in; anchors all relative references
    pub root_dir: NormalizedPath,
    pub local_path: Option<NormalizedPath>,
    pub local_content: Option<String>,
    /// Non-fatal findings surfaced to the caller
    pub warnings: Vec<String>,
}

/// Find the nearest root configuration at or above `start_dir`.
pub fn discover(start_dir: &NormalizedPath) -> Result<Option<DiscoveredConfig>> {
    let mut dir = Some(start_dir.canonical_or_absolute());
    while let Some(current) = dir {
        if let Some(found) = discover_in(&current)? {
            return Ok(Some(found));
        }
        dir = current.parent();
    }
    Ok(None)
}

fn discover_in(dir: &NormalizedPath) -> Result<Option<DiscoveredConfig>> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let package_path = dir.join(PACKAGE_JSON);

    let package_ai = package_ai_field(&package_path)?;
    let mut warnings = Vec::new();

    let (path, content, source) = if config_path.is_file() {
        if package_ai.is_some() {
            warnings.push(format!(
                "both {CONFIG_FILE_NAME} and a package.json \"ai\" field exist in {dir}; using {CONFIG_FILE_NAME}"
            ));
        }
        let content = io::read_text(&config_path)?;
        (config_path, content, ConfigSource::File)
    } else if let Some(ai_json) = package_ai {
        (package_path, ai_json, ConfigSource::PackageJson)
    } else {
        return Ok(None);
    };

    let local_candidate = dir.join(LOCAL_CONFIG_FILE_NAME);
    let (local_path, local_content) = if local_candidate.is_file() {
        let text = io::read_text(&local_candidate)?;
        (Some(local_candidate), Some(text))
    } else {
        (None, None)
    };

    tracing::debug!(path = %path, ?source, "discovered root config");
    Ok(Some(DiscoveredConfig {
        path,
        content,
        source,
        root_dir: dir.clone(),
        local_path,
        local_content,
        warnings,
    }))
}

/// The serialized `"ai"` object from package.json, if the file exists and
/// carries one.
///
/// package.json is strict JSON, but comments are tolerated for symmetry
/// with `ai.json`. A package.json that fails to parse is skipped rather
/// than failing discovery — it may be unrelated to this tool entirely.
fn package_ai_field(package_path: &NormalizedPath) -> Result<Option<String>> {
    if !package_path.is_file() {
        return Ok(None);
    }
    let text = io::read_text(package_path)?;
    let parsed: Value = match serde_json::from_str(&strip_comments(&text)) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path = %package_path, error = %e, "skipping unparseable package.json");
            return Ok(None);
        }
    };
    match parsed.get("ai") {
        Some(ai) if ai.is_object() => Ok(Some(serde_json::to_string(ai)?)),
        _ => Ok(None),
    }
}
