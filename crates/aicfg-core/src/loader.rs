//! Top-level configuration loading
//!
//! Ties the pipeline together: discovery, extends resolution, the
//! validation seam, and the local-override pass.

use aicfg_fs::{NormalizedPath, parse_document};
use aicfg_source::{Fetcher, ResolutionContext, VisitedSet};
use serde_json::Value;

use crate::discovery::{ConfigSource, discover};
use crate::error::{Error, Result};
use crate::local::apply_local_override;
use crate::resolve::Resolver;
use crate::validate::ConfigValidator;

/// A fully loaded, resolved, validated and override-applied config.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Path of the root document
    pub path: NormalizedPath,
    /// The final merged document
    pub config: Value,
    pub source: ConfigSource,
    /// Anchor directory for relative references that downstream
    /// consumers resolve themselves (skills/rules/prompts content)
    pub config_base_dir: NormalizedPath,
    pub warnings: Vec<String>,
    pub local_path: Option<NormalizedPath>,
    pub has_local_overrides: bool,
}

/// Load the nearest configuration at or above `start_dir`.
///
/// Returns `Ok(None)` when no configuration exists. Every other failure —
/// fetch, parse, cycle, validation — is terminal.
pub fn load_config(
    start_dir: &NormalizedPath,
    fetcher: &Fetcher,
    validator: &dyn ConfigValidator,
) -> Result<Option<LoadedConfig>> {
    let Some(discovered) = discover(start_dir)? else {
        return Ok(None);
    };

    let doc = parse_document(&discovered.content, discovered.path.as_str())?;

    let base_dir = discovered.root_dir.clone();
    let ctx = ResolutionContext::local(base_dir.clone(), base_dir.clone());
    let mut visited = VisitedSet::new();
    // Seed with the root itself so a chain leading back here is a cycle.
    visited.insert(discovered.path.canonical_or_absolute().to_string());

    let resolver = Resolver::new(fetcher);
    let resolved = resolver.resolve(doc, &ctx, &mut visited)?;

    validator
        .validate(&resolved)
        .map_err(|issues| Error::Validation { issues })?;

    let (config, has_local_overrides) =
        match (&discovered.local_path, &discovered.local_content) {
            (Some(local_path), Some(local_content)) => {
                let local_doc = parse_document(local_content, local_path.as_str())?;
                if local_doc.contains_key("extends") {
                    return Err(Error::LocalExtendsNotAllowed {
                        path: local_path.to_string(),
                    });
                }
                (apply_local_override(&resolved, &local_doc), true)
            }
            _ => (resolved, false),
        };

    Ok(Some(LoadedConfig {
        path: discovered.path,
        config: Value::Object(config),
        source: discovered.source,
        config_base_dir: base_dir,
        warnings: discovered.warnings,
        local_path: discovered.local_path,
        has_local_overrides,
    }))
}
