//! Cycle-safe extends graph resolution
//!
//! Walks a document's `extends` chain depth-first and sequentially:
//! entries are classified, fetched, recursively resolved, then folded in
//! order so later entries override earlier ones, with the document's own
//! fields layered on top of everything inherited. Sequential processing
//! is load-bearing — the visited set must see earlier siblings before
//! later ones are evaluated, and merge order is order-sensitive.

use aicfg_fs::parse_document;
use aicfg_merge::{PathRules, deep_merge_with};
use aicfg_source::{
    BaseContext, Fetcher, ResolutionContext, SourceRef, VisitedSet, canonical_key, classify,
};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::normalize::normalize_local_paths;

/// Resolves extends chains into a single merged document.
pub struct Resolver<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> Resolver<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Resolve a document's extends chain into one merged document.
    ///
    /// The visited set is shared across the whole resolution, including
    /// sibling entries of an `extends` array; create it fresh per
    /// top-level call. The returned document never contains `extends`.
    pub fn resolve(
        &self,
        doc: Map<String, Value>,
        ctx: &ResolutionContext,
        visited: &mut VisitedSet,
    ) -> Result<Map<String, Value>> {
        let Some(extends_value) = doc.get("extends").cloned() else {
            return Ok(doc);
        };
        let entries = extends_list(&extends_value)?;

        // Fold parents in order: later entries override earlier ones.
        let mut inherited = Value::Object(Map::new());
        let rules = merge_rules();
        for entry in &entries {
            let parent = self.resolve_entry(entry, ctx, visited)?;
            inherited = deep_merge_with(&inherited, &Value::Object(parent), &rules.as_resolver());
        }

        // The document's own fields win over everything inherited.
        let mut own = doc;
        own.remove("extends");
        let merged = deep_merge_with(&inherited, &Value::Object(own), &rules.as_resolver());

        Ok(into_object(merged))
    }

    fn resolve_entry(
        &self,
        reference: &str,
        ctx: &ResolutionContext,
        visited: &mut VisitedSet,
    ) -> Result<Map<String, Value>> {
        let source = reroute_remote_relative(classify(reference), ctx)?;

        let key = canonical_key(&source, ctx)?;
        if visited.contains(&key) {
            let mut chain = visited.chain().to_vec();
            chain.push(key);
            return Err(Error::CircularDependency { chain });
        }
        visited.insert(key.clone());

        tracing::debug!(reference, key = %key, "resolving extends entry");
        let fetched = self.fetcher.fetch(&source, ctx)?;
        let parent_doc = parse_document(&fetched.text, &key)?;
        let resolved = self.resolve(parent_doc, &fetched.context, visited)?;

        // Documents pulled out of a git download or npm package carry
        // relative paths anchored nowhere the parent can resolve them;
        // rewrite before their contribution is merged upward.
        if fetched.origin.needs_path_normalization() {
            if let BaseContext::Dir(dir) = &fetched.context.base {
                return Ok(normalize_local_paths(resolved, dir));
            }
        }
        Ok(resolved)
    }
}

/// Rules applied at every merge during resolution: MCP server entries
/// replace wholesale instead of merging internals, and a stray `extends`
/// never survives into a merged result.
fn merge_rules() -> PathRules {
    PathRules::new().keep("extends").replace("mcp.*")
}

/// Relative-path syntax inside a remote document means "relative to where
/// this document came from", never the local filesystem.
fn reroute_remote_relative(source: SourceRef, ctx: &ResolutionContext) -> Result<SourceRef> {
    if let (BaseContext::Url(base_url), SourceRef::Local(path)) = (&ctx.base, &source) {
        let joined = base_url
            .join(path)
            .map_err(|e| Error::InvalidExtends {
                message: format!("cannot resolve {path} against {base_url}: {e}"),
            })?;
        return Ok(SourceRef::HttpsFile(joined.to_string()));
    }
    Ok(source)
}

/// Normalize an `extends` value to an ordered reference list.
fn extends_list(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(reference) => Ok(vec![reference.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    Error::InvalidExtends {
                        message: format!("array entries must be strings, got {item}"),
                    }
                })
            })
            .collect(),
        other => Err(Error::InvalidExtends {
            message: format!("must be a string or an array of strings, got {other}"),
        }),
    }
}

/// Merging two objects always yields an object; the fallback arm only
/// exists to satisfy the type.
fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
