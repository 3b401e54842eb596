//! Resolution contexts, visited sets, and canonical keys
//!
//! A `ResolutionContext` anchors resolution of the relative references
//! found inside the document currently being processed. It changes at
//! every hop of the extends chain; the `VisitedSet` does not — it is
//! threaded by mutable reference through the whole resolution so sibling
//! branches observe each other's visits.

use aicfg_fs::NormalizedPath;

use crate::classify::SourceRef;
use crate::error::{Error, Result};
use crate::fetch::https::to_raw_url;

pub use reqwest::Url;

/// The base location against which a document's relative references
/// resolve: a directory for documents read from disk, a URL for documents
/// fetched over HTTPS.
#[derive(Debug, Clone)]
pub enum BaseContext {
    Dir(NormalizedPath),
    Url(Url),
}

impl BaseContext {
    pub fn is_remote(&self) -> bool {
        matches!(self, BaseContext::Url(_))
    }

    /// Human-readable form for logs and errors.
    pub fn display(&self) -> String {
        match self {
            BaseContext::Dir(dir) => dir.to_string(),
            BaseContext::Url(url) => url.to_string(),
        }
    }
}

/// Everything needed to resolve references found inside one document.
///
/// Cloned per recursive hop; only the visited set (held separately by the
/// resolver) is shared across branches.
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    pub base: BaseContext,
    pub project_root: NormalizedPath,
}

impl ResolutionContext {
    pub fn local(base_dir: NormalizedPath, project_root: NormalizedPath) -> Self {
        Self {
            base: BaseContext::Dir(base_dir),
            project_root,
        }
    }

    pub fn remote(base_url: Url, project_root: NormalizedPath) -> Self {
        Self {
            base: BaseContext::Url(base_url),
            project_root,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.base.is_remote()
    }
}

/// Ordered, append-only record of canonical keys visited during one
/// top-level resolution.
///
/// Ordering is kept so a cycle error can show the exact loop.
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: Vec<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    /// The visit chain in order, for cycle diagnostics.
    pub fn chain(&self) -> &[String] {
        &self.keys
    }
}

/// Compute the canonical key identifying the concrete resource a source
/// reference resolves to under the given context.
///
/// Two different reference strings that reach the same resource must
/// collide here, or cycle detection misses legitimately-equivalent
/// aliases (`./b.json` vs `b.json` vs the absolute path).
pub fn canonical_key(source: &SourceRef, ctx: &ResolutionContext) -> Result<String> {
    match source {
        SourceRef::Local(path) => {
            let base_dir = match &ctx.base {
                BaseContext::Dir(dir) => dir,
                BaseContext::Url(_) => {
                    return Err(Error::unsupported(
                        path.clone(),
                        "local paths inside a remote document must be resolved as URLs",
                    ));
                }
            };
            let stripped = path.strip_prefix("file:").unwrap_or(path);
            let resolved = NormalizedPath::new(stripped).absolutize(base_dir);
            Ok(resolved.canonical_or_absolute().to_string())
        }
        SourceRef::HttpsFile(url) => Ok(to_raw_url(url)),
        SourceRef::HttpsRepo(url) => Ok(url.trim_end_matches('/').to_string()),
        SourceRef::GitShorthand {
            provider,
            owner,
            repo,
            reference,
            subpath,
        } => {
            let mut key = format!("{provider}:{owner}/{repo}");
            if let Some(r) = reference {
                key.push('#');
                key.push_str(r);
            }
            if let Some(sub) = subpath {
                key.push(':');
                key.push_str(sub);
            }
            Ok(key)
        }
        SourceRef::Npm(package) => Ok(package.clone()),
        SourceRef::HttpUnsupported(url) => Err(Error::unsupported(
            url.clone(),
            "plain HTTP is not allowed; use https://",
        )),
    }
}
