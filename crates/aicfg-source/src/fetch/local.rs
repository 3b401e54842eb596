//! Local filesystem fetch

use aicfg_fs::NormalizedPath;

use crate::context::{BaseContext, ResolutionContext};
use crate::error::{Error, Result};
use crate::fetch::{FetchOrigin, Fetched};

/// Read a local extends target relative to the context's base directory.
///
/// The new base context is the parent directory of the resolved file, so
/// references inside the fetched document resolve next to it.
pub(crate) fn fetch(reference: &str, ctx: &ResolutionContext) -> Result<Fetched> {
    let base_dir = match &ctx.base {
        BaseContext::Dir(dir) => dir,
        BaseContext::Url(_) => {
            // Remote-relative references are rerouted to the HTTPS fetch
            // by the resolver before reaching this point.
            return Err(Error::unsupported(
                reference,
                "local paths cannot be read from a remote context",
            ));
        }
    };

    let stripped = reference.strip_prefix("file:").unwrap_or(reference);
    let resolved = NormalizedPath::new(stripped).absolutize(base_dir);
    if !resolved.is_file() {
        return Err(Error::NotFound {
            path: resolved.to_string(),
        });
    }

    let canonical = resolved.canonical_or_absolute();
    tracing::debug!(path = %canonical, "reading local extends target");
    let text = aicfg_fs::io::read_text(&canonical)?;
    let parent = canonical
        .parent()
        .unwrap_or_else(|| NormalizedPath::new("/"));

    Ok(Fetched {
        text,
        context: ResolutionContext::local(parent, ctx.project_root.clone()),
        canonical_key: canonical.to_string(),
        origin: FetchOrigin::LocalFile,
    })
}
