//! Git repository download fetch
//!
//! Shorthand (`github:owner/repo`) and bare-repo HTTPS sources are
//! downloaded into a provided directory, after which the config file
//! inside the tree is read exactly like a local fetch rooted there.

use std::path::Path;

use git2::Repository;
use git2::build::CheckoutBuilder;

use aicfg_fs::{CONFIG_FILE_NAME, NormalizedPath};

use crate::context::ResolutionContext;
use crate::error::{Error, Result};
use crate::fetch::{FetchOrigin, Fetched};

/// Download a repository and read the config file inside it.
///
/// `reference` selects a branch, tag, or commit (default branch if None);
/// `subpath` selects a directory inside the tree whose `ai.json` is the
/// target. The returned context is rooted at the config file's directory
/// inside the download, so relative paths in the fetched document resolve
/// into the downloaded tree.
pub(crate) fn fetch_repo(
    dest: &Path,
    clone_url: &str,
    reference: Option<&str>,
    subpath: Option<&str>,
    canonical_key: String,
    ctx: &ResolutionContext,
) -> Result<Fetched> {
    download(dest, clone_url, reference)?;

    let root = NormalizedPath::new(dest);
    let config_dir = match subpath {
        Some(sub) => root.join(sub),
        None => root,
    };
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    if !config_path.is_file() {
        return Err(Error::NotFound {
            path: format!("{CONFIG_FILE_NAME} in downloaded repository {clone_url} ({config_path})"),
        });
    }

    let text = aicfg_fs::io::read_text(&config_path)?;

    Ok(Fetched {
        text,
        context: ResolutionContext::local(config_dir, ctx.project_root.clone()),
        canonical_key,
        origin: FetchOrigin::GitDownload,
    })
}

/// Shallow-fetch `reference` (or HEAD) from `clone_url` into `dest` and
/// check out the resulting commit.
fn download(dest: &Path, clone_url: &str, reference: Option<&str>) -> Result<()> {
    tracing::debug!(url = clone_url, ?reference, dest = %dest.display(), "downloading repository");

    let repo = Repository::init(dest)?;
    let mut remote = repo.remote_anonymous(clone_url)?;

    let mut fetch_opts = git2::FetchOptions::new();
    if clone_url.starts_with("https://") {
        // The local-path transport does not support shallow transfer.
        fetch_opts.depth(1);
    }
    let refspec = reference.unwrap_or("HEAD");
    remote
        .fetch(&[refspec], Some(&mut fetch_opts), None)
        .map_err(|e| Error::remote_fetch(clone_url, e))?;

    let fetch_head = repo
        .find_reference("FETCH_HEAD")
        .map_err(|e| Error::remote_fetch(clone_url, e))?;
    let commit = fetch_head
        .peel_to_commit()
        .map_err(|e| Error::remote_fetch(clone_url, e))?;

    let mut checkout = CheckoutBuilder::new();
    checkout.force();
    repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
    repo.set_head_detached(commit.id())?;

    Ok(())
}
