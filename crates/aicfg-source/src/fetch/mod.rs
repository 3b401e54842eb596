//! Multi-source fetching
//!
//! One fetch implementation per source kind, behind a single contract:
//! given a classified reference and the current resolution context, return
//! the raw document text, the new base context the fetched document's own
//! relative references resolve against, and the canonical key identifying
//! the concrete resource.

use std::cell::RefCell;
use std::path::PathBuf;

use crate::classify::SourceRef;
use crate::context::{ResolutionContext, canonical_key};
use crate::error::{Error, Result};

mod git;
pub(crate) mod https;
mod local;
mod npm;

/// Where fetched bytes came from.
///
/// The resolver uses this to decide whether embedded local paths need
/// rewriting: documents pulled out of a git download or an npm package
/// live in a directory the parent document knows nothing about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    LocalFile,
    Https,
    GitDownload,
    NpmPackage,
}

impl FetchOrigin {
    /// True for origins whose relative paths must be absolutized before
    /// the document's contribution is merged upward.
    pub fn needs_path_normalization(&self) -> bool {
        matches!(self, FetchOrigin::GitDownload | FetchOrigin::NpmPackage)
    }
}

/// The result of fetching one extends source.
#[derive(Debug)]
pub struct Fetched {
    /// Raw document text, not yet parsed
    pub text: String,
    /// Context the fetched document's own references resolve against
    pub context: ResolutionContext,
    /// Canonical key of the concrete resource that was read
    pub canonical_key: String,
    pub origin: FetchOrigin,
}

/// Provider of download destinations for git repository fetches.
///
/// Injected rather than read from the process-wide temp path so tests can
/// point downloads at a controlled location.
pub trait DownloadDir {
    fn create(&self) -> Result<PathBuf>;
}

/// Default provider backed by `tempfile::TempDir`.
///
/// Created directories are held until the provider is dropped, so
/// downloaded trees stay readable for the lifetime of a resolution (the
/// merged document carries absolute paths into them).
#[derive(Default)]
pub struct TempDownloadDir {
    keep: RefCell<Vec<tempfile::TempDir>>,
}

impl TempDownloadDir {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DownloadDir for TempDownloadDir {
    fn create(&self) -> Result<PathBuf> {
        let dir = tempfile::TempDir::new()
            .map_err(|e| Error::Fs(aicfg_fs::Error::io(std::env::temp_dir(), e)))?;
        let path = dir.path().to_path_buf();
        self.keep.borrow_mut().push(dir);
        Ok(path)
    }
}

/// Fetches classified sources.
pub struct Fetcher {
    http: reqwest::blocking::Client,
    downloads: Box<dyn DownloadDir>,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_download_dir(Box::new(TempDownloadDir::new()))
    }

    pub fn with_download_dir(downloads: Box<dyn DownloadDir>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            downloads,
        }
    }

    /// Fetch the raw text behind a classified reference.
    ///
    /// Every failure is terminal: there are no retries and no partial
    /// results at this layer.
    pub fn fetch(&self, source: &SourceRef, ctx: &ResolutionContext) -> Result<Fetched> {
        match source {
            SourceRef::Local(path) => local::fetch(path, ctx),
            SourceRef::HttpsFile(url) => https::fetch_file(&self.http, url, ctx),
            SourceRef::HttpsRepo(url) => {
                let dest = self.downloads.create()?;
                git::fetch_repo(&dest, url, None, None, canonical_key(source, ctx)?, ctx)
            }
            SourceRef::GitShorthand {
                provider,
                owner,
                repo,
                reference,
                subpath,
            } => {
                if owner.is_empty() || repo.is_empty() {
                    return Err(Error::unsupported(
                        source.display_name(),
                        "git shorthand must name owner/repo",
                    ));
                }
                let clone_url =
                    format!("https://{}/{owner}/{repo}.git", provider.host());
                let dest = self.downloads.create()?;
                git::fetch_repo(
                    &dest,
                    &clone_url,
                    reference.as_deref(),
                    subpath.as_deref(),
                    canonical_key(source, ctx)?,
                    ctx,
                )
            }
            SourceRef::Npm(package) => npm::fetch(package, ctx),
            SourceRef::HttpUnsupported(url) => Err(Error::unsupported(
                url.clone(),
                "plain HTTP is not allowed; use https://",
            )),
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
