//! Source classification and multi-source fetching for aicfg
//!
//! A configuration's `extends` entries may point at local files, HTTPS
//! URLs, git repositories (shorthand or bare repo URL), or npm packages.
//! This crate classifies those reference strings, resolves them against a
//! resolution context, and fetches their raw text through one contract per
//! source kind.

pub mod classify;
pub mod context;
pub mod error;
pub mod fetch;

pub use classify::{GitProvider, SourceRef, classify};
pub use context::{BaseContext, ResolutionContext, Url, VisitedSet, canonical_key};
pub use error::{Error, Result};
pub use fetch::{DownloadDir, FetchOrigin, Fetched, Fetcher, TempDownloadDir};
