//! Error types for aicfg-source

/// Result type for aicfg-source operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while classifying or fetching extends sources
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A local extends target does not exist on disk
    #[error("Extends target not found: {path}")]
    NotFound { path: String },

    /// Network-layer failure fetching an HTTPS or git source
    #[error("Failed to fetch {reference}: {message}")]
    RemoteFetch { reference: String, message: String },

    /// The reference uses a source kind that is rejected or disallowed
    #[error("Unsupported source {reference}: {reason}")]
    UnsupportedSource { reference: String, reason: String },

    /// An npm-classified reference names a package that is not installed
    #[error(
        "Package {package} is not installed; install it with your package manager before extending from it"
    )]
    PackageResolution { package: String },

    /// Filesystem error from aicfg-fs
    #[error(transparent)]
    Fs(#[from] aicfg_fs::Error),

    /// Git error from git2
    #[error(transparent)]
    Git(#[from] git2::Error),
}

impl Error {
    pub fn remote_fetch(reference: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::RemoteFetch {
            reference: reference.into(),
            message: message.to_string(),
        }
    }

    pub fn unsupported(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedSource {
            reference: reference.into(),
            reason: reason.into(),
        }
    }
}
