//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Configuration documents travel between machines and get embedded in
/// merged JSON, so all paths are stored with forward slashes and only
/// converted to platform-native form at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Check if this path is absolute.
    ///
    /// Recognizes POSIX roots (`/`) and Windows drive prefixes (`C:/`),
    /// regardless of the host platform, since paths embedded in shared
    /// configuration may have been written elsewhere.
    pub fn is_absolute(&self) -> bool {
        if self.inner.starts_with('/') {
            return true;
        }
        let mut chars = self.inner.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(drive), Some(':'), Some('/')) if drive.is_ascii_alphabetic()
        )
    }

    /// Resolve this path against a base directory, collapsing `.` and `..`
    /// segments lexically.
    ///
    /// Already-absolute paths are normalized but not re-anchored.
    pub fn absolutize(&self, base: &NormalizedPath) -> Self {
        let combined = if self.is_absolute() {
            self.inner.clone()
        } else {
            base.join(&self.inner).inner
        };
        Self {
            inner: collapse_dots(&combined),
        }
    }

    /// Canonicalize via the filesystem, falling back to the lexically
    /// normalized form when the path does not exist.
    ///
    /// Used for visited-set keys: two references to the same on-disk file
    /// must produce the same key even when one goes through a symlink.
    pub fn canonical_or_absolute(&self) -> Self {
        match dunce::canonicalize(self.to_native()) {
            Ok(canonical) => Self::new(canonical),
            Err(_) => Self {
                inner: collapse_dots(&self.inner),
            },
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }
}

/// Collapse `.` and `..` segments without touching the filesystem.
fn collapse_dots(path: &str) -> String {
    let absolute = path.starts_with('/');
    let drive = {
        let mut chars = path.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(d), Some(':'), Some('/')) if d.is_ascii_alphabetic() => {
                Some(&path[..2])
            }
            _ => None,
        }
    };
    let body = drive.map_or(path, |d| &path[d.len()..]);

    let mut segments: Vec<&str> = Vec::new();
    for segment in body.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute && drive.is_none() {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match drive {
        Some(d) => format!("{d}/{joined}"),
        None if absolute => format!("/{joined}"),
        None if joined.is_empty() => ".".to_string(),
        None => joined,
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
