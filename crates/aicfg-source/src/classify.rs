//! Classification of extends reference strings
//!
//! `classify` is a pure, total function over reference strings. Ordering
//! matters: a string like `pkg/file.md` is structurally ambiguous between a
//! local relative path and an npm specifier, and the known-extension check
//! is the tiebreaker. Keep the match order exactly as written.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Extensions that mark an implicit relative path as local.
///
/// Shared with the skills/rules content loaders, whose payloads are
/// markdown, so markdown extensions count as path-shaped.
const LOCAL_EXTENSIONS: [&str; 4] = [".json", ".jsonc", ".md", ".mdc"];

/// Web-UI URL patterns that point at a file (or tree) inside a hosted
/// repository rather than at the repository itself.
static WEB_UI_FILE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^https://github\.com/[^/]+/[^/]+/(blob|tree)/").unwrap(),
        Regex::new(r"^https://gitlab\.com/.+/-/(blob|tree)/").unwrap(),
        Regex::new(r"^https://bitbucket\.org/[^/]+/[^/]+/src/").unwrap(),
    ]
});

/// Hosted git providers supported by the shorthand syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitProvider {
    Github,
    Gitlab,
    Bitbucket,
}

impl GitProvider {
    /// The shorthand prefix, including the trailing colon.
    pub fn prefix(&self) -> &'static str {
        match self {
            GitProvider::Github => "github:",
            GitProvider::Gitlab => "gitlab:",
            GitProvider::Bitbucket => "bitbucket:",
        }
    }

    /// Hostname used to build a clone URL.
    pub fn host(&self) -> &'static str {
        match self {
            GitProvider::Github => "github.com",
            GitProvider::Gitlab => "gitlab.com",
            GitProvider::Bitbucket => "bitbucket.org",
        }
    }
}

impl fmt::Display for GitProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix().trim_end_matches(':'))
    }
}

/// A classified extends reference.
///
/// Adding a new source kind means adding a variant here; every dispatch
/// over sources is an exhaustive match, so the compiler finds the spots
/// that need updating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Relative or absolute filesystem path
    Local(String),
    /// HTTPS URL pointing at a single file
    HttpsFile(String),
    /// HTTPS URL pointing at a repository root
    HttpsRepo(String),
    /// `provider:owner/repo[/subpath][#ref[:subpath]]` shorthand
    GitShorthand {
        provider: GitProvider,
        owner: String,
        repo: String,
        reference: Option<String>,
        subpath: Option<String>,
    },
    /// Bare or scoped npm package name
    Npm(String),
    /// Plain-HTTP URL, rejected for transport security
    HttpUnsupported(String),
}

impl SourceRef {
    /// The original or reconstructed reference string, for error messages.
    pub fn display_name(&self) -> String {
        match self {
            SourceRef::Local(path) => path.clone(),
            SourceRef::HttpsFile(url) | SourceRef::HttpsRepo(url) => url.clone(),
            SourceRef::GitShorthand {
                provider,
                owner,
                repo,
                reference,
                subpath,
            } => {
                let mut s = format!("{}:{owner}/{repo}", provider);
                if let Some(sub) = subpath {
                    s.push('/');
                    s.push_str(sub);
                }
                if let Some(r) = reference {
                    s.push('#');
                    s.push_str(r);
                }
                s
            }
            SourceRef::Npm(package) => package.clone(),
            SourceRef::HttpUnsupported(url) => url.clone(),
        }
    }
}

/// Classify a reference string into its source kind.
///
/// Pure, total, and deterministic: no filesystem or network access, and
/// the same input always yields the same variant.
pub fn classify(reference: &str) -> SourceRef {
    for provider in [GitProvider::Github, GitProvider::Gitlab, GitProvider::Bitbucket] {
        if let Some(rest) = reference.strip_prefix(provider.prefix()) {
            return parse_git_shorthand(provider, rest);
        }
    }

    if reference.starts_with("https://") {
        if is_https_file(reference) {
            return SourceRef::HttpsFile(reference.to_string());
        }
        return SourceRef::HttpsRepo(reference.to_string());
    }

    if reference.starts_with("http://") {
        return SourceRef::HttpUnsupported(reference.to_string());
    }

    if is_explicit_path(reference) || has_local_extension(reference) {
        return SourceRef::Local(reference.to_string());
    }

    SourceRef::Npm(reference.to_string())
}

fn is_https_file(url: &str) -> bool {
    url.ends_with(".json") || WEB_UI_FILE_PATTERNS.iter().any(|re| re.is_match(url))
}

fn is_explicit_path(reference: &str) -> bool {
    if reference.starts_with("./")
        || reference.starts_with("../")
        || reference.starts_with('/')
        || reference.starts_with("file:")
    {
        return true;
    }
    // Windows drive prefix (C:/ or C:\)
    let mut chars = reference.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(drive), Some(':'), Some('/' | '\\')) if drive.is_ascii_alphabetic()
    )
}

fn has_local_extension(reference: &str) -> bool {
    LOCAL_EXTENSIONS.iter().any(|ext| reference.ends_with(ext))
}

/// Parse `owner/repo[/subpath][#ref[:subpath]]` after a provider prefix.
///
/// A subpath given in the `#ref:subpath` fragment wins over one given as
/// trailing path segments.
fn parse_git_shorthand(provider: GitProvider, rest: &str) -> SourceRef {
    let (path_part, fragment) = match rest.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (rest, None),
    };

    let (reference, fragment_subpath) = match fragment {
        Some(frag) => match frag.split_once(':') {
            Some((r, sub)) => (non_empty(r), non_empty(sub)),
            None => (non_empty(frag), None),
        },
        None => (None, None),
    };

    let mut segments = path_part.splitn(3, '/');
    let owner = segments.next().unwrap_or_default().to_string();
    let repo = segments.next().unwrap_or_default().to_string();
    let path_subpath = segments.next().and_then(non_empty);

    SourceRef::GitShorthand {
        provider,
        owner,
        repo,
        reference,
        subpath: fragment_subpath.or(path_subpath),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
