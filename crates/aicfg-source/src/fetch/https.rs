//! HTTPS file fetch

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Url;
use reqwest::blocking::Client;

use crate::context::ResolutionContext;
use crate::error::{Error, Result};
use crate::fetch::{FetchOrigin, Fetched};

/// Bounded timeout for each HTTPS request; a stalled server surfaces as a
/// fetch failure, not a hang.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

static GITHUB_BLOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://github\.com/([^/]+)/([^/]+)/blob/(.+)$").unwrap()
});
static BITBUCKET_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://bitbucket\.org/([^/]+)/([^/]+)/src/(.+)$").unwrap()
});

/// Convert web-UI blob URLs to their raw-content equivalents.
///
/// Users paste browser URLs; fetching those returns HTML. Raw URLs and
/// anything unrecognized pass through unchanged.
pub(crate) fn to_raw_url(url: &str) -> String {
    if let Some(caps) = GITHUB_BLOB.captures(url) {
        return format!(
            "https://raw.githubusercontent.com/{}/{}/{}",
            &caps[1], &caps[2], &caps[3]
        );
    }
    if url.starts_with("https://gitlab.com/") && url.contains("/-/blob/") {
        return url.replacen("/-/blob/", "/-/raw/", 1);
    }
    if let Some(caps) = BITBUCKET_SRC.captures(url) {
        return format!(
            "https://bitbucket.org/{}/{}/raw/{}",
            &caps[1], &caps[2], &caps[3]
        );
    }
    url.to_string()
}

/// GET a single configuration file over HTTPS.
///
/// The new base context is the URL with its last path segment stripped, so
/// relative references inside the fetched document resolve as siblings.
pub(crate) fn fetch_file(client: &Client, url_str: &str, ctx: &ResolutionContext) -> Result<Fetched> {
    let raw = to_raw_url(url_str);
    let url = Url::parse(&raw).map_err(|e| Error::remote_fetch(url_str, e))?;

    tracing::debug!(url = %url, "fetching remote config");
    let response = client
        .get(url.clone())
        .timeout(HTTP_TIMEOUT)
        .send()
        .map_err(|e| Error::remote_fetch(url_str, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::remote_fetch(url_str, format!("HTTP {status}")));
    }
    let text = response
        .text()
        .map_err(|e| Error::remote_fetch(url_str, e))?;

    // Directory-equivalent of the file URL: strip the last segment.
    let base_url = url
        .join(".")
        .map_err(|e| Error::remote_fetch(url_str, e))?;

    Ok(Fetched {
        text,
        context: ResolutionContext::remote(base_url, ctx.project_root.clone()),
        canonical_key: raw,
        origin: FetchOrigin::Https,
    })
}
