//! Per-path merge resolution rules

use crate::merge::MergeSite;

/// The outcome a resolver may dictate for a single merge site.
///
/// An explicit three-value contract: `Default` means "no opinion, apply
/// standard behavior", not a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeResolution {
    /// Ignore the overlay value; the base value stands
    Keep,
    /// Take the overlay value wholesale, skipping recursive merge
    Replace,
    /// Fall through to standard recursive behavior
    Default,
}

/// Declarative merge rules keyed by dotted path.
///
/// A `*` matches exactly one path segment, so `mcp.*` covers every
/// immediate child of `mcp` without hand-writing per-key logic, and
/// without also matching `mcp.github.env`.
#[derive(Debug, Default)]
pub struct PathRules {
    rules: Vec<(String, MergeResolution)>,
}

impl PathRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule for a dotted path pattern.
    pub fn rule(mut self, pattern: impl Into<String>, resolution: MergeResolution) -> Self {
        self.rules.push((pattern.into(), resolution));
        self
    }

    /// Shorthand for a `Replace` rule.
    pub fn replace(self, pattern: impl Into<String>) -> Self {
        self.rule(pattern, MergeResolution::Replace)
    }

    /// Shorthand for a `Keep` rule.
    pub fn keep(self, pattern: impl Into<String>) -> Self {
        self.rule(pattern, MergeResolution::Keep)
    }

    /// Look up the resolution for a concrete dotted path.
    ///
    /// First matching rule wins; no rule means `Default`.
    pub fn resolve(&self, path: &str) -> MergeResolution {
        for (pattern, resolution) in &self.rules {
            if pattern_matches(pattern, path) {
                return *resolution;
            }
        }
        MergeResolution::Default
    }

    /// Adapt the rule set to the resolver callback shape `deep_merge_with`
    /// expects.
    pub fn as_resolver(&self) -> impl Fn(&MergeSite) -> MergeResolution + '_ {
        |site: &MergeSite| self.resolve(site.path)
    }
}

fn pattern_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('.');
    let mut path_segments = path.split('.');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) if p == "*" || p == s => continue,
            _ => return false,
        }
    }
}
