//! Generic deep-merge engine with per-path resolution rules
//!
//! Default semantics: object values merge field by field, everything else
//! (arrays included) is replaced wholesale by the overlay side. A resolver
//! callback can override the default per key path.

pub mod merge;
pub mod rules;

pub use merge::{MergeSite, deep_merge, deep_merge_with};
pub use rules::{MergeResolution, PathRules};
