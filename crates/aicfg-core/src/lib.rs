//! Configuration inheritance and merge resolution engine
//!
//! Resolves a configuration document's `extends` chain across local
//! files, HTTPS URLs, git repositories and npm packages, merges the graph
//! into one document, and layers an `ai.local.json` override on top.
//!
//! The pipeline: discovery finds a root document; the graph resolver
//! walks its extends chain (classification, fetching, cycle detection,
//! path normalization, deep merging); the resolved document passes the
//! validation seam; the local override merge applies `ai.local.json`; the
//! final `LoadedConfig` goes to the editor projection layer.

pub mod discovery;
pub mod error;
pub mod loader;
pub mod local;
pub mod normalize;
pub mod resolve;
pub mod validate;

pub use discovery::{ConfigSource, DiscoveredConfig, discover};
pub use error::{Error, Result};
pub use loader::{LoadedConfig, load_config};
pub use local::apply_local_override;
pub use normalize::normalize_local_paths;
pub use resolve::Resolver;
pub use validate::{ConfigValidator, StructuralValidator, ValidationIssue};
