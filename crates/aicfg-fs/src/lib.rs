//! Filesystem primitives for aicfg
//!
//! Provides normalized path handling, atomic writes, and reading of
//! JSON-with-comments configuration documents.

pub mod constants;
pub mod error;
pub mod io;
pub mod jsonc;
pub mod path;

pub use constants::{CONFIG_FILE_NAME, LOCAL_CONFIG_FILE_NAME, PACKAGE_JSON};
pub use error::{Error, Result};
pub use jsonc::{parse_document, strip_comments};
pub use path::NormalizedPath;
