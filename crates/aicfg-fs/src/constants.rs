//! Well-known file names

/// The canonical configuration file name.
pub const CONFIG_FILE_NAME: &str = "ai.json";

/// The project-local override file name.
pub const LOCAL_CONFIG_FILE_NAME: &str = "ai.local.json";

/// package.json, checked for a top-level "ai" object during discovery.
pub const PACKAGE_JSON: &str = "package.json";
