//! npm package fetch
//!
//! Resolves an installed package's config file by walking the
//! `node_modules` directory chain upward from the project root, the same
//! directories Node's own resolution algorithm would consult. Extends
//! never auto-installs: a missing package is a hard error.

use aicfg_fs::{CONFIG_FILE_NAME, NormalizedPath};

use crate::context::ResolutionContext;
use crate::error::{Error, Result};
use crate::fetch::{FetchOrigin, Fetched};

pub(crate) fn fetch(package: &str, ctx: &ResolutionContext) -> Result<Fetched> {
    let config_path = resolve_package_config(&ctx.project_root, package)?;
    let canonical = config_path.canonical_or_absolute();
    tracing::debug!(package, path = %canonical, "reading npm extends target");
    let text = aicfg_fs::io::read_text(&canonical)?;
    let parent = canonical
        .parent()
        .unwrap_or_else(|| NormalizedPath::new("/"));

    Ok(Fetched {
        text,
        context: ResolutionContext::local(parent, ctx.project_root.clone()),
        canonical_key: package.to_string(),
        origin: FetchOrigin::NpmPackage,
    })
}

/// Walk up from `project_root` looking for `node_modules/<package>`.
fn resolve_package_config(project_root: &NormalizedPath, package: &str) -> Result<NormalizedPath> {
    let mut dir = Some(project_root.clone());
    while let Some(current) = dir {
        let package_dir = current.join("node_modules").join(package);
        if package_dir.is_dir() {
            let config = package_dir.join(CONFIG_FILE_NAME);
            if config.is_file() {
                return Ok(config);
            }
            return Err(Error::NotFound {
                path: config.to_string(),
            });
        }
        dir = current.parent();
    }
    Err(Error::PackageResolution {
        package: package.to_string(),
    })
}
