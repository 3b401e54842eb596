//! `aicfg resolve` — print or write the fully resolved configuration

use std::path::Path;

use colored::Colorize;

use aicfg_core::{StructuralValidator, load_config};
use aicfg_fs::{NormalizedPath, io};
use aicfg_source::Fetcher;

use crate::error::{CliError, Result};

pub fn run_resolve(dir: &Path, pretty: bool, out: Option<&Path>) -> Result<()> {
    let fetcher = Fetcher::new();
    let loaded = load_config(&NormalizedPath::new(dir), &fetcher, &StructuralValidator)?
        .ok_or_else(|| {
            CliError::user(format!(
                "no ai.json found at or above {}",
                dir.display()
            ))
        })?;

    for warning in &loaded.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let rendered = if pretty || out.is_some() {
        serde_json::to_string_pretty(&loaded.config)
    } else {
        serde_json::to_string(&loaded.config)
    }
    .map_err(aicfg_core::Error::from)?;

    match out {
        Some(out_path) => {
            io::write_text(&NormalizedPath::new(out_path), &rendered)
                .map_err(aicfg_core::Error::from)?;
            println!(
                "{} wrote resolved config to {}",
                "ok".green().bold(),
                out_path.display()
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
