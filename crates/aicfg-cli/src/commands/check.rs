//! `aicfg check` — verify the configuration resolves and validates

use std::path::Path;

use colored::Colorize;

use aicfg_core::{ConfigSource, StructuralValidator, load_config};
use aicfg_fs::NormalizedPath;
use aicfg_source::Fetcher;

use crate::error::{CliError, Result};

pub fn run_check(dir: &Path) -> Result<()> {
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

    let source = match loaded.source {
        ConfigSource::File => "ai.json",
        ConfigSource::PackageJson => "package.json",
    };
    println!("{} {} ({})", "ok".green().bold(), loaded.path, source);

    for section in ["skills", "rules", "prompts", "mcp", "editors"] {
        if let Some(entries) = loaded.config.get(section).and_then(|v| v.as_object()) {
            println!("  {section}: {} entries", entries.len());
        }
    }
    if loaded.has_local_overrides {
        println!("  local overrides applied from ai.local.json");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_valid_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("ai.json"),
            "{\"skills\": {\"a\": {\"path\": \"/x\"}}}",
        )
        .unwrap();

        assert!(run_check(temp.path()).is_ok());
    }

    #[test]
    fn test_check_invalid_config_fails() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ai.json"), "{\"skills\": 7}").unwrap();

        let err = run_check(temp.path()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(aicfg_core::Error::Validation { .. })
        ));
    }
}
