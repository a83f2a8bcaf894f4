// src/commands/list.rs
//! Formula listing command

use anyhow::{Context, Result};
use formulary::formula::parse_formula_file;
use std::path::PathBuf;
use tracing::warn;
use walkdir::WalkDir;

/// List formulas in the formula directory with their install status
pub fn cmd_list(
    formula_dir: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(formula_dir, bin_dir, cache_dir)
        .context("Failed to resolve configuration")?;

    if !config.formula_dir.exists() {
        println!("No formulas in {}", config.formula_dir.display());
        return Ok(());
    }

    let mut rows = Vec::new();
    for entry in WalkDir::new(&config.formula_dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }

        match parse_formula_file(path) {
            Ok(formula) => {
                let installed = config.bin_dir.join(&formula.install.file).is_file();
                rows.push((formula.package.name, formula.package.desc, installed));
            }
            Err(e) => warn!("Skipping unreadable formula {}: {}", path.display(), e),
        }
    }

    if rows.is_empty() {
        println!("No formulas in {}", config.formula_dir.display());
        return Ok(());
    }

    rows.sort();
    for (name, desc, installed) in rows {
        let marker = if installed { "*" } else { " " };
        println!("{} {:<20} {}", marker, name, desc);
    }

    Ok(())
}
