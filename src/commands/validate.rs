// src/commands/validate.rs
//! Formula validation command

use anyhow::{Context, Result};
use formulary::formula::{parse_formula_file, validate_formula};
use std::path::Path;

/// Parse a formula file and report errors and warnings
pub fn cmd_validate(path: &Path) -> Result<()> {
    let formula = parse_formula_file(path)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let warnings = validate_formula(&formula)
        .with_context(|| format!("Formula {} is invalid", path.display()))?;

    println!(
        "{}: {} ({})",
        formula.package.name, formula.package.desc, formula.package.license
    );
    println!("  source: {}", formula.source.url);
    println!("  installs: {}", formula.install.file);
    if !formula.dependencies().is_empty() {
        println!("  depends on: {}", formula.dependencies().join(", "));
    }

    for warning in &warnings {
        println!("  warning: {}", warning);
    }

    if warnings.is_empty() {
        println!("OK");
    }
    Ok(())
}
