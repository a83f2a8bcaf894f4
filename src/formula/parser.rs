// src/formula/parser.rs

//! Formula file parsing and validation

use crate::error::{Error, Result};
use crate::formula::format::Formula;
use crate::hash;
use std::path::Path;

/// Parse a formula from a TOML string
pub fn parse_formula(content: &str) -> Result<Formula> {
    toml::from_str(content).map_err(|e| Error::Parse(format!("Invalid formula: {}", e)))
}

/// Parse a formula from a file
pub fn parse_formula_file(path: &Path) -> Result<Formula> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read formula file {}: {}", path.display(), e)))?;

    parse_formula(&content)
}

/// Validate a formula for completeness and correctness
///
/// Hard errors abort; the returned strings are advisory warnings.
pub fn validate_formula(formula: &Formula) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if formula.package.name.is_empty() {
        return Err(Error::Parse("Formula package name cannot be empty".to_string()));
    }
    if formula.source.url.is_empty() {
        return Err(Error::Parse("Formula source url cannot be empty".to_string()));
    }
    if formula.install.file.is_empty() {
        return Err(Error::Parse("Formula install file cannot be empty".to_string()));
    }

    // The install file names an entry in the archive root, not a path
    if formula.install.file.contains('/') {
        return Err(Error::Parse(format!(
            "Install file must be a bare filename, got path: {}",
            formula.install.file
        )));
    }

    // A present checksum must at least be a plausible digest
    if !formula.source.sha256.is_empty() && !hash::is_valid_digest(&formula.source.sha256) {
        return Err(Error::Parse(format!(
            "Invalid sha256 digest: {} (expected {} hex characters)",
            formula.source.sha256,
            hash::SHA256_HEX_LEN
        )));
    }

    if formula.is_unverified() {
        warnings.push("Empty sha256: archive will be installed without verification".to_string());
    }
    if formula.package.desc.is_empty() {
        warnings.push("Missing package description".to_string());
    }
    if formula.package.license.is_empty() {
        warnings.push("Missing package license".to_string());
    }

    for dep in formula.dependencies() {
        if dep.is_empty() {
            return Err(Error::Parse("Empty dependency name in depends_on".to_string()));
        }
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula_toml(sha256: &str, file: &str) -> String {
        format!(
            r#"
[package]
name = "git-grob"
desc = "Interactive git rebase --onto helper"
homepage = "https://github.com/sspathak/zsh-grob"
license = "MIT"
depends_on = ["fzf"]

[source]
url = "https://github.com/sspathak/zsh-grob/archive/refs/tags/v1.0.0.tar.gz"
sha256 = "{}"

[install]
file = "{}"
"#,
            sha256, file
        )
    }

    #[test]
    fn test_parse_valid_formula() {
        let formula = parse_formula(&formula_toml("", "git-grob")).unwrap();
        assert_eq!(formula.package.name, "git-grob");
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(parse_formula("this is not valid toml at all {}").is_err());
    }

    #[test]
    fn test_validate_empty_checksum_warns() {
        let formula = parse_formula(&formula_toml("", "git-grob")).unwrap();
        let warnings = validate_formula(&formula).unwrap();
        assert!(warnings.iter().any(|w| w.contains("without verification")));
    }

    #[test]
    fn test_validate_bad_checksum() {
        let formula = parse_formula(&formula_toml("abc123", "git-grob")).unwrap();
        assert!(validate_formula(&formula).is_err());
    }

    #[test]
    fn test_validate_good_checksum_no_warning() {
        let digest = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
        let formula = parse_formula(&formula_toml(digest, "git-grob")).unwrap();
        let warnings = validate_formula(&formula).unwrap();
        assert!(!warnings.iter().any(|w| w.contains("verification")));
    }

    #[test]
    fn test_validate_rejects_path_install_file() {
        let formula = parse_formula(&formula_toml("", "bin/git-grob")).unwrap();
        assert!(validate_formula(&formula).is_err());
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(parse_formula_file(Path::new("/nonexistent/formula.toml")).is_err());
    }
}
