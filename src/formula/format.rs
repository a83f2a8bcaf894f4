// src/formula/format.rs

//! Formula file format definitions
//!
//! Formulas are TOML files describing how to install a pre-built, single-file
//! tool: where its versioned source archive lives, how to verify it, which
//! file to place into the binary directory, and which other packages must be
//! present first.
//!
//! # Example Formula
//!
//! ```toml
//! [package]
//! name = "git-grob"
//! desc = "Interactive git rebase --onto helper for managing stacked PRs"
//! homepage = "https://github.com/sspathak/zsh-grob"
//! license = "MIT"
//! depends_on = ["fzf"]
//!
//! [source]
//! url = "https://github.com/sspathak/zsh-grob/archive/refs/tags/v1.0.0.tar.gz"
//! sha256 = ""
//!
//! [install]
//! file = "git-grob"
//! ```
//!
//! An empty `sha256` means the archive is installed unverified. That is an
//! explicitly allowed state (release checksums are often filled in after
//! tagging), but it is logged as a risk at install time.

use serde::{Deserialize, Serialize};

/// A complete formula for installing one tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formula {
    /// Package metadata
    pub package: PackageSection,

    /// Source archive location and integrity
    pub source: SourceSection,

    /// What to place into the binary directory
    pub install: InstallSection,
}

impl Formula {
    /// Names of packages that must be present before install
    pub fn dependencies(&self) -> &[String] {
        &self.package.depends_on
    }

    /// Whether the archive will be installed without integrity verification
    pub fn is_unverified(&self) -> bool {
        self.source.sha256.is_empty()
    }

    /// The cache filename for the archive
    ///
    /// Prefixed with the package name: forge tag tarballs share their URL
    /// tail across projects (`.../refs/tags/v1.0.0.tar.gz`), so the tail
    /// alone would put unrelated formulas in one cache slot.
    pub fn archive_filename(&self) -> String {
        let tail = self
            .source
            .url
            .split('/')
            .next_back()
            .filter(|s| !s.is_empty())
            .unwrap_or("source.tar.gz");
        format!("{}-{}", self.package.name, tail)
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name (also the default formula filename stem)
    pub name: String,

    /// One-line description
    pub desc: String,

    /// Homepage URL, informational only
    pub homepage: String,

    /// License identifier (SPDX)
    pub license: String,

    /// Packages that must be installed before this one
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Source archive section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Archive download URL (or a local filesystem path)
    pub url: String,

    /// Bare lowercase hex SHA-256 digest of the archive; empty = unverified
    #[serde(default)]
    pub sha256: String,
}

/// Install action section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallSection {
    /// File copied from the unpacked archive root into the binary directory
    pub file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FORMULA: &str = r#"
[package]
name = "git-grob"
desc = "Interactive git rebase --onto helper for managing stacked PRs"
homepage = "https://github.com/sspathak/zsh-grob"
license = "MIT"
depends_on = ["fzf"]

[source]
url = "https://github.com/sspathak/zsh-grob/archive/refs/tags/v1.0.0.tar.gz"
sha256 = ""

[install]
file = "git-grob"
"#;

    #[test]
    fn test_parse_formula() {
        let formula: Formula = toml::from_str(SAMPLE_FORMULA).unwrap();

        assert_eq!(formula.package.name, "git-grob");
        assert_eq!(formula.package.license, "MIT");
        assert_eq!(formula.package.depends_on, vec!["fzf"]);
        assert_eq!(formula.install.file, "git-grob");
        assert!(formula.is_unverified());
    }

    #[test]
    fn test_archive_filename() {
        let formula: Formula = toml::from_str(SAMPLE_FORMULA).unwrap();
        assert_eq!(formula.archive_filename(), "git-grob-v1.0.0.tar.gz");
    }

    #[test]
    fn test_archive_filenames_distinct_per_package() {
        // Two tag tarballs with identical URL tails must not share a
        // cache filename
        let mut a: Formula = toml::from_str(SAMPLE_FORMULA).unwrap();
        let mut b: Formula = toml::from_str(SAMPLE_FORMULA).unwrap();
        a.source.url = "https://example.com/alpha/archive/refs/tags/v1.0.0.tar.gz".to_string();
        b.source.url = "https://example.com/beta/archive/refs/tags/v1.0.0.tar.gz".to_string();
        b.package.name = "other-tool".to_string();

        assert_ne!(a.archive_filename(), b.archive_filename());
    }

    #[test]
    fn test_minimal_formula_defaults() {
        let minimal = r#"
[package]
name = "hello"
desc = "Prints a greeting"
homepage = "https://example.com/hello"
license = "MIT"

[source]
url = "https://example.com/hello-1.0.tar.gz"

[install]
file = "hello"
"#;

        let formula: Formula = toml::from_str(minimal).unwrap();
        assert!(formula.package.depends_on.is_empty());
        assert!(formula.source.sha256.is_empty());
        assert!(formula.is_unverified());
    }

    #[test]
    fn test_verified_formula() {
        let verified = r#"
[package]
name = "hello"
desc = "Prints a greeting"
homepage = "https://example.com/hello"
license = "MIT"

[source]
url = "https://example.com/hello-1.0.tar.gz"
sha256 = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"

[install]
file = "hello"
"#;

        let formula: Formula = toml::from_str(verified).unwrap();
        assert!(!formula.is_unverified());
    }

    #[test]
    fn test_missing_required_section() {
        let broken = r#"
[package]
name = "hello"
desc = "d"
homepage = "h"
license = "MIT"

[source]
url = "https://example.com/hello.tar.gz"
"#;
        // No [install] section
        assert!(toml::from_str::<Formula>(broken).is_err());
    }
}
