// tests/common/mod.rs

//! Shared test utilities for integration tests.

use flate2::write::GzEncoder;
use flate2::Compression;
use formulary::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A shell script whose --help invocation exits 0.
pub const HELP_SCRIPT: &[u8] = b"#!/bin/sh\necho \"usage: git-grob [--help]\"\nexit 0\n";

/// A shell script whose --help invocation exits 1.
pub const BROKEN_SCRIPT: &[u8] = b"#!/bin/sh\nexit 1\n";

/// An isolated set of tool directories rooted in a temp dir.
///
/// Keep the TempDir alive for the duration of the test.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: Config,
}

pub fn sandbox() -> Sandbox {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        formula_dir: dir.path().join("formulae"),
        bin_dir: dir.path().join("bin"),
        cache_dir: dir.path().join("cache"),
    };
    fs::create_dir_all(&config.formula_dir).unwrap();
    Sandbox { dir, config }
}

/// Build a gzipped tarball at `dest` containing the given entries,
/// all with mode 0755.
pub fn build_tarball(dest: &Path, entries: &[(&str, &[u8])]) {
    let file = fs::File::create(dest).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, path, *content).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

/// Write a formula file into the sandbox's formula directory and return its path.
pub fn write_formula(
    sandbox: &Sandbox,
    name: &str,
    url: &str,
    sha256: &str,
    deps: &[&str],
    file: &str,
) -> PathBuf {
    let deps_toml = deps
        .iter()
        .map(|d| format!("\"{}\"", d))
        .collect::<Vec<_>>()
        .join(", ");
    let content = format!(
        r#"
[package]
name = "{name}"
desc = "Test formula for {name}"
homepage = "https://example.com/{name}"
license = "MIT"
depends_on = [{deps_toml}]

[source]
url = "{url}"
sha256 = "{sha256}"

[install]
file = "{file}"
"#
    );
    let path = sandbox.config.formula_path(name);
    fs::write(&path, content).unwrap();
    path
}
