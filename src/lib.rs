// src/lib.rs

//! Formulary
//!
//! A formula-driven installer for single-file tools. A formula is a
//! declarative TOML record naming a package, its source archive, an integrity
//! checksum, a license, runtime dependencies, and the one file to place into
//! the binary directory. Installing a formula runs a strictly sequential
//! pipeline: resolve dependencies, fetch and verify the archive, unpack it,
//! place the file, and smoke-test the result with `--help`.
//!
//! # Architecture
//!
//! - Formulas: authored once, read at install time, never mutated
//! - Every pipeline step is terminal on failure; no retries, no partial state
//! - Downloads and installs go through temp files with atomic renames

pub mod archive;
pub mod config;
mod error;
pub mod fetch;
pub mod formula;
pub mod hash;
pub mod install;
pub mod resolver;
pub mod smoke;

pub use config::{Config, Overrides};
pub use error::{Error, Result};
pub use fetch::ArchiveClient;
pub use formula::{parse_formula, parse_formula_file, validate_formula, Formula};
pub use install::{InstallOptions, Installer};
pub use resolver::{InstallProbe, PathProbe};
