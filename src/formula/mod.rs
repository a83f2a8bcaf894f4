// src/formula/mod.rs

//! Formula system: declarative install descriptors
//!
//! A formula names a package, locates its source archive, declares an
//! integrity checksum and runtime dependencies, and says which single file to
//! place into the binary directory. It is authored once and read at install
//! time; the tool never mutates it.

mod format;
pub mod parser;

pub use format::{Formula, InstallSection, PackageSection, SourceSection};
pub use parser::{parse_formula, parse_formula_file, validate_formula};
