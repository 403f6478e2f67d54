//! Errors raised while loading, querying, or combining registries

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Version;

/// Errors that can occur when working with a [`Registry`](crate::Registry).
///
/// None of these are transient; a build consuming the registry should stop
/// on any of them rather than continue with partial dependency information.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A declaration in a manifest is malformed or a block is incomplete.
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number where the problem was detected.
        line: usize,
        /// What was wrong with the declaration.
        reason: String,
    },

    /// The same name was declared twice while building one registry.
    #[error("Duplicate dependency name: {0}")]
    DuplicateName(String),

    /// A version query named a dependency the registry does not hold.
    #[error("Dependency not found: {0}")]
    NotFound(String),

    /// Two registries being merged disagree on a dependency's version.
    #[error("Conflicting versions for {name}: {left} vs {right}")]
    Conflict {
        /// Name declared in both registries.
        name: String,
        /// Version held by the left-hand registry.
        left: Version,
        /// Version held by the right-hand registry.
        right: Version,
    },

    /// A dependency name failed validation.
    #[error("Invalid dependency name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A version string is not `major.minor.patch`.
    #[error("Invalid version '{0}': expected major.minor.patch")]
    InvalidVersion(String),

    /// The lockfile declares a format version this crate does not read.
    #[error("Unsupported lockfile version {0}, expected 1")]
    UnsupportedLockVersion(u32),

    /// Two dependencies would set the same build-script environment variable.
    #[error("Environment variable {var} would be set by both {first} and {second}")]
    VariableCollision {
        /// The contested variable.
        var: String,
        /// Dependency that claimed it first.
        first: String,
        /// Dependency that claimed it second.
        second: String,
    },

    /// The manifest format could not be inferred from a path.
    #[error("Unknown manifest format for {}", .0.display())]
    UnknownFormat(PathBuf),

    /// IO error while reading or writing a manifest.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML lockfile could not be encoded.
    #[error("Lockfile serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl RegistryError {
    /// Build a [`RegistryError::Parse`] for the given line.
    pub fn parse(line: usize, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            line,
            reason: reason.to_string(),
        }
    }
}
