//! Lockfile module for the TOML manifest form
//!
//! The lockfile (`depenv.lock`) lists the installed dependencies, one
//! `[[dependency]]` table each, in declaration order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::registry::Registry;
use crate::types::DependencyRecord;

/// Current lockfile format version
pub const LOCK_VERSION: u32 = 1;

/// The lockfile structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lockfile {
    /// Lockfile format version
    pub version: u32,
    /// Locked dependencies
    #[serde(default, rename = "dependency")]
    pub dependencies: Vec<DependencyRecord>,
}

impl Lockfile {
    /// Create a new empty lockfile
    pub fn new() -> Self {
        Self {
            version: LOCK_VERSION,
            dependencies: Vec::new(),
        }
    }

    /// Snapshot a registry
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            version: LOCK_VERSION,
            dependencies: registry.records().to_vec(),
        }
    }

    /// Parse lockfile text
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Parse`] on malformed TOML, a non-integer or
    /// missing version, or a missing name, and
    /// [`RegistryError::UnsupportedLockVersion`] for a format other than 1.
    pub fn parse(content: &str) -> Result<Self, RegistryError> {
        let lockfile: Self =
            toml::from_str(content).map_err(|err| decode_error(content, &err))?;
        if lockfile.version != LOCK_VERSION {
            return Err(RegistryError::UnsupportedLockVersion(lockfile.version));
        }
        Ok(lockfile)
    }

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TomlSer`] if encoding fails.
    pub fn render(&self) -> Result<String, RegistryError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the registry, checking name uniqueness
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a name repeats.
    pub fn into_registry(self) -> Result<Registry, RegistryError> {
        Registry::from_records(self.dependencies)
    }

    /// Load lockfile from path
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if the file cannot be read, or any
    /// error of [`parse`](Self::parse).
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Save lockfile to path
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let content = self.render()?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("lock.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

/// Locate a decode failure by line, so lockfile and header errors read alike.
fn decode_error(content: &str, err: &toml::de::Error) -> RegistryError {
    let line = err.span().map_or(1, |span| {
        content
            .bytes()
            .take(span.start)
            .filter(|&b| b == b'\n')
            .count()
            + 1
    });
    RegistryError::parse(line, err.message().trim_end())
}

impl Default for Lockfile {
    fn default() -> Self {
        Self::new()
    }
}
