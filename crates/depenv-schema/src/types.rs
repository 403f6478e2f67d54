//! Core value types: dependency names, version triples, records

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::str::FromStr;

use crate::error::RegistryError;

/// A dependency name as declared by the resolver (e.g. `CocoaLumberjack/Core`).
///
/// Case is preserved and comparisons are exact. A `/` marks a sub-module of a
/// library, but the name is still fully independent of its parent's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DependencyName(String);

impl DependencyName {
    /// Create a validated dependency name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` is empty or contains
    /// whitespace or control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::InvalidName {
                name,
                reason: "name cannot be empty",
            });
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(RegistryError::InvalidName {
                name,
                reason: "name cannot contain whitespace or control characters",
            });
        }
        Ok(Self(name))
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Flat identifier form used in macro and environment variable names.
    ///
    /// Every character outside `[A-Za-z0-9_]` becomes `_`, so
    /// `YapDatabase/standard` maps to `YapDatabase_standard`.
    pub fn ident(&self) -> String {
        ident_of(&self.0)
    }

    /// The part before the first `/`, if this is a sub-module name.
    pub fn parent(&self) -> Option<&str> {
        self.0.split_once('/').map(|(parent, _)| parent)
    }
}

/// Flat identifier form of an arbitrary string. See [`DependencyName::ident`].
pub fn ident_of(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl<'de> Deserialize<'de> for DependencyName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl FromStr for DependencyName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for DependencyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for DependencyName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for DependencyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DependencyName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DependencyName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DependencyName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A `major.minor.patch` version triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl Version {
    /// Create a version from its three components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// The components as a tuple.
    pub const fn as_tuple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    /// Convert to a `semver::Version` for requirement matching.
    pub fn to_semver(&self) -> semver::Version {
        semver::Version::new(self.major, self.minor, self.patch)
    }
}

/// Parse one version component: ASCII digits only, no sign.
pub(crate) fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl FromStr for Version {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryError::InvalidVersion(s.to_string());
        let mut parts = s.split('.');
        let major = parts.next().and_then(parse_component).ok_or_else(invalid)?;
        let minor = parts.next().and_then(parse_component).ok_or_else(invalid)?;
        let patch = parts.next().and_then(parse_component).ok_or_else(invalid)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(major, minor, patch))
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl From<(u64, u64, u64)> for Version {
    fn from((major, minor, patch): (u64, u64, u64)) -> Self {
        Self::new(major, minor, patch)
    }
}

impl TryFrom<&semver::Version> for Version {
    type Error = RegistryError;

    fn try_from(v: &semver::Version) -> Result<Self, Self::Error> {
        // A triple has nowhere to keep pre-release or build metadata
        if !v.pre.is_empty() || !v.build.is_empty() {
            return Err(RegistryError::InvalidVersion(v.to_string()));
        }
        Ok(Self::new(v.major, v.minor, v.patch))
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One installed dependency unit: a name and the version in use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Dependency name, unique within a registry.
    pub name: DependencyName,
    /// Installed version.
    pub version: Version,
}

impl DependencyRecord {
    /// Create a record from an already validated name.
    pub fn new(name: DependencyName, version: impl Into<Version>) -> Self {
        Self {
            name,
            version: version.into(),
        }
    }

    /// Create a record, validating the name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` is not a valid name.
    pub fn parse(name: &str, version: impl Into<Version>) -> Result<Self, RegistryError> {
        Ok(Self::new(DependencyName::new(name)?, version))
    }
}

impl std::fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
