//! The dependency registry
//!
//! An immutable, ordered set of [`DependencyRecord`]s with a name index.
//! Declaration order is kept so that re-serialization is deterministic; it
//! carries no ranking.

use std::collections::HashMap;
use std::path::Path;

use crate::error::RegistryError;
use crate::format::ManifestFormat;
use crate::types::{DependencyName, DependencyRecord, Version};

/// A frozen snapshot of installed dependency names and versions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Vec<DependencyRecord>,
    index: HashMap<DependencyName, usize>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from records, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if a name appears twice, or if
    /// two names share the same flat identifier (`A/B` and `A_B`), since the
    /// header format could not tell them apart.
    pub fn from_records<I>(records: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = DependencyRecord>,
    {
        let records: Vec<DependencyRecord> = records.into_iter().collect();
        let mut index = HashMap::with_capacity(records.len());
        let mut idents: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.name.clone(), pos).is_some() {
                return Err(RegistryError::DuplicateName(record.name.to_string()));
            }
            if let Some(other) = idents.insert(record.name.ident(), pos) {
                tracing::debug!(
                    "{} and {} fold to the same identifier",
                    records[other].name,
                    record.name
                );
                return Err(RegistryError::DuplicateName(record.name.to_string()));
            }
        }

        Ok(Self { records, index })
    }

    /// Load a registry from a manifest file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFormat`] for an unrecognised extension,
    /// [`RegistryError::Io`] if the file cannot be read, or any parse error of
    /// the chosen format.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let format = ManifestFormat::from_path(path)?;
        Self::load_as(path, format, crate::DEFAULT_PREFIX)
    }

    /// Load a registry from a manifest file in an explicit format.
    ///
    /// `prefix` is the macro prefix used when the file is a header.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] if the file cannot be read, or any parse
    /// error of `format`.
    pub fn load_as(path: &Path, format: ManifestFormat, prefix: &str) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        let registry = format.parse(&content, prefix)?;
        tracing::debug!(
            "Loaded {} dependencies from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Whether `name` is present.
    pub fn is_available(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The record for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&DependencyRecord> {
        self.index.get(name).map(|&pos| &self.records[pos])
    }

    /// The version of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `name` is absent. There is no
    /// default version.
    pub fn version_of(&self, name: &str) -> Result<Version, RegistryError> {
        self.get(name)
            .map(|record| record.version)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Whether the installed version of `name` meets `req`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if `name` is absent.
    pub fn satisfies(&self, name: &str, req: &semver::VersionReq) -> Result<bool, RegistryError> {
        let version = self.version_of(name)?;
        Ok(req.matches(&version.to_semver()))
    }

    /// Combine two registries into a new one.
    ///
    /// Records of `self` come first in their order, followed by records of
    /// `other` that `self` does not hold. A name present in both with equal
    /// versions is kept once.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Conflict`] if a name is present in both with
    /// different versions.
    pub fn merge(&self, other: &Registry) -> Result<Self, RegistryError> {
        let mut merged = self.records.clone();

        for record in &other.records {
            match self.get(&record.name) {
                Some(existing) if existing.version == record.version => {
                    tracing::trace!("{} already present, keeping one copy", record.name);
                }
                Some(existing) => {
                    return Err(RegistryError::Conflict {
                        name: record.name.to_string(),
                        left: existing.version,
                        right: record.version,
                    });
                }
                None => merged.push(record.clone()),
            }
        }

        let merged = Self::from_records(merged)?;
        tracing::debug!(
            "Merged {} + {} dependencies into {}",
            self.len(),
            other.len(),
            merged.len()
        );
        Ok(merged)
    }

    /// Fold a sequence of manifest fragments left to right with [`merge`](Self::merge).
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError::Conflict`] encountered.
    pub fn merge_all<'a, I>(registries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'a Registry>,
    {
        registries
            .into_iter()
            .try_fold(Self::new(), |acc, next| acc.merge(next))
    }

    /// Records whose name is `parent/...`.
    ///
    /// This is a lexical filter; the registry models no hierarchy between a
    /// library and its sub-modules.
    pub fn submodules_of<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = &'a DependencyRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.name.parent() == Some(parent))
    }

    /// Records in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, DependencyRecord> {
        self.records.iter()
    }

    /// Names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &DependencyName> {
        self.records.iter().map(|record| &record.name)
    }

    /// Records as a slice, in declaration order.
    pub fn records(&self) -> &[DependencyRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// The index is derived from the records, so only the ordered list matters.
impl PartialEq for Registry {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for Registry {}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a DependencyRecord;
    type IntoIter = std::slice::Iter<'a, DependencyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(entries: &[(&str, (u64, u64, u64))]) -> Registry {
        Registry::from_records(
            entries
                .iter()
                .map(|(name, v)| DependencyRecord::parse(name, *v).unwrap()),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let r = registry(&[("CocoaLumberjack", (1, 9, 2)), ("YapDatabase", (2, 6, 5))]);

        assert!(r.is_available("CocoaLumberjack"));
        assert_eq!(r.version_of("CocoaLumberjack").unwrap().as_tuple(), (1, 9, 2));
        assert!(!r.is_available("Unknown"));
        assert!(matches!(
            r.version_of("Unknown"),
            Err(RegistryError::NotFound(name)) if name == "Unknown"
        ));
    }

    #[test]
    fn test_every_record_is_queryable() {
        let r = registry(&[
            ("TaylorSource/Base", (0, 13, 0)),
            ("TaylorSource/YapDatabase", (0, 13, 0)),
            ("HanekeSwift", (0, 9, 1)),
        ]);
        for record in &r {
            assert!(r.is_available(&record.name));
            assert_eq!(r.version_of(&record.name).unwrap(), record.version);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let r = registry(&[("FlickrKit", (1, 0, 5))]);
        assert!(!r.is_available("flickrkit"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let records = vec![
            DependencyRecord::parse("YapDatabase", (2, 6, 5)).unwrap(),
            DependencyRecord::parse("YapDatabase", (2, 6, 5)).unwrap(),
        ];
        assert!(matches!(
            Registry::from_records(records),
            Err(RegistryError::DuplicateName(name)) if name == "YapDatabase"
        ));
    }

    #[test]
    fn test_identifier_collision_rejected() {
        let records = vec![
            DependencyRecord::parse("YapDatabase/standard", (2, 6, 5)).unwrap(),
            DependencyRecord::parse("YapDatabase_standard", (2, 6, 5)).unwrap(),
        ];
        assert!(matches!(
            Registry::from_records(records),
            Err(RegistryError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_order_preserved() {
        let r = registry(&[("b", (1, 0, 0)), ("a", (1, 0, 0)), ("c", (1, 0, 0))]);
        let names: Vec<&str> = r.names().map(DependencyName::as_str).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_merge_with_self_is_identity() {
        let r = registry(&[("CocoaLumberjack", (1, 9, 2)), ("YapDatabase", (2, 6, 5))]);
        assert_eq!(r.merge(&r).unwrap(), r);
    }

    #[test]
    fn test_merge_unions_in_order() {
        let a = registry(&[("FlickrKit", (1, 0, 5)), ("YapDatabase", (2, 6, 5))]);
        let b = registry(&[("YapDatabase", (2, 6, 5)), ("HanekeSwift", (0, 9, 1))]);

        let merged = a.merge(&b).unwrap();
        let names: Vec<&str> = merged.names().map(DependencyName::as_str).collect();
        assert_eq!(names, ["FlickrKit", "YapDatabase", "HanekeSwift"]);
    }

    #[test]
    fn test_merge_conflict() {
        let a = registry(&[("YapDatabase", (2, 6, 5))]);
        let b = registry(&[("YapDatabase", (2, 6, 6))]);

        match a.merge(&b) {
            Err(RegistryError::Conflict { name, left, right }) => {
                assert_eq!(name, "YapDatabase");
                assert_eq!(left, Version::new(2, 6, 5));
                assert_eq!(right, Version::new(2, 6, 6));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        // Inputs are untouched
        assert_eq!(a.version_of("YapDatabase").unwrap(), Version::new(2, 6, 5));
    }

    #[test]
    fn test_merge_all() {
        let a = registry(&[("a", (1, 0, 0))]);
        let b = registry(&[("b", (2, 0, 0))]);
        let c = registry(&[("a", (1, 0, 0)), ("c", (3, 0, 0))]);

        let merged = Registry::merge_all([&a, &b, &c]).unwrap();
        assert_eq!(merged.len(), 3);
        assert!(Registry::merge_all(std::iter::empty()).unwrap().is_empty());
    }

    #[test]
    fn test_satisfies() {
        let r = registry(&[("YapDatabase", (2, 6, 5))]);
        let req = semver::VersionReq::parse(">=2.6").unwrap();
        assert!(r.satisfies("YapDatabase", &req).unwrap());

        let req = semver::VersionReq::parse("^3").unwrap();
        assert!(!r.satisfies("YapDatabase", &req).unwrap());

        assert!(r.satisfies("Missing", &req).is_err());
    }

    #[test]
    fn test_submodules_are_lexical() {
        let r = registry(&[
            ("CocoaLumberjack", (1, 9, 2)),
            ("CocoaLumberjack/Core", (1, 9, 2)),
            ("CocoaLumberjack/Extensions", (1, 9, 2)),
            ("CocoaLumberjackX/Other", (1, 0, 0)),
        ]);
        let subs: Vec<&str> = r
            .submodules_of("CocoaLumberjack")
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(subs, ["CocoaLumberjack/Core", "CocoaLumberjack/Extensions"]);
    }
}
