//! Manifest location and format settings
//!
//! Resolved once per invocation from the command line (with `DEPENV_*`
//! environment fallbacks handled by clap) and the working directory.

use anyhow::{Context, Result, bail};
use depenv_schema::{HEADER_FILE, LOCK_FILE, ManifestFormat, Registry};
use std::path::{Path, PathBuf};

/// Where the manifest lives and how to read it.
#[derive(Debug, Clone)]
pub struct Config {
    pub manifest: PathBuf,
    pub format: ManifestFormat,
    pub prefix: String,
}

impl Config {
    /// Resolve settings. An explicit manifest wins; otherwise search upward
    /// from `cwd`.
    pub fn resolve(manifest: Option<&Path>, prefix: &str, cwd: &Path) -> Result<Self> {
        let manifest = match manifest {
            Some(path) => path.to_path_buf(),
            None => match find_manifest(cwd) {
                Some(path) => path,
                None => bail!(
                    "No {LOCK_FILE} or {HEADER_FILE} found from {}. Pass --manifest.",
                    cwd.display()
                ),
            },
        };
        let format = ManifestFormat::from_path(&manifest)?;

        tracing::debug!("Using {} manifest {}", format, manifest.display());
        Ok(Self {
            manifest,
            format,
            prefix: prefix.to_string(),
        })
    }

    /// Load the configured manifest.
    pub fn load(&self) -> Result<Registry> {
        Registry::load_as(&self.manifest, self.format, &self.prefix)
            .with_context(|| format!("Failed to load {}", self.manifest.display()))
    }
}

/// Walk up from `start` looking for `depenv.lock`, then `depenv.h`.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        for name in [LOCK_FILE, HEADER_FILE] {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_find_manifest_walks_up() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("a").join(HEADER_FILE), "").unwrap();

        let found = find_manifest(&nested).unwrap();
        assert_eq!(found, dir.path().join("a").join(HEADER_FILE));
    }

    #[test]
    fn test_lockfile_preferred_over_header() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(HEADER_FILE), "").unwrap();
        std::fs::write(dir.path().join(LOCK_FILE), "version = 1\n").unwrap();

        assert_eq!(find_manifest(dir.path()).unwrap(), dir.path().join(LOCK_FILE));
    }

    #[test]
    fn test_explicit_manifest_wins() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(LOCK_FILE), "version = 1\n").unwrap();
        let explicit = dir.path().join("other.h");

        let config = Config::resolve(Some(explicit.as_path()), "COCOAPODS", dir.path()).unwrap();
        assert_eq!(config.manifest, explicit);
        assert_eq!(config.format, ManifestFormat::Header);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("deps.yaml");
        assert!(Config::resolve(Some(explicit.as_path()), "COCOAPODS", dir.path()).is_err());
    }
}
