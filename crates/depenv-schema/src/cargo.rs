//! Build-script directives
//!
//! Exposes a registry to the compiler so crate code can gate optional paths
//! on dependency presence and version:
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     depenv_schema::cargo::configure("depenv.lock").unwrap();
//! }
//!
//! // lib.rs
//! #[cfg(depenv_available = "YapDatabase")]
//! const YAP_VERSION: &str = env!("DEPENV_VERSION_YapDatabase");
//! #[cfg(depenv_available = "YapDatabase")]
//! const YAP_MAJOR: &str = env!("DEPENV_VERSION_MAJOR_YapDatabase");
//! ```

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use crate::error::RegistryError;
use crate::format::ManifestFormat;
use crate::registry::Registry;
use crate::types::DependencyRecord;

/// Default `cfg` key carrying presence markers.
pub const DEFAULT_CFG_NAME: &str = "depenv_available";

/// Default prefix of the version environment variables.
pub const DEFAULT_ENV_PREFIX: &str = "DEPENV_VERSION_";

/// Naming used for the emitted `cfg` key and environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoDirectives {
    /// `cfg` key set once per present dependency, valued with its name.
    pub cfg_name: String,
    /// Prefix of `rustc-env` variables; the dependency identifier follows.
    pub env_prefix: String,
}

impl Default for CargoDirectives {
    fn default() -> Self {
        Self {
            cfg_name: DEFAULT_CFG_NAME.to_string(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }
}

impl CargoDirectives {
    /// Environment variables for `record`: the full version, then the major,
    /// minor and patch components. Components name their slot before the
    /// identifier, as the header does.
    fn variables(&self, record: &DependencyRecord) -> [(String, String); 4] {
        let ident = record.name.ident();
        let version = record.version;
        let prefix = &self.env_prefix;
        [
            (format!("{prefix}{ident}"), version.to_string()),
            (format!("{prefix}MAJOR_{ident}"), version.major.to_string()),
            (format!("{prefix}MINOR_{ident}"), version.minor.to_string()),
            (format!("{prefix}PATCH_{ident}"), version.patch.to_string()),
        ]
    }

    /// Write the directives for `registry` to `out`.
    ///
    /// Emits a `rustc-check-cfg` line declaring every name, then per record a
    /// `rustc-cfg` presence marker and `rustc-env` variables for the full
    /// version and each component. Nothing is written if two records would
    /// set the same variable.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::VariableCollision`] when names clash after
    /// folding (e.g. `MAJOR_A` and `A`), or [`RegistryError::Io`] if writing
    /// fails.
    pub fn emit<W: Write>(&self, registry: &Registry, out: &mut W) -> Result<(), RegistryError> {
        let mut owners: HashMap<String, &str> = HashMap::new();
        let mut blocks = Vec::with_capacity(registry.len());
        for record in registry {
            let vars = self.variables(record);
            for (var, _) in &vars {
                if let Some(first) = owners.insert(var.clone(), record.name.as_str()) {
                    return Err(RegistryError::VariableCollision {
                        var: var.clone(),
                        first: first.to_string(),
                        second: record.name.to_string(),
                    });
                }
            }
            blocks.push((record, vars));
        }

        let values: Vec<String> = registry
            .names()
            .map(|name| format!("{:?}", name.as_str()))
            .collect();
        writeln!(
            out,
            "cargo::rustc-check-cfg=cfg({}, values({}))",
            self.cfg_name,
            values.join(", ")
        )?;

        for (record, vars) in blocks {
            writeln!(out, "cargo:rustc-cfg={}={:?}", self.cfg_name, record.name.as_str())?;
            for (var, value) in vars {
                writeln!(out, "cargo:rustc-env={var}={value}")?;
            }
        }
        Ok(())
    }

    /// Load the manifest at `path` and write its directives, plus a
    /// `rerun-if-changed` line for the manifest, to `out`.
    ///
    /// `prefix` is the macro prefix used when the manifest is a header.
    ///
    /// # Errors
    ///
    /// Returns any load error, or any error of [`emit`](Self::emit).
    pub fn emit_for_path<W: Write>(
        &self,
        path: &Path,
        prefix: &str,
        out: &mut W,
    ) -> Result<Registry, RegistryError> {
        let format = ManifestFormat::from_path(path)?;
        let registry = Registry::load_as(path, format, prefix)?;
        writeln!(out, "cargo:rerun-if-changed={}", path.display())?;
        self.emit(&registry, out)?;
        tracing::debug!(
            "Emitted cargo directives for {} dependencies",
            registry.len()
        );
        Ok(registry)
    }
}

/// One-call helper for build scripts: load `path` and print its directives to
/// stdout with the default naming.
///
/// # Errors
///
/// Returns any load error. A build script should propagate it so the build
/// fails instead of compiling against partial dependency information.
pub fn configure(path: impl AsRef<Path>) -> Result<Registry, RegistryError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    CargoDirectives::default().emit_for_path(path.as_ref(), crate::DEFAULT_PREFIX, &mut lock)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_to_string(directives: &CargoDirectives, registry: &Registry) -> String {
        let mut buf = Vec::new();
        directives.emit(registry, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_emit_default_naming() {
        let registry = Registry::from_records([
            DependencyRecord::parse("CocoaLumberjack", (1, 9, 2)).unwrap(),
            DependencyRecord::parse("YapDatabase/standard", (2, 6, 5)).unwrap(),
        ])
        .unwrap();

        let out = emit_to_string(&CargoDirectives::default(), &registry);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines[0],
            r#"cargo::rustc-check-cfg=cfg(depenv_available, values("CocoaLumberjack", "YapDatabase/standard"))"#
        );
        assert!(lines.contains(&r#"cargo:rustc-cfg=depenv_available="CocoaLumberjack""#));
        assert!(lines.contains(&"cargo:rustc-env=DEPENV_VERSION_CocoaLumberjack=1.9.2"));
        assert!(lines.contains(&"cargo:rustc-env=DEPENV_VERSION_MINOR_CocoaLumberjack=9"));
        assert!(lines.contains(&r#"cargo:rustc-cfg=depenv_available="YapDatabase/standard""#));
        assert!(lines.contains(&"cargo:rustc-env=DEPENV_VERSION_PATCH_YapDatabase_standard=5"));
        assert_eq!(lines.len(), 1 + 2 * 5);
    }

    #[test]
    fn test_emit_custom_naming() {
        let registry =
            Registry::from_records([DependencyRecord::parse("FlickrKit", (1, 0, 5)).unwrap()])
                .unwrap();
        let directives = CargoDirectives {
            cfg_name: "has_dep".to_string(),
            env_prefix: "V_".to_string(),
        };

        let out = emit_to_string(&directives, &registry);
        assert!(out.contains("cargo:rustc-cfg=has_dep=\"FlickrKit\"\n"));
        assert!(out.contains("cargo:rustc-env=V_MAJOR_FlickrKit=1\n"));
    }

    #[test]
    fn test_emit_empty_registry() {
        let out = emit_to_string(&CargoDirectives::default(), &Registry::new());
        assert_eq!(out, "cargo::rustc-check-cfg=cfg(depenv_available, values())\n");
    }

    #[test]
    fn test_emit_for_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depenv.lock");
        std::fs::write(
            &path,
            "version = 1\n[[dependency]]\nname = \"HanekeSwift\"\nversion = \"0.9.1\"\n",
        )
        .unwrap();

        let mut buf = Vec::new();
        let registry = CargoDirectives::default()
            .emit_for_path(&path, crate::DEFAULT_PREFIX, &mut buf)
            .unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(registry.is_available("HanekeSwift"));
        assert!(out.starts_with(&format!("cargo:rerun-if-changed={}\n", path.display())));
        assert!(out.contains("cargo:rustc-env=DEPENV_VERSION_HanekeSwift=0.9.1\n"));
    }

    #[test]
    fn test_component_suffix_names_do_not_clash() {
        let registry = Registry::from_records([
            DependencyRecord::parse("A", (1, 0, 0)).unwrap(),
            DependencyRecord::parse("A_MAJOR", (9, 9, 9)).unwrap(),
        ])
        .unwrap();

        let out = emit_to_string(&CargoDirectives::default(), &registry);
        let a_major: Vec<&str> = out
            .lines()
            .filter(|line| line.starts_with("cargo:rustc-env=DEPENV_VERSION_A_MAJOR="))
            .collect();
        assert_eq!(a_major, ["cargo:rustc-env=DEPENV_VERSION_A_MAJOR=9.9.9"]);
        assert!(out.contains("cargo:rustc-env=DEPENV_VERSION_MAJOR_A=1\n"));
        assert!(out.contains("cargo:rustc-env=DEPENV_VERSION_MAJOR_A_MAJOR=9\n"));
    }

    #[test]
    fn test_variable_collision_rejected() {
        let registry = Registry::from_records([
            DependencyRecord::parse("A", (1, 0, 0)).unwrap(),
            DependencyRecord::parse("MAJOR_A", (9, 9, 9)).unwrap(),
        ])
        .unwrap();

        let mut buf = Vec::new();
        let err = CargoDirectives::default().emit(&registry, &mut buf).unwrap_err();
        assert!(matches!(
            &err,
            RegistryError::VariableCollision { var, first, second }
                if var == "DEPENV_VERSION_MAJOR_A" && first == "A" && second == "MAJOR_A"
        ));
        assert!(buf.is_empty());
    }
}
