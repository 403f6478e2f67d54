//! Manifest format selection

use std::path::Path;
use std::str::FromStr;

use crate::error::RegistryError;
use crate::header::{self, HeaderDialect};
use crate::lockfile::Lockfile;
use crate::registry::Registry;

/// Textual forms a registry can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// Flat `#define` environment header (`.h`).
    Header,
    /// TOML lockfile (`.toml`, `.lock`).
    Lockfile,
}

impl ManifestFormat {
    /// Infer the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFormat`] if the extension is missing or
    /// not one of `h`, `toml`, `lock`.
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("h") => Ok(Self::Header),
            Some("toml" | "lock") => Ok(Self::Lockfile),
            _ => Err(RegistryError::UnknownFormat(path.to_path_buf())),
        }
    }

    /// Parse `content` in this format.
    ///
    /// # Errors
    ///
    /// Returns the format's parse error, or [`RegistryError::DuplicateName`].
    pub fn parse(self, content: &str, prefix: &str) -> Result<Registry, RegistryError> {
        match self {
            Self::Header => header::parse_with(content, &HeaderDialect::new(prefix)),
            Self::Lockfile => Lockfile::parse(content)?.into_registry(),
        }
    }

    /// Render `registry` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TomlSer`] if the lockfile cannot be encoded.
    pub fn render(self, registry: &Registry, prefix: &str) -> Result<String, RegistryError> {
        match self {
            Self::Header => Ok(header::render_with(registry, &HeaderDialect::new(prefix))),
            Self::Lockfile => Lockfile::from_registry(registry).render(),
        }
    }

    /// Lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Lockfile => "toml",
        }
    }
}

impl FromStr for ManifestFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "header" | "h" => Ok(Self::Header),
            "toml" | "lock" | "lockfile" => Ok(Self::Lockfile),
            other => Err(format!("unknown manifest format '{other}', expected header or toml")),
        }
    }
}

impl std::fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            ManifestFormat::from_path(Path::new("Pods-environment.h")).unwrap(),
            ManifestFormat::Header
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("depenv.lock")).unwrap(),
            ManifestFormat::Lockfile
        );
        assert_eq!(
            ManifestFormat::from_path(Path::new("deps.toml")).unwrap(),
            ManifestFormat::Lockfile
        );
        assert!(matches!(
            ManifestFormat::from_path(Path::new("README")),
            Err(RegistryError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("header".parse::<ManifestFormat>().unwrap(), ManifestFormat::Header);
        assert_eq!("TOML".parse::<ManifestFormat>().unwrap(), ManifestFormat::Lockfile);
        assert!("yaml".parse::<ManifestFormat>().is_err());
    }

    #[test]
    fn test_render_then_parse_both_formats() {
        let registry = crate::header::parse(
            "#define COCOAPODS_POD_AVAILABLE_FlickrKit\n\
             #define COCOAPODS_VERSION_MAJOR_FlickrKit 1\n\
             #define COCOAPODS_VERSION_MINOR_FlickrKit 0\n\
             #define COCOAPODS_VERSION_PATCH_FlickrKit 5\n",
        )
        .unwrap();

        for format in [ManifestFormat::Header, ManifestFormat::Lockfile] {
            let text = format.render(&registry, "COCOAPODS").unwrap();
            assert_eq!(format.parse(&text, "COCOAPODS").unwrap(), registry);
        }
    }

    #[test]
    fn test_malformed_declarations_are_parse_errors_in_both_formats() {
        let lock = "version = 1\n[[dependency]]\nname = \"A\"\nversion = \"1.x.0\"\n";
        assert!(matches!(
            ManifestFormat::Lockfile.parse(lock, "COCOAPODS"),
            Err(RegistryError::Parse { .. })
        ));

        let header = "#define COCOAPODS_POD_AVAILABLE_A\n#define COCOAPODS_VERSION_MAJOR_A x\n";
        assert!(matches!(
            ManifestFormat::Header.parse(header, "COCOAPODS"),
            Err(RegistryError::Parse { .. })
        ));
    }
}
