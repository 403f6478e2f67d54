//! depenv-schema - dependency environment registry
//!
//! A frozen snapshot of which third-party components a build pulled in and
//! at which version, plus the textual manifest formats it travels in.
//!
//! # Overview
//!
//! - [`Registry`] holds [`DependencyRecord`]s in declaration order and answers
//!   presence/version queries.
//! - [`header`] reads and writes the flat `#define` environment header.
//! - [`lockfile`] reads and writes the TOML lockfile form.
//! - [`cargo`] turns a registry into build-script directives so crate code can
//!   gate on `cfg(depenv_available = "...")` at compile time.
//!
//! ```
//! use depenv_schema::{Registry, header};
//!
//! let text = "\
//! // YapDatabase
//! #define COCOAPODS_POD_AVAILABLE_YapDatabase
//! #define COCOAPODS_VERSION_MAJOR_YapDatabase 2
//! #define COCOAPODS_VERSION_MINOR_YapDatabase 6
//! #define COCOAPODS_VERSION_PATCH_YapDatabase 5
//! ";
//! let registry: Registry = header::parse(text).unwrap();
//! assert!(registry.is_available("YapDatabase"));
//! assert_eq!(registry.version_of("YapDatabase").unwrap().to_string(), "2.6.5");
//! ```

pub mod cargo;
pub mod error;
pub mod format;
pub mod header;
pub mod lockfile;
pub mod registry;
pub mod types;

// Re-exports
pub use error::RegistryError;
pub use format::ManifestFormat;
pub use lockfile::Lockfile;
pub use registry::Registry;
pub use types::*;

/// Default macro prefix of the environment header.
pub const DEFAULT_PREFIX: &str = "COCOAPODS";

/// File name searched for when no manifest path is given (TOML form).
pub const LOCK_FILE: &str = "depenv.lock";

/// File name searched for when no manifest path is given (header form).
pub const HEADER_FILE: &str = "depenv.h";
