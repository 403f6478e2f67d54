//! depenv - dependency environment manifests
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Command-line surface over `depenv-schema`: validate a manifest, query
//! presence and versions, merge fragments, convert between the header and
//! lockfile forms, and emit cargo build-script directives.

pub mod cmd;
pub mod config;
pub mod ui;

pub use config::Config;
pub use depenv_schema::{ManifestFormat, Registry};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "depenv")]
#[command(author, version = env!("DEPENV_VERSION"), about = "depenv - dependency environment manifests")]
pub struct Cli {
    /// Manifest to read (default: nearest depenv.lock or depenv.h)
    #[arg(long, short = 'm', global = true, env = "DEPENV_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Macro prefix used by header manifests
    #[arg(long, global = true, env = "DEPENV_PREFIX", default_value = depenv_schema::DEFAULT_PREFIX)]
    pub prefix: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the manifest
    Check,
    /// Exit 0 if a dependency is present, 1 if absent, 2 on any error
    Has {
        /// Dependency name (e.g. CocoaLumberjack/Core)
        name: String,
    },
    /// Print the version of a dependency
    Version {
        /// Dependency name
        name: String,
        /// Fail unless the version satisfies this requirement (e.g. ">=2.6")
        #[arg(long)]
        require: Option<String>,
    },
    /// List every dependency in declaration order
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Merge manifest fragments into one
    Merge {
        /// Fragments to merge, left to right
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Output format (default: from --output extension, else toml)
        #[arg(long)]
        format: Option<ManifestFormat>,
    },
    /// Re-serialize the manifest in another format
    Convert {
        /// Target format
        #[arg(long)]
        to: ManifestFormat,
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Print cargo build-script directives for the manifest
    Cargo {
        /// cfg key carrying presence markers
        #[arg(long, default_value = depenv_schema::cargo::DEFAULT_CFG_NAME)]
        cfg_name: String,
        /// Prefix of the version environment variables
        #[arg(long, default_value = depenv_schema::cargo::DEFAULT_ENV_PREFIX)]
        env_prefix: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
