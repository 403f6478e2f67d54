//! Cargo command

use anyhow::{Context, Result};
use depenv_schema::cargo::CargoDirectives;
use std::io::Write;

use crate::config::Config;

/// Print build-script directives for the manifest
pub fn cargo(config: &Config, cfg_name: &str, env_prefix: &str) -> Result<()> {
    let directives = CargoDirectives {
        cfg_name: cfg_name.to_string(),
        env_prefix: env_prefix.to_string(),
    };

    let mut stdout = std::io::stdout().lock();
    directives
        .emit_for_path(&config.manifest, &config.prefix, &mut stdout)
        .with_context(|| format!("Failed to emit directives for {}", config.manifest.display()))?;
    stdout.flush()?;
    Ok(())
}
