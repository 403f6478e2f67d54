//! Has command

use anyhow::Result;

use crate::config::Config;

/// Whether `name` is present in the manifest
pub fn has(config: &Config, name: &str) -> Result<bool> {
    let registry = config.load()?;
    let available = registry.is_available(name);
    tracing::info!("{name} available: {available}");
    Ok(available)
}
