//! Convert command

use anyhow::Result;
use depenv_schema::ManifestFormat;
use std::path::Path;

use crate::config::Config;

/// Re-serialize the manifest in `to`
pub fn convert(config: &Config, to: ManifestFormat, output: Option<&Path>) -> Result<()> {
    let registry = config.load()?;
    let text = to.render(&registry, &config.prefix)?;
    tracing::debug!("Converted {} -> {}", config.format, to);
    super::write_output(&text, output)
}
