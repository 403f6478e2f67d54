//! Merge command

use anyhow::{Context, Result};
use depenv_schema::{ManifestFormat, Registry};
use std::path::{Path, PathBuf};

/// Merge manifest fragments left to right and write the result
pub fn merge(
    files: &[PathBuf],
    output: Option<&Path>,
    format: Option<ManifestFormat>,
    prefix: &str,
) -> Result<()> {
    let fragments = files
        .iter()
        .map(|path| -> Result<Registry> {
            let format = ManifestFormat::from_path(path)?;
            Registry::load_as(path, format, prefix)
                .with_context(|| format!("Failed to load {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let merged = Registry::merge_all(&fragments).context("Failed to merge manifests")?;
    tracing::info!(
        "Merged {} fragments into {} dependencies",
        fragments.len(),
        merged.len()
    );

    let format = match (format, output) {
        (Some(format), _) => format,
        (None, Some(path)) => ManifestFormat::from_path(path).unwrap_or(ManifestFormat::Lockfile),
        (None, None) => ManifestFormat::Lockfile,
    };
    let text = format.render(&merged, prefix)?;
    super::write_output(&text, output)
}
