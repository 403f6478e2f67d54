//! Command modules - one file per CLI command

pub mod cargo;
pub mod check;
pub mod completions;
pub mod convert;
pub mod has;
pub mod list;
pub mod merge;
pub mod version;

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Write rendered manifest text to `output`, or stdout when absent.
pub(crate) fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::debug!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
