//! Check command

use anyhow::Result;
use crossterm::style::Stylize;

use crate::config::Config;
use crate::ui::Theme;

/// Load and validate the manifest
pub fn check(config: &Config) -> Result<()> {
    let registry = config.load()?;
    let theme = Theme::default();

    println!(
        "  {} {} ({}, {} dependencies)",
        theme.icons.success.with(theme.colors.success),
        config.manifest.display(),
        config.format,
        registry.len()
    );
    Ok(())
}
