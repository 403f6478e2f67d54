//! List command

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::ui::Theme;
use crate::ui::list::render_table;

#[derive(Debug, Serialize)]
struct Row<'a> {
    name: &'a str,
    version: String,
    major: u64,
    minor: u64,
    patch: u64,
}

/// List every dependency in declaration order
pub fn list(config: &Config, json: bool) -> Result<()> {
    let registry = config.load()?;

    if json {
        let rows: Vec<Row<'_>> = registry
            .iter()
            .map(|record| Row {
                name: record.name.as_str(),
                version: record.version.to_string(),
                major: record.version.major,
                minor: record.version.minor,
                patch: record.version.patch,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!();
        println!("  No dependencies declared in {}.", config.manifest.display());
        return Ok(());
    }

    print!("{}", render_table(&registry, &Theme::default()));
    Ok(())
}
