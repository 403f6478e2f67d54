//! List output formatting
//!
//! Column-aligned rendering for `depenv list`.

use super::theme::Theme;
use crossterm::style::Stylize;
use depenv_schema::{DependencyName, Registry};

/// Render `registry` as aligned rows with a header and footer.
pub fn render_table(registry: &Registry, theme: &Theme) -> String {
    let nw = theme
        .layout
        .name_width_for(registry.names().map(DependencyName::as_str));
    let vw = theme.layout.version_width;

    let mut lines = Vec::with_capacity(registry.len() + 4);
    lines.push(String::new());
    lines.push(
        format!("  {:<nw$} {:<vw$}", "name", "version")
            .with(theme.colors.secondary)
            .to_string(),
    );

    for record in registry {
        let name_part = format!("{:<nw$}", record.name.as_str());
        let version_part = format!("{:<vw$}", record.version.to_string());
        lines.push(format!(
            "  {} {}",
            name_part.with(theme.colors.name),
            version_part.with(theme.colors.version)
        ));
    }

    lines.push(String::new());
    let noun = if registry.len() == 1 {
        "dependency"
    } else {
        "dependencies"
    };
    lines.push(
        format!("  {} {noun}", registry.len())
            .with(theme.colors.secondary)
            .to_string(),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
