//! UI Theme - Design system constants
//!
//! Colors, icons and column widths shared by every command's output.

use crossterm::style::Color;

/// Default theme for depenv output
#[derive(Debug, Clone, Default)]
pub struct Theme {
    /// Colors for different UI elements
    pub colors: ColorScheme,
    /// Status icons
    pub icons: Icons,
    /// Column layout
    pub layout: Layout,
}

/// Color scheme for UI elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    /// Dependency names (primary content)
    pub name: Color,
    /// Version numbers
    pub version: Color,
    /// Headers, footers and secondary info
    pub secondary: Color,
    /// Success states
    pub success: Color,
    /// Error states
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            name: Color::Cyan,
            version: Color::White,
            secondary: Color::DarkGrey,
            success: Color::Green,
            error: Color::Red,
        }
    }
}

/// Status icons for different states
#[derive(Debug, Clone)]
pub struct Icons {
    /// Success/completed state (✓)
    pub success: &'static str,
    /// Error/failed state (✗)
    pub error: &'static str,
}

impl Default for Icons {
    fn default() -> Self {
        Self {
            success: "✓",
            error: "✗",
        }
    }
}

/// Column layout constants
#[derive(Debug, Clone)]
pub struct Layout {
    /// Minimum width of the name column
    pub name_width: usize,
    /// Width of the version column
    pub version_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            name_width: 16,
            version_width: 12,
        }
    }
}

impl Layout {
    /// Name column width wide enough for the longest of `names`.
    pub fn name_width_for<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> usize {
        names
            .into_iter()
            .map(|n| n.chars().count())
            .max()
            .map_or(self.name_width, |longest| longest.max(self.name_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.icons.success, "✓");
        assert_eq!(theme.icons.error, "✗");
        assert_eq!(theme.layout.name_width, 16);
    }

    #[test]
    fn test_name_width_grows_with_content() {
        let layout = Layout::default();
        assert_eq!(layout.name_width_for([]), 16);
        assert_eq!(layout.name_width_for(["short"]), 16);
        assert_eq!(
            layout.name_width_for(["YapDatabaseExtensions/Common"]),
            "YapDatabaseExtensions/Common".len()
        );
    }
}
