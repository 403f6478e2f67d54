//! Terminal output: theme constants and list rendering

pub mod list;
pub mod theme;

pub use theme::Theme;
