//! App layer: the shell-facing workbench plus terminal rendering.

#[cfg(feature = "tui")]
pub mod report;
#[cfg(feature = "tui")]
pub mod theme;
pub mod workbench;

#[cfg(feature = "tui")]
pub use report::{write_document, write_problems, ReportOptions};
#[cfg(feature = "tui")]
pub use theme::SyntaxTheme;
pub use workbench::Workbench;
