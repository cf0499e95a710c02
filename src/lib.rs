//! pyedit - core of a Python source editor.
//!
//! Module layout:
//! - kernel: documents, syntax analysis, highlighting, check scheduling and
//!   the error panel, driven through a single `Store`
//! - kernel::services: ports (contracts) and adapters (tokio runtime, settings)
//! - app: the `Workbench` facade a GUI shell talks to, plus terminal output

pub mod app;
pub mod kernel;
