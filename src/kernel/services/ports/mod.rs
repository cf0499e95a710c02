//! Service ports: traits + data contracts.

pub mod config;
pub mod runtime;
pub mod settings;

pub use config::CheckConfig;
pub use runtime::CheckExecutor;
pub use settings::{Settings, ThemeSettings};
