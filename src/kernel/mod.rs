//! Headless editor core (state/action/effect).

pub mod action;
pub mod editor;
pub mod effect;
pub mod problems;
pub mod services;
pub mod state;
pub mod store;

pub use action::Action;
pub use editor::{DocumentId, EditorState, SyntaxError};
pub use effect::Effect;
pub use problems::{CaretTarget, ProblemRow, ProblemsState};
pub use state::{AppState, TooltipState};
pub use store::{DispatchResult, Store};
