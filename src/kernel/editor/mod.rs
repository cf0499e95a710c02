//! Editor core: per-document analysis, check scheduling and highlighting.

pub mod analyzer;
pub mod check_runner;
pub mod document;
pub mod error_index;
pub mod hover;
pub mod state;
pub mod syntax;

pub use analyzer::{analyze, check, CheckOutcome, SyntaxError};
pub use check_runner::{CheckPhase, CheckRequest, CheckResult, CheckRunner};
pub use document::{Document, DocumentId, TextEdit};
pub use error_index::LineErrorIndex;
pub use hover::{tooltip_at, LineLocator, PointerPosition, ViewportLocator};
pub use state::{DocumentState, EditorState};
pub use syntax::{
    resolve, BlockState, HighlightKind, HighlightSpan, Highlighter, LineHighlight, StyledRun,
};
