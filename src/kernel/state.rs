use crate::kernel::editor::{DocumentId, EditorState};
use crate::kernel::problems::ProblemsState;
use crate::kernel::services::ports::CheckConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipState {
    pub doc: DocumentId,
    /// Line under the pointer when the tooltip was shown.
    pub line: usize,
    pub text: String,
}

#[derive(Debug)]
pub struct AppState {
    pub editor: EditorState,
    pub problems: ProblemsState,
    pub tooltip: Option<TooltipState>,
}

impl AppState {
    pub fn new(config: CheckConfig) -> Self {
        Self {
            editor: EditorState::new(config),
            problems: ProblemsState::default(),
            tooltip: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CheckConfig::default())
    }
}
