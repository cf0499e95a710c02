use crate::kernel::editor::{CheckRequest, DocumentId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the analyzer on a snapshot off the UI thread.
    RunCheck(CheckRequest),
    MoveCaret {
        doc: DocumentId,
        line: usize,
        char_offset: usize,
    },
    ShowTooltip {
        doc: DocumentId,
        text: String,
    },
    HideTooltip,
}
