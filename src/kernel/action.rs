use std::path::PathBuf;
use std::time::Instant;

use crate::kernel::editor::{CheckResult, DocumentId, PointerPosition, TextEdit, ViewportLocator};

#[derive(Debug, Clone)]
pub enum Action {
    /// The text widget replaced the whole buffer.
    SetText {
        doc: DocumentId,
        text: String,
        now: Instant,
    },
    Edit {
        doc: DocumentId,
        edit: TextEdit,
        now: Instant,
    },
    SetPath {
        doc: DocumentId,
        path: PathBuf,
    },
    CloseDocument {
        doc: DocumentId,
    },
    SetActiveDocument {
        doc: DocumentId,
    },
    /// Drives debounce deadlines.
    Tick {
        now: Instant,
    },
    CheckCompleted(CheckResult),
    PointerMoved {
        doc: DocumentId,
        position: PointerPosition,
        locator: ViewportLocator,
    },
    PointerLeft,
    ProblemsSetViewHeight {
        height: usize,
    },
    ProblemsMoveSelection {
        delta: isize,
    },
    ProblemsScroll {
        delta: isize,
    },
    ProblemsClickRow {
        row: usize,
    },
    ProblemsActivate,
}
