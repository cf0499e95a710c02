use crate::kernel::editor::{CheckResult, DocumentId};
use std::path::PathBuf;

#[derive(Debug)]
pub enum AppMessage {
    FileLoaded {
        path: PathBuf,
        content: String,
    },
    FileError {
        path: PathBuf,
        error: String,
    },
    FileSaved {
        doc: DocumentId,
        path: PathBuf,
        version: u64,
    },
    CheckCompleted(CheckResult),
}
