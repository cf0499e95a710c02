use slotmap::SlotMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::analyzer::SyntaxError;
use super::check_runner::{CheckRequest, CheckResult, CheckRunner};
use super::document::{Document, DocumentId, TextEdit};
use super::error_index::LineErrorIndex;
use super::syntax::{BlockState, Highlighter, LineHighlight};
use crate::kernel::services::ports::CheckConfig;

/// Everything the core keeps for one open document.
#[derive(Debug)]
pub struct DocumentState {
    document: Document,
    highlighter: Arc<Highlighter>,
    runner: CheckRunner,
    errors: Vec<SyntaxError>,
    error_index: Arc<LineErrorIndex>,
    block_states: Vec<BlockState>,
    checked_version: Option<u64>,
}

impl DocumentState {
    pub fn new(document: Document, highlighter: Arc<Highlighter>, runner: CheckRunner) -> Self {
        let mut state = Self {
            document,
            highlighter,
            runner,
            errors: Vec::new(),
            error_index: LineErrorIndex::empty(),
            block_states: Vec::new(),
            checked_version: None,
        };
        state.rebuild_block_states();
        state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn runner(&self) -> &CheckRunner {
        &self.runner
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// The published index; holders keep their snapshot across swaps.
    pub fn error_index(&self) -> Arc<LineErrorIndex> {
        Arc::clone(&self.error_index)
    }

    /// Document version the current errors were computed from.
    pub fn checked_version(&self) -> Option<u64> {
        self.checked_version
    }

    pub fn has_results(&self) -> bool {
        self.checked_version.is_some()
    }

    pub fn block_state(&self, line: usize) -> BlockState {
        self.block_states.get(line).copied().unwrap_or_default()
    }

    pub fn highlight_line(&self, line_index: usize, line_text: &str) -> LineHighlight {
        self.highlighter.highlight(
            line_text,
            line_index,
            self.block_state(line_index),
            &self.error_index,
        )
    }

    pub(crate) fn set_text(&mut self, text: &str, now: Instant) {
        self.document.set_text(text);
        self.text_changed(now);
    }

    pub(crate) fn apply_edit(&mut self, edit: &TextEdit, now: Instant) -> bool {
        if !self.document.apply(edit) {
            return false;
        }
        self.text_changed(now);
        true
    }

    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.document.set_path(path);
    }

    pub(crate) fn move_caret_to_line(&mut self, line: usize) -> usize {
        self.document.move_caret_to_line(line)
    }

    pub(crate) fn poll_check(&mut self, doc: DocumentId, now: Instant) -> Option<CheckRequest> {
        let seq = self.runner.poll(now)?;
        Some(CheckRequest {
            doc,
            seq,
            version: self.document.version(),
            text: self.document.snapshot(),
        })
    }

    /// Publishes `result` if it is the newest one; returns whether it was.
    pub(crate) fn apply_result(&mut self, result: &CheckResult) -> bool {
        if !self.runner.on_completed(result.seq) {
            tracing::debug!(
                seq = result.seq,
                last_applied = ?self.runner.last_applied(),
                "discarding superseded check result"
            );
            return false;
        }
        let errors = result.outcome.errors();
        self.error_index = Arc::new(LineErrorIndex::from_errors(&errors));
        self.errors = errors;
        self.checked_version = Some(result.version);
        true
    }

    fn text_changed(&mut self, now: Instant) {
        self.rebuild_block_states();
        self.runner.on_text_changed(now);
    }

    fn rebuild_block_states(&mut self) {
        self.block_states = self.highlighter.block_states(self.document.lines());
    }
}

/// All open documents plus the active one.
#[derive(Debug)]
pub struct EditorState {
    documents: SlotMap<DocumentId, DocumentState>,
    active: Option<DocumentId>,
    highlighter: Arc<Highlighter>,
    config: CheckConfig,
}

impl EditorState {
    pub fn new(config: CheckConfig) -> Self {
        Self {
            documents: SlotMap::with_key(),
            active: None,
            highlighter: Arc::new(Highlighter::python()),
            config,
        }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn active(&self) -> Option<DocumentId> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, doc: DocumentId) -> Option<&DocumentState> {
        self.documents.get(doc)
    }

    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.keys()
    }

    pub(crate) fn get_mut(&mut self, doc: DocumentId) -> Option<&mut DocumentState> {
        self.documents.get_mut(doc)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (DocumentId, &mut DocumentState)> {
        self.documents.iter_mut()
    }

    pub(crate) fn open(&mut self, path: Option<PathBuf>, text: &str, now: Instant) -> DocumentId {
        let runner = CheckRunner::new(self.config.debounce(), self.config.stall_after());
        let mut state =
            DocumentState::new(Document::new(path, text), Arc::clone(&self.highlighter), runner);
        state.text_changed(now);
        let doc = self.documents.insert(state);
        self.active = Some(doc);
        doc
    }

    pub(crate) fn close(&mut self, doc: DocumentId) -> bool {
        if self.documents.remove(doc).is_none() {
            return false;
        }
        if self.active == Some(doc) {
            self.active = self.documents.keys().next();
        }
        true
    }

    pub(crate) fn set_active(&mut self, doc: DocumentId) -> bool {
        if !self.documents.contains_key(doc) || self.active == Some(doc) {
            return false;
        }
        self.active = Some(doc);
        true
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/state.rs"]
mod tests;
