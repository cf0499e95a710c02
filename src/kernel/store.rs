use std::path::PathBuf;
use std::time::Instant;

use crate::kernel::editor::{
    tooltip_at, DocumentId, HighlightSpan, LineLocator, PointerPosition, SyntaxError,
    ViewportLocator,
};
use crate::kernel::problems::CaretTarget;
use crate::kernel::state::{AppState, TooltipState};
use crate::kernel::{Action, Effect};

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

/// Single-threaded owner of all core state. Every mutation goes through
/// [`Store::dispatch`] on the UI thread.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Opens a document, makes it active and schedules its first check.
    pub fn open_document(&mut self, path: Option<PathBuf>, text: &str, now: Instant) -> DocumentId {
        let doc = self.state.editor.open(path, text, now);
        tracing::debug!(?doc, lines = text.lines().count(), "document opened");
        self.sync_problems();
        doc
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::SetText { doc, text, now } => {
                let Some(state) = self.state.editor.get_mut(doc) else {
                    return DispatchResult::default();
                };
                state.set_text(&text, now);
                DispatchResult::changed(true)
            }
            Action::Edit { doc, edit, now } => {
                let changed = self
                    .state
                    .editor
                    .get_mut(doc)
                    .is_some_and(|state| state.apply_edit(&edit, now));
                DispatchResult::changed(changed)
            }
            Action::SetPath { doc, path } => {
                let Some(state) = self.state.editor.get_mut(doc) else {
                    return DispatchResult::default();
                };
                state.set_path(path);
                DispatchResult::changed(true)
            }
            Action::CloseDocument { doc } => self.close_document(doc),
            Action::SetActiveDocument { doc } => {
                if !self.state.editor.set_active(doc) {
                    return DispatchResult::default();
                }
                self.sync_problems();
                DispatchResult::changed(true)
            }
            Action::Tick { now } => self.tick(now),
            Action::CheckCompleted(result) => {
                let doc = result.doc;
                let Some(state) = self.state.editor.get_mut(doc) else {
                    tracing::debug!(?doc, seq = result.seq, "check result for closed document");
                    return DispatchResult::default();
                };
                if !state.apply_result(&result) {
                    return DispatchResult::default();
                }
                tracing::debug!(
                    ?doc,
                    seq = result.seq,
                    outcome = result.outcome.label(),
                    elapsed_ms = result.elapsed.as_millis() as u64,
                    "check result published"
                );
                if self.state.editor.active() == Some(doc) {
                    self.sync_problems();
                }
                let mut published = DispatchResult::changed(true);
                published.effects.extend(self.refresh_tooltip(doc).effects);
                published
            }
            Action::PointerMoved {
                doc,
                position,
                locator,
            } => self.pointer_moved(doc, position, &locator),
            Action::PointerLeft => self.hide_tooltip(),
            Action::ProblemsSetViewHeight { height } => {
                DispatchResult::changed(self.state.problems.set_view_height(height))
            }
            Action::ProblemsMoveSelection { delta } => {
                DispatchResult::changed(self.state.problems.move_selection(delta))
            }
            Action::ProblemsScroll { delta } => {
                DispatchResult::changed(self.state.problems.scroll(delta))
            }
            Action::ProblemsClickRow { row } => {
                let target = self.state.problems.click_row(row);
                self.move_caret(target)
            }
            Action::ProblemsActivate => {
                let target = self.state.problems.activate_selected();
                self.move_caret(target)
            }
        }
    }

    /// Highlight spans for one visible line of `doc`.
    pub fn highlight_spans(
        &self,
        doc: DocumentId,
        line_index: usize,
        line_text: &str,
    ) -> Vec<HighlightSpan> {
        self.state
            .editor
            .get(doc)
            .map(|state| state.highlight_line(line_index, line_text).spans)
            .unwrap_or_default()
    }

    pub fn error_list(&self, doc: DocumentId) -> Vec<SyntaxError> {
        self.state
            .editor
            .get(doc)
            .map(|state| state.errors().to_vec())
            .unwrap_or_default()
    }

    pub fn tooltip_at(
        &self,
        doc: DocumentId,
        position: PointerPosition,
        locator: &dyn LineLocator,
    ) -> Option<String> {
        let index = self.state.editor.get(doc)?.error_index();
        tooltip_at(position, locator, &index).map(str::to_string)
    }

    fn close_document(&mut self, doc: DocumentId) -> DispatchResult {
        if !self.state.editor.close(doc) {
            return DispatchResult::default();
        }
        tracing::debug!(?doc, "document closed");
        self.sync_problems();
        let mut result = DispatchResult::changed(true);
        if self.state.tooltip.as_ref().is_some_and(|t| t.doc == doc) {
            result.effects.extend(self.hide_tooltip().effects);
        }
        result
    }

    fn tick(&mut self, now: Instant) -> DispatchResult {
        let effects: Vec<Effect> = self
            .state
            .editor
            .iter_mut()
            .filter_map(|(doc, state)| state.poll_check(doc, now))
            .inspect(|request| {
                tracing::debug!(
                    doc = ?request.doc,
                    seq = request.seq,
                    version = request.version,
                    "dispatching syntax check"
                );
            })
            .map(Effect::RunCheck)
            .collect();
        DispatchResult {
            state_changed: !effects.is_empty(),
            effects,
        }
    }

    fn pointer_moved(
        &mut self,
        doc: DocumentId,
        position: PointerPosition,
        locator: &ViewportLocator,
    ) -> DispatchResult {
        let hovered = locator.line_at(position).and_then(|line| {
            let index = self.state.editor.get(doc)?.error_index();
            let text = index.message(line)?.to_string();
            Some((line, text))
        });
        let Some((line, text)) = hovered else {
            return self.hide_tooltip();
        };
        self.show_tooltip(TooltipState { doc, line, text })
    }

    /// Re-checks a visible tooltip on `doc` against its freshly published
    /// error index.
    fn refresh_tooltip(&mut self, doc: DocumentId) -> DispatchResult {
        let Some(shown) = self.state.tooltip.as_ref().filter(|t| t.doc == doc) else {
            return DispatchResult::default();
        };
        let line = shown.line;
        let current = self
            .state
            .editor
            .get(doc)
            .and_then(|state| state.error_index().message(line).map(str::to_string));
        match current {
            Some(text) => self.show_tooltip(TooltipState { doc, line, text }),
            None => self.hide_tooltip(),
        }
    }

    fn show_tooltip(&mut self, next: TooltipState) -> DispatchResult {
        if self.state.tooltip.as_ref() == Some(&next) {
            return DispatchResult::default();
        }
        let effect = Effect::ShowTooltip {
            doc: next.doc,
            text: next.text.clone(),
        };
        self.state.tooltip = Some(next);
        DispatchResult {
            effects: vec![effect],
            state_changed: true,
        }
    }

    fn hide_tooltip(&mut self) -> DispatchResult {
        if self.state.tooltip.take().is_none() {
            return DispatchResult::default();
        }
        DispatchResult {
            effects: vec![Effect::HideTooltip],
            state_changed: true,
        }
    }

    fn move_caret(&mut self, target: Option<CaretTarget>) -> DispatchResult {
        let Some(CaretTarget { doc, line }) = target else {
            return DispatchResult::default();
        };
        let Some(state) = self.state.editor.get_mut(doc) else {
            return DispatchResult::default();
        };
        let char_offset = state.move_caret_to_line(line);
        DispatchResult {
            effects: vec![Effect::MoveCaret {
                doc,
                line,
                char_offset,
            }],
            state_changed: true,
        }
    }

    fn sync_problems(&mut self) -> bool {
        let editor = &self.state.editor;
        let problems = &mut self.state.problems;
        let active = editor
            .active()
            .and_then(|doc| editor.get(doc).map(|state| (doc, state)))
            .filter(|(_, state)| state.has_results());
        match active {
            Some((doc, state)) => problems.show(doc, state.errors()),
            None => problems.clear(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
