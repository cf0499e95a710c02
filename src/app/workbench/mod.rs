//! Workbench: the boundary the GUI shell talks to.
//!
//! Owns the kernel [`Store`], hands `RunCheck` effects to a
//! [`CheckExecutor`] and feeds completion messages back on [`Workbench::pump`].
//! Effects the shell must act on (caret moves, tooltips) are queued for
//! [`Workbench::take_effects`].

use crate::kernel::editor::{
    CheckPhase, DocumentId, HighlightSpan, LineLocator, PointerPosition, TextEdit,
    ViewportLocator,
};
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::services::ports::{CheckConfig, CheckExecutor};
use crate::kernel::{Action, AppState, CaretTarget, Effect, ProblemRow, Store, SyntaxError};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

mod bridge;
mod tick;

const MAX_MESSAGE_DRAIN_PER_TICK: usize = 256;

pub struct Workbench {
    store: Store,
    executor: Arc<dyn CheckExecutor>,
    runtime: Option<Arc<AsyncRuntime>>,
    rx: Receiver<AppMessage>,
    effects: Vec<Effect>,
    loaded: Vec<DocumentId>,
    failures: Vec<(PathBuf, String)>,
}

impl Workbench {
    /// Checks and file IO both run on `runtime`.
    pub fn new(runtime: AsyncRuntime, rx: Receiver<AppMessage>, config: CheckConfig) -> Self {
        let runtime = Arc::new(runtime);
        let executor: Arc<dyn CheckExecutor> = runtime.clone();
        let mut workbench = Self::with_executor(executor, rx, config);
        workbench.runtime = Some(runtime);
        workbench
    }

    /// Checks run on `executor`; results must arrive on `rx`. File IO is
    /// unavailable.
    pub fn with_executor(
        executor: Arc<dyn CheckExecutor>,
        rx: Receiver<AppMessage>,
        config: CheckConfig,
    ) -> Self {
        Self {
            store: Store::new(AppState::new(config)),
            executor,
            runtime: None,
            rx,
            effects: Vec::new(),
            loaded: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn open_document(&mut self, path: Option<PathBuf>, text: &str, now: Instant) -> DocumentId {
        self.store.open_document(path, text, now)
    }

    /// Loads `path` in the background; the document opens on a later
    /// [`Workbench::pump`]. Returns false without a runtime.
    pub fn open_path(&mut self, path: &Path) -> bool {
        let Some(runtime) = &self.runtime else {
            return false;
        };
        runtime.load_file(path.to_path_buf());
        true
    }

    /// Writes the current text of `doc` to its path in the background.
    pub fn save_document(&mut self, doc: DocumentId) -> bool {
        let Some(runtime) = &self.runtime else {
            return false;
        };
        let Some(state) = self.store.state().editor.get(doc) else {
            return false;
        };
        let document = state.document();
        let Some(path) = document.path() else {
            return false;
        };
        runtime.write_file(
            doc,
            path.to_path_buf(),
            document.version(),
            document.rope().clone(),
        );
        true
    }

    pub fn close_document(&mut self, doc: DocumentId) -> bool {
        self.dispatch_kernel(Action::CloseDocument { doc })
    }

    pub fn set_active_document(&mut self, doc: DocumentId) -> bool {
        self.dispatch_kernel(Action::SetActiveDocument { doc })
    }

    /// The text widget changed; `text` is its full new content.
    pub fn on_document_text_changed(&mut self, doc: DocumentId, text: &str, now: Instant) -> bool {
        self.dispatch_kernel(Action::SetText {
            doc,
            text: text.to_string(),
            now,
        })
    }

    pub fn apply_edit(&mut self, doc: DocumentId, edit: TextEdit, now: Instant) -> bool {
        self.dispatch_kernel(Action::Edit { doc, edit, now })
    }

    pub fn highlight_spans(
        &self,
        doc: DocumentId,
        line_index: usize,
        line_text: &str,
    ) -> Vec<HighlightSpan> {
        self.store.highlight_spans(doc, line_index, line_text)
    }

    pub fn error_list(&self, doc: DocumentId) -> Vec<SyntaxError> {
        self.store.error_list(doc)
    }

    pub fn error_rows(&self) -> &[ProblemRow] {
        self.store.state().problems.rows()
    }

    /// Moves the caret to the line of panel row `row`.
    pub fn on_error_row_activated(&mut self, row: usize) -> Option<CaretTarget> {
        let result = self.store.dispatch(Action::ProblemsClickRow { row });
        let target = result.effects.iter().find_map(|effect| match effect {
            Effect::MoveCaret { doc, line, .. } => Some(CaretTarget {
                doc: *doc,
                line: *line,
            }),
            _ => None,
        });
        self.run_effects(result.effects);
        target
    }

    pub fn tooltip_at(
        &self,
        doc: DocumentId,
        position: PointerPosition,
        locator: &dyn LineLocator,
    ) -> Option<String> {
        self.store.tooltip_at(doc, position, locator)
    }

    /// Tracks the pointer so the shell gets show/hide effects.
    pub fn on_pointer_move(
        &mut self,
        doc: DocumentId,
        position: PointerPosition,
        locator: ViewportLocator,
    ) -> Option<String> {
        self.dispatch_kernel(Action::PointerMoved {
            doc,
            position,
            locator,
        });
        self.store.state().tooltip.as_ref().map(|t| t.text.clone())
    }

    pub fn on_pointer_left(&mut self) -> bool {
        self.dispatch_kernel(Action::PointerLeft)
    }

    /// Shell-facing effects produced since the last call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Documents opened from [`Workbench::open_path`] since the last call.
    pub fn take_loaded(&mut self) -> Vec<DocumentId> {
        std::mem::take(&mut self.loaded)
    }

    /// File IO failures since the last call.
    pub fn take_failures(&mut self) -> Vec<(PathBuf, String)> {
        std::mem::take(&mut self.failures)
    }

    /// No document has a check pending or in flight.
    pub fn checks_idle(&self) -> bool {
        let editor = &self.store.state().editor;
        editor
            .ids()
            .filter_map(|doc| editor.get(doc))
            .all(|state| state.runner().phase() == CheckPhase::Idle)
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::FileLoaded { path, content } => {
                tracing::info!(path = %path.display(), bytes = content.len(), "file loaded");
                let doc = self.open_document(Some(path), &content, Instant::now());
                self.loaded.push(doc);
                true
            }
            AppMessage::FileError { path, error } => {
                tracing::error!(path = %path.display(), error = %error, "file operation failed");
                self.failures.push((path, error));
                false
            }
            AppMessage::FileSaved { doc, path, version } => {
                tracing::info!(?doc, path = %path.display(), version, "file saved");
                false
            }
            AppMessage::CheckCompleted(result) => {
                self.dispatch_kernel(Action::CheckCompleted(result))
            }
        }
    }
}
