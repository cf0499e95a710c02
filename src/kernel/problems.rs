use crate::kernel::editor::{DocumentId, SyntaxError};

/// One rendered error panel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRow {
    pub label: String,
    /// Zero-based document line the row points at.
    pub line: usize,
}

impl ProblemRow {
    pub fn from_error(err: &SyntaxError) -> Self {
        Self {
            label: format!("Line {}: {}", err.line.saturating_add(1), err.message),
            line: err.line,
        }
    }
}

/// Where activating a row sends the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretTarget {
    pub doc: DocumentId,
    pub line: usize,
}

/// Error panel for the active document.
#[derive(Debug, Default)]
pub struct ProblemsState {
    doc: Option<DocumentId>,
    errors: Vec<SyntaxError>,
    rows: Vec<ProblemRow>,
    selected_index: usize,
    view_height: usize,
    scroll_offset: usize,
}

impl ProblemsState {
    pub fn doc(&self) -> Option<DocumentId> {
        self.doc
    }

    pub fn rows(&self) -> &[ProblemRow] {
        &self.rows
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces the panel contents; returns whether anything changed.
    pub fn show(&mut self, doc: DocumentId, errors: &[SyntaxError]) -> bool {
        if self.doc == Some(doc) && self.errors == errors {
            return false;
        }
        let doc_changed = self.doc != Some(doc);
        self.doc = Some(doc);
        self.errors = errors.to_vec();
        self.rows = errors.iter().map(ProblemRow::from_error).collect();
        if doc_changed {
            self.selected_index = 0;
            self.scroll_offset = 0;
        }
        self.clamp_selection();
        self.clamp_scroll();
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.doc.is_none() && self.rows.is_empty() {
            return false;
        }
        self.doc = None;
        self.errors.clear();
        self.rows.clear();
        self.selected_index = 0;
        self.scroll_offset = 0;
        true
    }

    pub fn set_view_height(&mut self, height: usize) -> bool {
        let height = height.max(1);
        if self.view_height == height {
            return false;
        }
        self.view_height = height;
        self.clamp_scroll();
        true
    }

    pub fn move_selection(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() || delta == 0 {
            return false;
        }

        let prev = self.selected_index;
        let len = self.rows.len();

        if delta < 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = len - 1;
            }
        } else if self.selected_index + 1 < len {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }

        self.keep_row_visible(self.selected_index);
        self.selected_index != prev
    }

    pub fn scroll(&mut self, delta: isize) -> bool {
        if self.rows.is_empty() || delta == 0 {
            return false;
        }

        let max_scroll = self.rows.len().saturating_sub(self.view_height.max(1));
        let prev = self.scroll_offset;
        if delta > 0 {
            self.scroll_offset = (self.scroll_offset + delta.unsigned_abs()).min(max_scroll);
        } else {
            self.scroll_offset = self.scroll_offset.saturating_sub(delta.unsigned_abs());
        }
        self.scroll_offset != prev
    }

    /// Selects `row` and returns where the caret should go.
    pub fn click_row(&mut self, row: usize) -> Option<CaretTarget> {
        let line = self.rows.get(row)?.line;
        let doc = self.doc?;
        self.selected_index = row;
        self.keep_row_visible(row);
        Some(CaretTarget { doc, line })
    }

    pub fn activate_selected(&mut self) -> Option<CaretTarget> {
        self.click_row(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.selected_index = 0;
            self.scroll_offset = 0;
            return;
        }
        self.selected_index = self.selected_index.min(self.rows.len().saturating_sub(1));
        self.keep_row_visible(self.selected_index);
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = self.rows.len().saturating_sub(self.view_height.max(1));
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }

    fn keep_row_visible(&mut self, row: usize) {
        let view_height = self.view_height.max(1);
        if row < self.scroll_offset {
            self.scroll_offset = row;
            return;
        }
        if row >= self.scroll_offset + view_height {
            self.scroll_offset = row.saturating_add(1).saturating_sub(view_height);
        }
        self.clamp_scroll();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/problems.rs"]
mod tests;
