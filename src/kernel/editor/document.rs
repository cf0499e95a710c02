use ropey::Rope;
use slotmap::new_key_type;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

new_key_type! {
    /// Handle of one open document.
    pub struct DocumentId;
}

/// A text edit in char offsets, as reported by the text widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert { char_offset: usize, text: String },
    Delete { start: usize, end: usize },
    Replace { start: usize, end: usize, text: String },
}

/// The core's mirror of one open tab's text.
#[derive(Debug, Clone)]
pub struct Document {
    path: Option<PathBuf>,
    rope: Rope,
    version: u64,
    caret: usize,
}

impl Document {
    pub fn new(path: Option<PathBuf>, text: &str) -> Self {
        Self {
            path,
            rope: Rope::from_str(text),
            version: 0,
            caret: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Line text without its line ending.
    pub fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let slice: Cow<'_, str> = self.rope.line(line).into();
        Some(match slice {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim_end_matches(['\n', '\r'])),
            Cow::Owned(s) => Cow::Owned(s.trim_end_matches(['\n', '\r']).to_string()),
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        (0..self.rope.len_lines()).filter_map(move |idx| self.line(idx))
    }

    pub fn snapshot(&self) -> String {
        self.rope.to_string()
    }

    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.caret = self.caret.min(self.rope.len_chars());
        self.version = self.version.wrapping_add(1);
    }

    /// Applies `edit`, clamping offsets to the current text. Returns whether
    /// the text changed.
    pub fn apply(&mut self, edit: &TextEdit) -> bool {
        let len = self.rope.len_chars();
        let changed = match edit {
            TextEdit::Insert { char_offset, text } => {
                if text.is_empty() {
                    false
                } else {
                    self.rope.insert((*char_offset).min(len), text);
                    true
                }
            }
            TextEdit::Delete { start, end } => self.remove_clamped(*start, *end),
            TextEdit::Replace { start, end, text } => {
                let removed = self.remove_clamped(*start, *end);
                if !text.is_empty() {
                    let at = (*start).min(self.rope.len_chars());
                    self.rope.insert(at, text);
                }
                removed || !text.is_empty()
            }
        };
        if changed {
            self.caret = self.caret.min(self.rope.len_chars());
            self.version = self.version.wrapping_add(1);
        }
        changed
    }

    /// Moves the caret to the start of `line` (clamped to the last line).
    pub fn move_caret_to_line(&mut self, line: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.caret = self.rope.line_to_char(line);
        self.caret
    }

    fn remove_clamped(&mut self, start: usize, end: usize) -> bool {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return false;
        }
        self.rope.remove(start..end);
        true
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/editor/document.rs"]
mod tests;
