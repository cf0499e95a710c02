use rustc_hash::FxHashMap;
use std::sync::Arc;

use super::analyzer::SyntaxError;

/// Underline length recorded for every error column.
pub const UNDERLINE_LEN: usize = 1;

/// Per-line view of one check cycle's errors.
///
/// Built once from a cycle's result and published behind an `Arc`; readers
/// keep whatever snapshot they hold until the owner swaps in the next one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineErrorIndex {
    positions: FxHashMap<usize, (usize, usize)>,
    messages: FxHashMap<usize, String>,
}

impl LineErrorIndex {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn from_errors(errors: &[SyntaxError]) -> Self {
        let mut positions = FxHashMap::default();
        let mut messages = FxHashMap::default();
        for err in errors {
            // First error on a line wins.
            positions
                .entry(err.line)
                .or_insert((err.column, UNDERLINE_LEN));
            messages
                .entry(err.line)
                .or_insert_with(|| err.message.clone());
        }
        Self {
            positions,
            messages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `(column, underline length)` for `line`.
    pub fn position(&self, line: usize) -> Option<(usize, usize)> {
        self.positions.get(&line).copied()
    }

    pub fn message(&self, line: usize) -> Option<&str> {
        self.messages.get(&line).map(String::as_str)
    }
}
