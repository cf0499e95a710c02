//! Syntax analyzer: full-document parse with tree-sitter-python.
//!
//! Reports at most one defect per run, the first one in document order.
//! The grammar recovers from input the language rejects, so the tree is
//! checked in three passes: recovery nodes, bracket balance, then layout
//! and statement placement.

mod brackets;
mod layout;
mod recovery;

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;
use tree_sitter::{Node, Parser, Tree};

use self::brackets::Imbalance;

/// Default wall-clock bound for a single parse.
pub const DEFAULT_ANALYZER_TIMEOUT: Duration = Duration::from_millis(2000);

const INVALID_SYNTAX: &str = "invalid syntax";

const HARD_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxError {
    /// Zero-based line.
    pub line: usize,
    /// Zero-based column in chars; 0 when the parser cannot tell.
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Clean,
    Failed(SyntaxError),
    /// The parser itself faulted; nothing is reported for this cycle.
    Crashed,
    /// The parse exceeded its time budget; nothing is reported for this cycle.
    TimedOut,
}

impl CheckOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Failed(_) => "failed",
            Self::Crashed => "crashed",
            Self::TimedOut => "timed_out",
        }
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Clean | Self::Crashed | Self::TimedOut => None,
        }
    }

    pub fn into_error(self) -> Option<SyntaxError> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Clean | Self::Crashed | Self::TimedOut => None,
        }
    }

    /// The error set this cycle publishes. Crashes and timeouts fail open.
    pub fn errors(&self) -> Vec<SyntaxError> {
        self.error().cloned().into_iter().collect()
    }
}

/// Parses `text` and returns its first syntax error, if any.
pub fn analyze(text: &str) -> Option<SyntaxError> {
    check(text, DEFAULT_ANALYZER_TIMEOUT).into_error()
}

/// Like [`analyze`], but surfaces parser faults and timeouts.
pub fn check(text: &str, timeout: Duration) -> CheckOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| check_unguarded(text, timeout))) {
        Ok(outcome) => outcome,
        Err(_) => {
            tracing::warn!(len = text.len(), "syntax analyzer panicked");
            CheckOutcome::Crashed
        }
    }
}

fn check_unguarded(text: &str, timeout: Duration) -> CheckOutcome {
    let Some(tree) = parse_python(text, timeout) else {
        return CheckOutcome::TimedOut;
    };

    match first_error(&tree, text) {
        Some(finding) => CheckOutcome::Failed(finding.into_error()),
        None => CheckOutcome::Clean,
    }
}

fn parse_python(text: &str, timeout: Duration) -> Option<Tree> {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(tree_sitter_python::language()) {
        tracing::error!(error = ?e, "python grammar rejected by tree-sitter");
        return None;
    }
    // Zero would disable the bound entirely.
    let micros = u64::try_from(timeout.as_micros()).unwrap_or(u64::MAX).max(1);
    parser.set_timeout_micros(micros);
    parser.parse(text, None)
}

fn first_error(tree: &Tree, text: &str) -> Option<Finding> {
    let root = tree.root_node();
    let mut recovered = root
        .has_error()
        .then(|| recovery::first_error(root, text));

    let imbalance = match brackets::scan(root, text) {
        Some(Imbalance::Unclosed(finding)) => {
            // Running off the end inside a bracket explains a bare
            // "invalid syntax" anywhere before it.
            recovered = recovered.filter(|r| !r.generic);
            Some(finding)
        }
        Some(Imbalance::Stray(finding)) => Some(finding),
        None => None,
    };

    [recovered, imbalance, layout::first_error(root, text)]
        .into_iter()
        .flatten()
        .min_by_key(Finding::position)
}

/// A located defect, before it is published as a [`SyntaxError`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Finding {
    line: usize,
    column: usize,
    message: String,
    /// A plain "invalid syntax" with no more specific diagnosis.
    generic: bool,
}

impl Finding {
    fn specific((line, column): (usize, usize), message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            generic: false,
        }
    }

    fn generic((line, column): (usize, usize), message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            generic: true,
        }
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn into_error(self) -> SyntaxError {
        SyntaxError {
            line: self.line,
            column: self.column,
            message: self.message,
        }
    }
}

/// `(row, char column)` where `node` starts.
fn start_of(node: Node<'_>, text: &str) -> (usize, usize) {
    let point = node.start_position();
    (point.row, char_column(text, node.start_byte(), point.column))
}

/// `(row, char column)` just past the end of `node`.
fn end_of(node: Node<'_>, text: &str) -> (usize, usize) {
    let point = node.end_position();
    (point.row, char_column(text, node.end_byte(), point.column))
}

fn char_column(text: &str, byte: usize, byte_column: usize) -> usize {
    let line_start = byte.saturating_sub(byte_column);
    text.get(line_start..byte)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(byte_column)
}

/// Text between the start of `node`'s line and `node` itself.
fn line_prefix<'a>(node: Node<'_>, text: &'a str) -> &'a str {
    let start = node.start_byte();
    let line_start = start.saturating_sub(node.start_position().column);
    text.get(line_start..start).unwrap_or("")
}

fn starts_line(node: Node<'_>, text: &str) -> bool {
    line_prefix(node, text).trim().is_empty()
}

/// Leaves under `node` in document order; a childless node is its own leaf.
fn leaves<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        let count = current.child_count();
        if count == 0 {
            out.push(current);
            continue;
        }
        for i in (0..count).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    out
}

/// An identifier spelled like a reserved word; the grammar only produces
/// these while recovering.
fn is_hard_keyword(node: Node<'_>, text: &str) -> bool {
    node.kind() == "identifier"
        && node
            .utf8_text(text.as_bytes())
            .is_ok_and(|word| HARD_KEYWORDS.contains(&word))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/editor/analyzer.rs"]
mod tests;
