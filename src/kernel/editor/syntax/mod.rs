//! Line highlighter: static lexical rules, triple-quote block state and the
//! error underline overlay.

mod python;
mod rules;

pub use self::python::{BlockState, TripleQuote};
pub use self::rules::HighlightRule;

use super::error_index::LineErrorIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HighlightKind {
    Keyword = 0,
    Comment = 1,
    String = 2,
    Number = 3,
    Function = 4,
    /// Wavy underline; decorates whatever color is already there.
    ErrorUnderline = 5,
}

impl HighlightKind {
    pub const COUNT: usize = 6;

    pub const COLORED: [Self; 5] = [
        Self::Keyword,
        Self::Comment,
        Self::String,
        Self::Number,
        Self::Function,
    ];

    pub const fn is_decoration(self) -> bool {
        matches!(self, Self::ErrorUnderline)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Comment => "comment",
            Self::String => "string",
            Self::Number => "number",
            Self::Function => "function",
            Self::ErrorUnderline => "error",
        }
    }
}

const _: () = assert!(HighlightKind::ErrorUnderline as usize == HighlightKind::COUNT - 1);

/// `(start, len, kind)` in byte offsets relative to the line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightSpan {
    pub start: usize,
    pub len: usize,
    pub kind: HighlightKind,
}

impl HighlightSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlight {
    /// Spans in application order; later spans win.
    pub spans: Vec<HighlightSpan>,
    pub outgoing: BlockState,
}

/// A flattened piece of a line after overlays are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRun {
    pub start: usize,
    pub end: usize,
    pub kind: Option<HighlightKind>,
    pub underline: bool,
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Vec<HighlightRule>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::python()
    }
}

impl Highlighter {
    pub fn python() -> Self {
        Self {
            rules: rules::python_rules(),
        }
    }

    /// Highlights one line. Pure in `(line, rules, errors, incoming)`.
    pub fn highlight(
        &self,
        line: &str,
        line_index: usize,
        incoming: BlockState,
        errors: &LineErrorIndex,
    ) -> LineHighlight {
        let line = strip_line_ending(line);
        let mut spans = Vec::new();

        for rule in &self.rules {
            for (start, end) in rule.ranges(line) {
                push_clamped(&mut spans, line, start, end, rule.kind);
            }
        }

        let (ranges, outgoing) = python::triple_quote_ranges(line, incoming);
        for (start, end) in ranges {
            push_clamped(&mut spans, line, start, end, HighlightKind::String);
        }

        if let Some((start, end)) = underline_range(line, line_index, errors) {
            push_clamped(&mut spans, line, start, end, HighlightKind::ErrorUnderline);
        }

        LineHighlight { spans, outgoing }
    }

    /// Highlights consecutive lines, threading the block state through them.
    pub fn highlight_lines<I, S>(&self, lines: I, errors: &LineErrorIndex) -> Vec<LineHighlight>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = BlockState::Outside;
        lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| {
                let out = self.highlight(line.as_ref(), idx, state, errors);
                state = out.outgoing;
                out
            })
            .collect()
    }

    /// Incoming block state for every line.
    pub fn block_states<I, S>(&self, lines: I) -> Vec<BlockState>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = BlockState::Outside;
        lines
            .into_iter()
            .map(|line| {
                let incoming = state;
                let (_, outgoing) =
                    python::triple_quote_ranges(strip_line_ending(line.as_ref()), incoming);
                state = outgoing;
                incoming
            })
            .collect()
    }
}

/// Flattens overlaid spans into non-overlapping runs covering `line`.
pub fn resolve(line: &str, spans: &[HighlightSpan]) -> Vec<StyledRun> {
    let line = strip_line_ending(line);
    let len = line.len();
    let mut kinds: Vec<Option<HighlightKind>> = vec![None; len];
    let mut underline = vec![false; len];

    for span in spans {
        let start = span.start.min(len);
        let end = span.end().min(len);
        let (Some(kind_slots), Some(under_slots)) =
            (kinds.get_mut(start..end), underline.get_mut(start..end))
        else {
            continue;
        };
        if span.kind.is_decoration() {
            under_slots.iter_mut().for_each(|u| *u = true);
        } else {
            kind_slots.iter_mut().for_each(|k| *k = Some(span.kind));
        }
    }

    let mut runs: Vec<StyledRun> = Vec::new();
    for (idx, _) in line.char_indices() {
        let kind = kinds.get(idx).copied().flatten();
        let under = underline.get(idx).copied().unwrap_or(false);
        if let Some(run) = runs.last_mut() {
            if run.kind == kind && run.underline == under {
                continue;
            }
            run.end = idx;
        }
        runs.push(StyledRun {
            start: idx,
            end: len,
            kind,
            underline: under,
        });
    }
    runs
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn underline_range(
    line: &str,
    line_index: usize,
    errors: &LineErrorIndex,
) -> Option<(usize, usize)> {
    let (column, len) = errors.position(line_index)?;
    let mut chars = line.char_indices().skip(column).take(len.max(1));
    let (start, first) = chars.next()?;
    let end = chars
        .last()
        .map_or(start + first.len_utf8(), |(idx, ch)| idx + ch.len_utf8());
    Some((start, end))
}

fn push_clamped(
    spans: &mut Vec<HighlightSpan>,
    line: &str,
    start: usize,
    end: usize,
    kind: HighlightKind,
) {
    let end = end.min(line.len());
    if start >= end || !line.is_char_boundary(start) || !line.is_char_boundary(end) {
        return;
    }
    spans.push(HighlightSpan {
        start,
        len: end - start,
        kind,
    });
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/editor/syntax.rs"]
mod tests;
