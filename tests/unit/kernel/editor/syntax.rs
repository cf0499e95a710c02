use super::*;
use crate::kernel::editor::analyzer::SyntaxError;

fn plain(line: &str) -> LineHighlight {
    Highlighter::python().highlight(line, 0, BlockState::Outside, &LineErrorIndex::default())
}

fn span(start: usize, len: usize, kind: HighlightKind) -> HighlightSpan {
    HighlightSpan { start, len, kind }
}

fn kinds_of(spans: &[HighlightSpan], kind: HighlightKind) -> Vec<(usize, usize)> {
    spans
        .iter()
        .filter(|s| s.kind == kind)
        .map(|s| (s.start, s.len))
        .collect()
}

fn index_with(line: usize, column: usize) -> LineErrorIndex {
    LineErrorIndex::from_errors(&[SyntaxError {
        line,
        column,
        message: "invalid syntax".to_string(),
    }])
}

#[test]
fn test_keyword_and_def_name() {
    let out = plain("def f(x):");
    assert!(out.spans.contains(&span(0, 3, HighlightKind::Keyword)));
    assert!(out.spans.contains(&span(4, 1, HighlightKind::Function)));
    assert_eq!(out.outgoing, BlockState::Outside);
}

#[test]
fn test_keyword_needs_word_boundary() {
    let out = plain("define = classy");
    assert!(kinds_of(&out.spans, HighlightKind::Keyword).is_empty());
}

#[test]
fn test_comment_runs_to_end_of_line() {
    let line = "x = 1  # note";
    let out = plain(line);
    let hash = line.find('#').unwrap();
    assert_eq!(
        kinds_of(&out.spans, HighlightKind::Comment),
        vec![(hash, line.len() - hash)]
    );
    assert_eq!(kinds_of(&out.spans, HighlightKind::Number), vec![(4, 1)]);
}

#[test]
fn test_single_and_double_quoted_strings() {
    let line = r#"s = "a" + 'b' + "c\"d""#;
    let out = plain(line);
    let mut strings = kinds_of(&out.spans, HighlightKind::String);
    strings.sort();
    assert_eq!(strings.len(), 3);
    assert_eq!(strings[0], (4, 3));
    assert_eq!(strings[1], (line.find("'b'").unwrap(), 3));
    let escaped = line.rfind("\"c").unwrap();
    assert_eq!(strings[2], (escaped, line.len() - escaped));
}

#[test]
fn test_unterminated_quote_is_not_a_string_span() {
    let out = plain("y = \"unterminated");
    assert!(kinds_of(&out.spans, HighlightKind::String).is_empty());
}

#[test]
fn test_numbers() {
    let line = "y = 3.14 + 0x1F - x1";
    let out = plain(line);
    assert_eq!(
        kinds_of(&out.spans, HighlightKind::Number),
        vec![(4, 4), (line.find("0x1F").unwrap(), 4)]
    );
}

#[test]
fn test_later_rules_overlay_earlier_ones() {
    let line = "s = \"# not a comment\"";
    let out = plain(line);
    let runs = resolve(line, &out.spans);
    let inside = line.find('#').unwrap();
    let run = runs
        .iter()
        .find(|r| r.start <= inside && inside < r.end)
        .unwrap();
    assert_eq!(run.kind, Some(HighlightKind::String));
}

#[test]
fn test_triple_quote_state_propagates_across_lines() {
    let lines = ["s = \"\"\"start", "middle line", "end\"\"\" + x", "after = 1"];
    let out = Highlighter::python().highlight_lines(lines, &LineErrorIndex::default());

    assert_eq!(out[0].outgoing, BlockState::InsideTriple(TripleQuote::Double));
    assert!(out[0]
        .spans
        .contains(&span(4, lines[0].len() - 4, HighlightKind::String)));

    assert_eq!(out[1].outgoing, BlockState::InsideTriple(TripleQuote::Double));
    assert_eq!(
        out[1].spans.last(),
        Some(&span(0, lines[1].len(), HighlightKind::String))
    );

    assert_eq!(out[2].outgoing, BlockState::Outside);
    assert!(out[2].spans.contains(&span(0, 6, HighlightKind::String)));

    assert_eq!(out[3].outgoing, BlockState::Outside);
    assert!(kinds_of(&out[3].spans, HighlightKind::String).is_empty());
}

#[test]
fn test_closed_triple_quote_on_one_line_stays_outside() {
    let out = plain("x = '''a''' + 1");
    assert_eq!(out.outgoing, BlockState::Outside);
    assert!(out.spans.contains(&span(4, 7, HighlightKind::String)));
}

#[test]
fn test_other_delimiter_does_not_close_block() {
    let highlighter = Highlighter::python();
    let out = highlighter.highlight(
        "still ''' inside",
        1,
        BlockState::InsideTriple(TripleQuote::Double),
        &LineErrorIndex::default(),
    );
    assert_eq!(out.outgoing, BlockState::InsideTriple(TripleQuote::Double));
}

#[test]
fn test_block_states_are_incoming_per_line() {
    let states = Highlighter::python().block_states(["a = '''", "b", "'''", "c"]);
    assert_eq!(
        states,
        vec![
            BlockState::Outside,
            BlockState::InsideTriple(TripleQuote::Single),
            BlockState::InsideTriple(TripleQuote::Single),
            BlockState::Outside,
        ]
    );
}

#[test]
fn test_error_underline_is_drawn_last() {
    let index = index_with(0, 6);
    let out = Highlighter::python().highlight("def f(:", 0, BlockState::Outside, &index);
    assert_eq!(
        out.spans.last(),
        Some(&span(6, 1, HighlightKind::ErrorUnderline))
    );
}

#[test]
fn test_error_underline_only_on_its_line() {
    let index = index_with(3, 0);
    let out = Highlighter::python().highlight("x = 1", 2, BlockState::Outside, &index);
    assert!(kinds_of(&out.spans, HighlightKind::ErrorUnderline).is_empty());
}

#[test]
fn test_error_column_past_line_end_is_skipped() {
    let index = index_with(0, 40);
    let out = Highlighter::python().highlight("x = (", 0, BlockState::Outside, &index);
    assert!(kinds_of(&out.spans, HighlightKind::ErrorUnderline).is_empty());

    let out = Highlighter::python().highlight("", 0, BlockState::Outside, &index_with(0, 0));
    assert!(out.spans.is_empty());
}

#[test]
fn test_error_column_counts_chars_not_bytes() {
    let line = "s = 'é' + ü";
    let column = line.chars().position(|c| c == 'ü').unwrap();
    let out = Highlighter::python().highlight(line, 0, BlockState::Outside, &index_with(0, column));
    let byte = line.find('ü').unwrap();
    assert_eq!(
        out.spans.last(),
        Some(&span(byte, 'ü'.len_utf8(), HighlightKind::ErrorUnderline))
    );
}

#[test]
fn test_highlight_is_idempotent() {
    let highlighter = Highlighter::python();
    let index = index_with(0, 2);
    let line = "for i in range(10): print('x')  # loop";
    let a = highlighter.highlight(line, 0, BlockState::Outside, &index);
    let b = highlighter.highlight(line, 0, BlockState::Outside, &index);
    assert_eq!(a, b);
}

#[test]
fn test_trailing_newline_is_ignored() {
    let out = plain("x = 1\r\n");
    assert_eq!(kinds_of(&out.spans, HighlightKind::Number), vec![(4, 1)]);
}

#[test]
fn test_resolve_merges_runs_and_marks_underline() {
    let line = "def f";
    let index = index_with(0, 4);
    let out = Highlighter::python().highlight(line, 0, BlockState::Outside, &index);
    let runs = resolve(line, &out.spans);
    assert_eq!(
        runs,
        vec![
            StyledRun {
                start: 0,
                end: 3,
                kind: Some(HighlightKind::Keyword),
                underline: false,
            },
            StyledRun {
                start: 3,
                end: 4,
                kind: None,
                underline: false,
            },
            StyledRun {
                start: 4,
                end: 5,
                kind: Some(HighlightKind::Function),
                underline: true,
            },
        ]
    );
}

#[test]
fn test_resolve_clamps_out_of_range_spans() {
    let runs = resolve("ab", &[span(1, 10, HighlightKind::Number), span(9, 1, HighlightKind::Comment)]);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[1].kind, Some(HighlightKind::Number));
    assert_eq!(runs[1].end, 2);
}
