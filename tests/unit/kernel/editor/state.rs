use super::*;
use crate::kernel::editor::analyzer::CheckOutcome;
use crate::kernel::editor::syntax::{HighlightKind, TripleQuote};
use std::time::Duration;

fn config() -> CheckConfig {
    CheckConfig {
        debounce_ms: 300,
        analyzer_timeout_ms: 1_000,
        worker_threads: 1,
    }
}

fn result_for(request: &CheckRequest, outcome: CheckOutcome) -> CheckResult {
    CheckResult {
        doc: request.doc,
        seq: request.seq,
        version: request.version,
        outcome,
        elapsed: Duration::ZERO,
    }
}

fn failed(line: usize, message: &str) -> CheckOutcome {
    CheckOutcome::Failed(SyntaxError {
        line,
        column: 0,
        message: message.to_string(),
    })
}

#[test]
fn test_open_schedules_first_check_and_activates() {
    let mut editor = EditorState::new(config());
    let t0 = Instant::now();
    let doc = editor.open(None, "x = 1\n", t0);

    assert_eq!(editor.active(), Some(doc));
    let state = editor.get_mut(doc).unwrap();
    assert!(state.poll_check(doc, t0 + Duration::from_millis(299)).is_none());
    let request = state.poll_check(doc, t0 + Duration::from_millis(300)).unwrap();
    assert_eq!(request.text, "x = 1\n");
    assert_eq!(request.seq, 1);
}

#[test]
fn test_request_snapshots_latest_text() {
    let mut editor = EditorState::new(config());
    let t0 = Instant::now();
    let doc = editor.open(None, "a", t0);
    let state = editor.get_mut(doc).unwrap();

    state.set_text("ab", t0 + Duration::from_millis(100));
    state.apply_edit(
        &TextEdit::Insert {
            char_offset: 2,
            text: "c".to_string(),
        },
        t0 + Duration::from_millis(200),
    );

    assert!(state.poll_check(doc, t0 + Duration::from_millis(450)).is_none());
    let request = state.poll_check(doc, t0 + Duration::from_millis(500)).unwrap();
    assert_eq!(request.text, "abc");
    assert_eq!(request.version, 2);
}

#[test]
fn test_apply_result_swaps_errors_and_index_together() {
    let mut editor = EditorState::new(config());
    let t0 = Instant::now();
    let doc = editor.open(None, "def f(:\n    pass", t0);
    let state = editor.get_mut(doc).unwrap();
    let request = state.poll_check(doc, t0 + Duration::from_secs(1)).unwrap();

    let before = state.error_index();
    assert!(state.apply_result(&result_for(&request, failed(0, "expected ')'"))));
    let after = state.error_index();

    assert!(before.is_empty());
    assert_eq!(after.message(0), Some("expected ')'"));
    assert_eq!(state.errors().len(), 1);
    assert_eq!(state.checked_version(), Some(request.version));
}

#[test]
fn test_crashed_or_timed_out_check_clears_errors() {
    let mut editor = EditorState::new(config());
    let t0 = Instant::now();
    let doc = editor.open(None, "x = (", t0);
    let state = editor.get_mut(doc).unwrap();

    let first = state.poll_check(doc, t0 + Duration::from_secs(1)).unwrap();
    state.apply_result(&result_for(&first, failed(0, "invalid syntax")));
    assert_eq!(state.errors().len(), 1);

    state.set_text("x = ((", t0 + Duration::from_secs(2));
    let second = state.poll_check(doc, t0 + Duration::from_secs(3)).unwrap();
    assert!(state.apply_result(&result_for(&second, CheckOutcome::TimedOut)));
    assert!(state.errors().is_empty());
    assert!(state.error_index().is_empty());
}

#[test]
fn test_highlight_line_uses_cached_block_state() {
    let mut editor = EditorState::new(config());
    let doc = editor.open(None, "s = \"\"\"\ninside\n\"\"\"\n", Instant::now());
    let state = editor.get(doc).unwrap();

    assert_eq!(
        state.block_state(1),
        BlockState::InsideTriple(TripleQuote::Double)
    );
    let out = state.highlight_line(1, "inside");
    assert!(out
        .spans
        .iter()
        .any(|s| s.kind == HighlightKind::String && s.start == 0 && s.len == 6));
    assert_eq!(state.block_state(99), BlockState::Outside);
}

#[test]
fn test_close_moves_active_to_remaining_document() {
    let mut editor = EditorState::new(config());
    let now = Instant::now();
    let a = editor.open(None, "a", now);
    let b = editor.open(None, "b", now);
    assert_eq!(editor.active(), Some(b));

    assert!(editor.close(b));
    assert_eq!(editor.active(), Some(a));
    assert!(!editor.close(b));
    assert!(editor.close(a));
    assert_eq!(editor.active(), None);
    assert!(editor.is_empty());
}
