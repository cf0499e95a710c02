use super::*;
use crate::kernel::editor::{CheckOutcome, CheckRequest, CheckResult, SyntaxError};
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::services::ports::{CheckConfig, CheckExecutor};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Always reports `error`.
struct FixedExecutor {
    tx: Sender<AppMessage>,
    error: SyntaxError,
}

impl CheckExecutor for FixedExecutor {
    fn submit(&self, request: CheckRequest) {
        let _ = self.tx.send(AppMessage::CheckCompleted(CheckResult {
            doc: request.doc,
            seq: request.seq,
            version: request.version,
            outcome: CheckOutcome::Failed(self.error.clone()),
            elapsed: Duration::ZERO,
        }));
    }
}

fn checked(text: &str, error: SyntaxError) -> (Workbench, DocumentId) {
    let (tx, rx) = mpsc::channel();
    let mut workbench = Workbench::with_executor(
        Arc::new(FixedExecutor { tx, error }),
        rx,
        CheckConfig::default(),
    );
    let t0 = Instant::now();
    let doc = workbench.open_document(None, text, t0);
    let due = t0 + Duration::from_millis(300);
    workbench.pump(due);
    workbench.pump(due);
    (workbench, doc)
}

fn render(workbench: &Workbench, doc: DocumentId, options: ReportOptions) -> String {
    let mut out = Vec::new();
    write_document(&mut out, workbench, doc, &SyntaxTheme::default(), options).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn plain_report_marks_error_column() {
    let (workbench, doc) = checked(
        "x = 1\ny = (\n",
        SyntaxError {
            line: 1,
            column: 4,
            message: "expected ')'".to_string(),
        },
    );

    let text = render(
        &workbench,
        doc,
        ReportOptions {
            color: false,
            line_numbers: true,
        },
    );

    assert_eq!(text, "1 | x = 1\n2 | y = (\n        ^\n");
}

#[test]
fn styled_report_uses_curly_underline() {
    let (workbench, doc) = checked(
        "y = (",
        SyntaxError {
            line: 0,
            column: 4,
            message: "expected ')'".to_string(),
        },
    );

    let text = render(&workbench, doc, ReportOptions::default());

    assert!(text.contains("\u{1b}[4:3m"));
    assert!(text.contains("1 | "));
    assert!(text.ends_with('\n'));
}

#[test]
fn problems_list_one_row_per_error() {
    let (workbench, _doc) = checked(
        "a = (",
        SyntaxError {
            line: 0,
            column: 0,
            message: "invalid syntax".to_string(),
        },
    );
    let mut out = Vec::new();
    write_problems(&mut out, "a.py", workbench.error_rows()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "a.py:\n  Line 1: invalid syntax\n"
    );

    let mut empty = Vec::new();
    write_problems(&mut empty, "b.py", &[]).unwrap();
    assert_eq!(String::from_utf8(empty).unwrap(), "b.py: no problems\n");
}
