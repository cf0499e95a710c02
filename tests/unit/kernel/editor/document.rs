use super::*;

#[test]
fn test_lines_strip_line_endings() {
    let doc = Document::new(None, "a = 1\r\nb = 2\n");
    let lines: Vec<String> = doc.lines().map(|l| l.into_owned()).collect();
    assert_eq!(lines, vec!["a = 1", "b = 2", ""]);
    assert_eq!(doc.len_lines(), 3);
    assert!(doc.line(3).is_none());
}

#[test]
fn test_apply_insert_delete_replace_bumps_version() {
    let mut doc = Document::new(Some(PathBuf::from("demo.py")), "x = 1");
    assert_eq!(doc.version(), 0);

    assert!(doc.apply(&TextEdit::Insert {
        char_offset: 5,
        text: "0".to_string(),
    }));
    assert_eq!(doc.snapshot(), "x = 10");

    assert!(doc.apply(&TextEdit::Replace {
        start: 0,
        end: 1,
        text: "y".to_string(),
    }));
    assert_eq!(doc.snapshot(), "y = 10");

    assert!(doc.apply(&TextEdit::Delete { start: 4, end: 6 }));
    assert_eq!(doc.snapshot(), "y = ");
    assert_eq!(doc.version(), 3);
    assert_eq!(doc.path(), Some(Path::new("demo.py")));
}

#[test]
fn test_apply_clamps_out_of_range_edits() {
    let mut doc = Document::new(None, "abc");
    assert!(!doc.apply(&TextEdit::Delete { start: 10, end: 20 }));
    assert!(!doc.apply(&TextEdit::Insert {
        char_offset: 1,
        text: String::new(),
    }));
    assert!(doc.apply(&TextEdit::Insert {
        char_offset: 99,
        text: "d".to_string(),
    }));
    assert_eq!(doc.snapshot(), "abcd");
    assert_eq!(doc.version(), 1);
}

#[test]
fn test_move_caret_to_line_start() {
    let mut doc = Document::new(None, "first\nsecond\nthird");
    assert_eq!(doc.move_caret_to_line(1), 6);
    assert_eq!(doc.caret(), 6);
    assert_eq!(doc.move_caret_to_line(42), 13);
}

#[test]
fn test_set_text_clamps_caret() {
    let mut doc = Document::new(None, "first\nsecond");
    doc.move_caret_to_line(1);
    doc.set_text("x");
    assert_eq!(doc.caret(), 1);
    assert_eq!(doc.version(), 1);
}
