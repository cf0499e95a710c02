use super::*;

#[track_caller]
fn assert_error_at(src: &str, line: usize, column: usize, message: &str) {
    let err = analyze(src).unwrap_or_else(|| panic!("no error reported for {src:?}"));
    assert_eq!(
        (err.line, err.column),
        (line, column),
        "wrong position for {src:?}: {}",
        err.message
    );
    assert!(
        err.message.contains(message),
        "message {:?} for {src:?} lacks {message:?}",
        err.message
    );
}

#[test]
fn test_clean_source_has_no_error() {
    let src = "import os\n\ndef main(argv):\n    return len(argv)\n";
    assert_eq!(analyze(src), None);
    assert_eq!(check(src, DEFAULT_ANALYZER_TIMEOUT), CheckOutcome::Clean);
}

#[test]
fn test_empty_source_is_clean() {
    assert_eq!(analyze(""), None);
}

#[test]
fn test_valid_layouts_are_clean() {
    let cases = [
        "def f():\n    x = 1\n\n\n    return x\n",
        "x = (\n  1,\n  2,\n)\n",
        "y = 1 +\\\n    2\n",
        "x = \\\n    r'C'\n",
        "if x:  # c\n    pass\n",
        "x = 1; y = 2\n",
        "if x:\n    # c\n  # d\n    y = 1\n",
        "s = \"\"\"\nx\n\"\"\"\n",
        "def f():\n\tif x:\n\t\treturn 1\n\treturn 2\n",
        "class A:\n    x: int\n",
        "print(\"a(\")\n",
    ];
    for src in cases {
        assert_eq!(analyze(src), None, "{src:?}");
    }
}

#[test]
fn test_error_points_at_offending_token() {
    let cases = [
        ("x = 1 +\n", 0, 7, "invalid syntax"),
        ("if x\n    pass\n", 0, 4, "expected ':'"),
        ("print(1))\n", 0, 8, "unmatched ')'"),
        ("for in x:\n  pass\n", 0, 4, "invalid syntax"),
        ("x = [1, 2\ny = 3\n", 0, 4, "'[' was never closed"),
        ("def f(:\n    pass\n", 0, 6, "expected"),
        ("x = [1)\n", 0, 6, "does not match opening parenthesis '['"),
        ("x = 1 2\n", 0, 6, "invalid syntax"),
        ("def f(x):\n    return x +\n", 1, 14, "invalid syntax"),
        ("a = (\n\nb = )\n", 2, 2, "invalid syntax"),
        ("try:\n    pass\n", 1, 8, "expected 'except' or 'finally' block"),
    ];
    for (src, line, column, message) in cases {
        assert_error_at(src, line, column, message);
    }
}

#[test]
fn test_unterminated_string_points_at_opening_quote() {
    assert_error_at("x = 1\ny = \"unterminated\n", 1, 4, "unterminated string literal");
}

#[test]
fn test_column_counts_chars_not_bytes() {
    assert_error_at("ééé = (\n", 0, 6, "'(' was never closed");
}

#[test]
fn test_missing_block_is_reported() {
    let cases = [
        (
            "def f():\nreturn 1\n",
            1,
            0,
            "expected an indented block after function definition on line 1",
        ),
        (
            "class A:\n\n",
            1,
            0,
            "expected an indented block after class definition on line 1",
        ),
        (
            "def f():\n",
            0,
            8,
            "expected an indented block after function definition on line 1",
        ),
        (
            "if x:\n    if y:\n    z = 1\n",
            2,
            4,
            "expected an indented block after 'if' statement on line 2",
        ),
    ];
    for (src, line, column, message) in cases {
        assert_error_at(src, line, column, message);
    }
}

#[test]
fn test_indentation_errors_are_reported() {
    let cases = [
        ("x = 1\n  y = 2\n", 1, 1, "unexpected indent"),
        ("@dec\n  def f():\n    pass\n", 1, 1, "unexpected indent"),
        ("x = 1 # \\\n  + 2\n", 1, 1, "unexpected indent"),
        (
            "if True:\n    x = 1\n  y = 2\n",
            2,
            7,
            "unindent does not match any outer indentation level",
        ),
        (
            "if x:\n    y\n  else:\n    z\n",
            2,
            7,
            "unindent does not match any outer indentation level",
        ),
        (
            "if x:\n\ty = 1\n        z = 2\n",
            2,
            0,
            "inconsistent use of tabs and spaces",
        ),
        ("if a:\n    b\nele:\n    c\n", 2, 4, "invalid syntax"),
    ];
    for (src, line, column, message) in cases {
        assert_error_at(src, line, column, message);
    }
}

#[test]
fn test_statements_outside_their_construct() {
    let cases = [
        ("return\n", 0, 0, "'return' outside function"),
        ("class A:\n    return 1\n", 1, 4, "'return' outside function"),
        ("yield 1\n", 0, 0, "'yield' outside function"),
        ("continue\n", 0, 0, "'continue' not properly in loop"),
        ("for x in y:\n    pass\nelse:\n    break\n", 3, 4, "'break' outside loop"),
        ("while 1:\n    def f():\n        break\n", 2, 8, "'break' outside loop"),
    ];
    for (src, line, column, message) in cases {
        assert_error_at(src, line, column, message);
    }

    for src in [
        "def g():\n    yield 1\n",
        "x = lambda: (yield)\n",
        "for i in x:\n    if i:\n        continue\n",
        "while 1:\n    try:\n        pass\n    finally:\n        break\n",
    ] {
        assert_eq!(analyze(src), None, "{src:?}");
    }
}

#[test]
fn test_only_first_error_is_reported() {
    let outcome = check("a = (\n\nb = )\n", DEFAULT_ANALYZER_TIMEOUT);
    assert_eq!(outcome.label(), "failed");
    assert_eq!(outcome.errors().len(), 1);
}

#[test]
fn test_arbitrary_bytes_do_not_panic() {
    for src in ["\0\0\0", "\u{feff}def", "))))((((", "\"\"\"", "é = ñ(", "\t\t\tif"] {
        let outcome = check(src, DEFAULT_ANALYZER_TIMEOUT);
        assert!(matches!(
            outcome,
            CheckOutcome::Clean | CheckOutcome::Failed(_)
        ));
    }
}

#[test]
fn test_outcome_helpers() {
    let err = SyntaxError {
        line: 3,
        column: 1,
        message: "invalid syntax".to_string(),
    };
    let failed = CheckOutcome::Failed(err.clone());
    assert_eq!(failed.error(), Some(&err));
    assert_eq!(failed.errors(), vec![err.clone()]);
    assert_eq!(failed.into_error(), Some(err));

    for outcome in [CheckOutcome::Clean, CheckOutcome::Crashed, CheckOutcome::TimedOut] {
        assert!(outcome.error().is_none());
        assert!(outcome.errors().is_empty());
    }
    assert_eq!(CheckOutcome::TimedOut.label(), "timed_out");
    assert_eq!(CheckOutcome::Crashed.label(), "crashed");
}
