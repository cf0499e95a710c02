//! Checks the grammar leaves to the tokenizer and compiler: indentation,
//! block headers, reserved words and statements outside their construct.

use tree_sitter::Node;

use super::{end_of, is_hard_keyword, line_prefix, start_of, Finding, INVALID_SYNTAX};

const TAB_SIZE: usize = 8;
const INCONSISTENT_TABS: &str = "inconsistent use of tabs and spaces in indentation";

pub(super) fn first_error(root: Node<'_>, text: &str) -> Option<Finding> {
    let mut findings: Vec<Finding> = indentation_error(root, text).into_iter().collect();

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if is_hard_keyword(node, text) {
            findings.push(Finding::generic(start_of(node, text), INVALID_SYNTAX));
        }
        if let Some(message) = misplaced_statement(node) {
            findings.push(Finding::specific(start_of(node, text), message));
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    findings.into_iter().min_by_key(Finding::position)
}

/// Replays indentation tracking over the logical lines of the tree.
fn indentation_error(root: Node<'_>, text: &str) -> Option<Finding> {
    // (width with tab stops, width counting a tab as one column)
    let mut levels: Vec<(usize, usize)> = vec![(0, 0)];
    let mut depth = 0usize;
    let mut prev: Option<Node<'_>> = None;

    for token in tokens(root) {
        let starts_logical_line = depth == 0
            && prev.map_or(true, |prev| {
                token.start_position().row > prev.end_position().row
                    && !continues_line(prev, text)
            });

        if starts_logical_line {
            let header = match prev {
                Some(colon) if colon.kind() == ":" => {
                    if !is_block_header(colon) {
                        return Some(Finding::specific(end_of(colon, text), INVALID_SYNTAX));
                    }
                    Some(colon)
                }
                _ => None,
            };
            let row = token.start_position().row;
            let prefix = line_prefix(token, text);
            let (width, alt_width) = measure(prefix);
            let (top, alt_top) = levels.last().copied().unwrap_or((0, 0));

            if width > top {
                if header.is_none() {
                    let column = prefix.chars().count().saturating_sub(1);
                    return Some(Finding::specific((row, column), "unexpected indent"));
                }
                if alt_width <= alt_top {
                    return Some(Finding::specific((row, 0), INCONSISTENT_TABS));
                }
                levels.push((width, alt_width));
            } else {
                if let Some(colon) = header {
                    return Some(Finding::specific(start_of(token, text), expected_block(colon)));
                }
                while levels.len() > 1 && levels.last().is_some_and(|&(level, _)| width < level) {
                    levels.pop();
                }
                let (level, alt_level) = levels.last().copied().unwrap_or((0, 0));
                if width != level {
                    return Some(Finding::specific(
                        (row, line_chars(token, text)),
                        "unindent does not match any outer indentation level",
                    ));
                }
                if alt_width != alt_level {
                    return Some(Finding::specific((row, 0), INCONSISTENT_TABS));
                }
            }
        }

        match token.kind() {
            "(" | "[" | "{" => depth += 1,
            ")" | "]" | "}" => depth = depth.saturating_sub(1),
            _ => {}
        }
        prev = Some(token);
    }

    let last = prev?;
    if last.kind() != ":" || depth != 0 {
        return None;
    }
    if !is_block_header(last) {
        return Some(Finding::specific(end_of(last, text), INVALID_SYNTAX));
    }
    // The block is missing at end of input: reported on the next line when
    // one exists, else right after the colon.
    let end = last.end_byte();
    let has_next_line = text
        .get(end..)
        .and_then(|rest| rest.find('\n'))
        .is_some_and(|newline| end + newline + 1 < text.len());
    let at = if has_next_line {
        (last.end_position().row + 1, 0)
    } else {
        end_of(last, text)
    };
    Some(Finding::specific(at, expected_block(last)))
}

/// Significant tokens in document order. A string is one token however
/// many lines it spans; comments and zero-width tokens are dropped.
fn tokens<'t>(root: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "string" {
            out.push(node);
            continue;
        }
        let count = node.child_count();
        if count == 0 {
            let skipped = matches!(node.kind(), "comment" | "line_continuation")
                || node.is_missing()
                || node.start_byte() == node.end_byte();
            if !skipped {
                out.push(node);
            }
            continue;
        }
        for i in (0..count).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    out
}

/// Whether the physical line `prev` ends on is joined to the next by a
/// trailing backslash.
fn continues_line(prev: Node<'_>, text: &str) -> bool {
    let rest = text.get(prev.end_byte()..).unwrap_or("");
    let tail = rest.split('\n').next().unwrap_or("").trim_end_matches('\r');
    tail.ends_with('\\') && !tail.contains('#')
}

fn measure(prefix: &str) -> (usize, usize) {
    prefix.chars().fold((0, 0), |(width, alt), ch| match ch {
        '\t' => ((width / TAB_SIZE + 1) * TAB_SIZE, alt + 1),
        '\x0c' => (0, 0),
        _ => (width + 1, alt + 1),
    })
}

/// Length in chars of the line `token` starts on.
fn line_chars(token: Node<'_>, text: &str) -> usize {
    let line_start = token
        .start_byte()
        .saturating_sub(token.start_position().column);
    text.get(line_start..)
        .and_then(|rest| rest.split('\n').next())
        .map_or(0, |line| line.trim_end_matches('\r').chars().count())
}

/// A colon ending a logical line must open a block. Colons inside
/// recovery spans get the benefit of the doubt.
fn is_block_header(colon: Node<'_>) -> bool {
    colon
        .parent()
        .map_or(true, |owner| owner.is_error() || block_owner(owner.kind()).is_some())
}

fn block_owner(kind: &str) -> Option<&'static str> {
    Some(match kind {
        "function_definition" => "function definition",
        "class_definition" => "class definition",
        "if_statement" => "'if' statement",
        "elif_clause" => "'elif' statement",
        "else_clause" => "'else' statement",
        "for_statement" => "'for' statement",
        "while_statement" => "'while' statement",
        "with_statement" => "'with' statement",
        "try_statement" => "'try' statement",
        "except_clause" => "'except' statement",
        "finally_clause" => "'finally' statement",
        "match_statement" => "'match' statement",
        "case_clause" => "'case' statement",
        _ => return None,
    })
}

fn expected_block(colon: Node<'_>) -> String {
    let owner = colon
        .parent()
        .and_then(|owner| block_owner(owner.kind()).map(|what| (what, owner)));
    match owner {
        Some((what, owner)) => format!(
            "expected an indented block after {what} on line {}",
            owner.start_position().row + 1
        ),
        None => "expected an indented block".to_string(),
    }
}

fn misplaced_statement(node: Node<'_>) -> Option<&'static str> {
    let kind = node.kind();
    let message = match kind {
        "return_statement" => "'return' outside function",
        "yield" if node.is_named() => "'yield' outside function",
        "break_statement" => "'break' outside loop",
        "continue_statement" => "'continue' not properly in loop",
        _ => return None,
    };

    let mut child = node;
    let mut current = node.parent();
    while let Some(ancestor) = current {
        let owner = ancestor.kind();
        if matches!(kind, "return_statement" | "yield") {
            if owner == "function_definition" || (kind == "yield" && owner == "lambda") {
                return None;
            }
            if owner == "class_definition" {
                break;
            }
        } else {
            // A loop's `else` clause is outside the loop body.
            if matches!(owner, "for_statement" | "while_statement") && child.kind() != "else_clause"
            {
                return None;
            }
            if matches!(owner, "function_definition" | "class_definition") {
                break;
            }
        }
        child = ancestor;
        current = ancestor.parent();
    }
    Some(message)
}
