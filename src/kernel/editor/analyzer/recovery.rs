//! Diagnosis of the nodes tree-sitter inserts while recovering: `ERROR`
//! spans of tokens it could not place and zero-width `MISSING` tokens.

use tree_sitter::Node;

use super::{end_of, is_hard_keyword, leaves, start_of, starts_line, Finding, INVALID_SYNTAX};

const UNTERMINATED_STRING: &str = "unterminated string literal";

/// First recovery node in preorder, located at the token it points to.
/// The caller has checked that the tree contains one.
pub(super) fn first_error(root: Node<'_>, text: &str) -> Finding {
    // Preorder visits nodes in document order, parents before children.
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            if node.kind() == "string_end" {
                let opening = node.parent().unwrap_or(node);
                return Finding::specific(start_of(opening, text), UNTERMINATED_STRING);
            }
            return Finding::generic(start_of(node, text), missing_message(node));
        }
        if node.is_error() {
            return diagnose(node, text);
        }
        if !node.has_error() {
            continue;
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    // The root claims an error but no node carries it.
    Finding::generic(start_of(root, text), INVALID_SYNTAX)
}

fn missing_message(node: Node<'_>) -> String {
    if node.is_named() {
        format!("expected {}", node.kind())
    } else {
        format!("expected '{}'", node.kind())
    }
}

fn diagnose(error: Node<'_>, text: &str) -> Finding {
    let leaves = leaves(error);
    if let Some(quote) = leaves.iter().find(|leaf| is_orphan_quote(**leaf)) {
        return Finding::specific(start_of(*quote, text), UNTERMINATED_STRING);
    }

    let located = match leaves.first() {
        Some(first) if starts_line(*first, text) => {
            unfinished_statement(error, *first, &leaves, text)
        }
        _ => stray_tokens(error, &leaves, text),
    };
    let keyword = leaves
        .iter()
        .find(|leaf| is_hard_keyword(**leaf, text))
        .map(|leaf| Finding::generic(start_of(*leaf, text), INVALID_SYNTAX));

    match keyword {
        Some(keyword) if keyword.position() <= located.position() => keyword,
        _ => located,
    }
}

/// A string opener left outside any `string` node.
fn is_orphan_quote(leaf: Node<'_>) -> bool {
    matches!(leaf.kind(), "string_start" | "\"" | "'")
        && leaf.parent().map_or(true, |parent| parent.kind() != "string")
}

/// `error` opens its line, so it holds a whole statement the parser gave up
/// on. The defect sits after the last token of its first line.
fn unfinished_statement(
    error: Node<'_>,
    first: Node<'_>,
    leaves: &[Node<'_>],
    text: &str,
) -> Finding {
    if first.kind() == "try" && !leaves.iter().any(|l| matches!(l.kind(), "except" | "finally")) {
        return Finding::specific(end_of(error, text), "expected 'except' or 'finally' block");
    }

    let row = first.start_position().row;
    let on_row = || leaves.iter().filter(move |l| l.start_position().row == row);
    let last = on_row().last().copied().unwrap_or(first);
    if is_compound_keyword(first.kind()) && !on_row().any(|l| l.kind() == ":") {
        return Finding::specific(end_of(last, text), "expected ':'");
    }
    Finding::generic(end_of(last, text), INVALID_SYNTAX)
}

/// `error` sits inside a statement. Two adjacent operands point at the
/// second one; otherwise the span itself is unexpected.
fn stray_tokens(error: Node<'_>, leaves: &[Node<'_>], text: &str) -> Finding {
    let follower = error
        .next_sibling()
        .filter(|next| next.is_named() && next.start_position().row == error.end_position().row);
    match (leaves.last(), follower) {
        (Some(last), Some(next)) if last.is_named() => {
            Finding::generic(start_of(next, text), INVALID_SYNTAX)
        }
        _ => Finding::generic(start_of(error, text), INVALID_SYNTAX),
    }
}

fn is_compound_keyword(kind: &str) -> bool {
    matches!(
        kind,
        "if" | "elif"
            | "else"
            | "for"
            | "while"
            | "def"
            | "class"
            | "with"
            | "try"
            | "except"
            | "finally"
            | "async"
    )
}
