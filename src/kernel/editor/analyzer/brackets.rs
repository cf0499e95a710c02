use tree_sitter::Node;

use super::{leaves, start_of, Finding};

pub(super) enum Imbalance {
    /// A closer with no opener, or the wrong one.
    Stray(Finding),
    /// Input ended inside a bracket.
    Unclosed(Finding),
}

/// Matches brackets across every token in the tree.
pub(super) fn scan(root: Node<'_>, text: &str) -> Option<Imbalance> {
    let leaves = leaves(root);
    let last_real = leaves.iter().rposition(|leaf| !leaf.is_missing());
    let mut open: Vec<Node<'_>> = Vec::new();

    for (i, leaf) in leaves.iter().enumerate() {
        let kind = leaf.kind();
        if leaf.is_missing() {
            // An inserted closer with real input after it marks where the
            // parser resumed; one at the very end closes nothing.
            if opener_of(kind).is_some() && last_real.is_some_and(|real| real > i) {
                open.pop();
            }
            continue;
        }
        if matches!(kind, "(" | "[" | "{") {
            open.push(*leaf);
            continue;
        }
        let Some(expected) = opener_of(kind) else {
            continue;
        };
        let Some(opener) = open.pop() else {
            return Some(Imbalance::Stray(Finding::specific(
                start_of(*leaf, text),
                format!("unmatched '{kind}'"),
            )));
        };
        if opener.kind() != expected {
            return Some(Imbalance::Stray(Finding::specific(
                start_of(*leaf, text),
                format!(
                    "closing parenthesis '{kind}' does not match opening parenthesis '{}'",
                    opener.kind()
                ),
            )));
        }
    }

    open.first().map(|first| {
        Imbalance::Unclosed(Finding::specific(
            start_of(*first, text),
            format!("'{}' was never closed", first.kind()),
        ))
    })
}

fn opener_of(closer: &str) -> Option<&'static str> {
    match closer {
        ")" => Some("("),
        "]" => Some("["),
        "}" => Some("{"),
        _ => None,
    }
}
