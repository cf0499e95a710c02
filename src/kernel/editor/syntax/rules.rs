use regex::Regex;

use super::python::PYTHON_KEYWORDS;
use super::HighlightKind;

/// One static lexical rule. `group` selects the capture that gets styled.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pub pattern: Regex,
    pub kind: HighlightKind,
    pub group: usize,
}

impl HighlightRule {
    fn new(pattern: &str, kind: HighlightKind, group: usize) -> Option<Self> {
        match Regex::new(pattern) {
            Ok(pattern) => Some(Self {
                pattern,
                kind,
                group,
            }),
            Err(e) => {
                tracing::error!(error = %e, ?kind, "invalid highlight pattern");
                None
            }
        }
    }

    /// Byte ranges this rule styles on `line`.
    pub(super) fn ranges<'a>(&'a self, line: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.pattern
            .captures_iter(line)
            .filter_map(move |caps| caps.get(self.group))
            .map(|m| (m.start(), m.end()))
    }
}

/// Application order matters: later rules overlay earlier ones.
pub(super) fn python_rules() -> Vec<HighlightRule> {
    let keywords = format!(r"\b(?:{})\b", PYTHON_KEYWORDS.join("|"));
    [
        HighlightRule::new(&keywords, HighlightKind::Keyword, 0),
        HighlightRule::new(r"#.*", HighlightKind::Comment, 0),
        HighlightRule::new(r#""(?:[^"\\]|\\.)*?""#, HighlightKind::String, 0),
        HighlightRule::new(r"'(?:[^'\\]|\\.)*?'", HighlightKind::String, 0),
        HighlightRule::new(
            r"\b(?:0[xXoObB][0-9a-fA-F_]+|[0-9][0-9_]*(?:\.[0-9_]+)?(?:[eE][+-]?[0-9]+)?[jJ]?)\b",
            HighlightKind::Number,
            0,
        ),
        HighlightRule::new(
            r"\bdef\s+([A-Za-z_][A-Za-z0-9_]*)",
            HighlightKind::Function,
            1,
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
