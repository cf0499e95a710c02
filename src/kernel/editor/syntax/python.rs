use memchr::memmem;

/// Delimiter of a triple-quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripleQuote {
    Double,
    Single,
}

impl TripleQuote {
    pub const fn delimiter(self) -> &'static str {
        match self {
            Self::Double => "\"\"\"",
            Self::Single => "'''",
        }
    }
}

/// State carried from the end of one line to the start of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockState {
    #[default]
    Outside,
    InsideTriple(TripleQuote),
}

impl BlockState {
    pub fn is_inside_triple(self) -> bool {
        matches!(self, Self::InsideTriple(_))
    }
}

pub(super) const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "case", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "match", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Byte ranges covered by triple-quoted strings on `line`, plus the state
/// handed to the next line.
pub(super) fn triple_quote_ranges(
    line: &str,
    incoming: BlockState,
) -> (Vec<(usize, usize)>, BlockState) {
    let bytes = line.as_bytes();
    let mut ranges = Vec::new();
    let mut pos = 0usize;

    if let BlockState::InsideTriple(quote) = incoming {
        match memmem::find(bytes, quote.delimiter().as_bytes()) {
            Some(close) => {
                pos = close + quote.delimiter().len();
                ranges.push((0, pos));
            }
            None => {
                ranges.push((0, bytes.len()));
                return (ranges, incoming);
            }
        }
    }

    while pos < bytes.len() {
        let Some((open, quote)) = next_opening(&bytes[pos..]) else {
            break;
        };
        let start = pos + open;
        let body = start + quote.delimiter().len();
        match memmem::find(&bytes[body..], quote.delimiter().as_bytes()) {
            Some(close) => {
                let end = body + close + quote.delimiter().len();
                ranges.push((start, end));
                pos = end;
            }
            None => {
                ranges.push((start, bytes.len()));
                return (ranges, BlockState::InsideTriple(quote));
            }
        }
    }

    (ranges, BlockState::Outside)
}

fn next_opening(haystack: &[u8]) -> Option<(usize, TripleQuote)> {
    let double = memmem::find(haystack, TripleQuote::Double.delimiter().as_bytes());
    let single = memmem::find(haystack, TripleQuote::Single.delimiter().as_bytes());
    match (double, single) {
        (Some(d), Some(s)) if s < d => Some((s, TripleQuote::Single)),
        (Some(d), _) => Some((d, TripleQuote::Double)),
        (None, Some(s)) => Some((s, TripleQuote::Single)),
        (None, None) => None,
    }
}
