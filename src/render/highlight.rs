//! Keyword coloring and inline suggestion ghost text.

use crate::core::pattern::find_word;

pub const RESET: &str = "\x1b[0m";
pub const DIM: &str = "\x1b[90m";

/// Ordered keyword → SGR color table.
///
/// Entries are applied in table order and each colors only its first
/// whole-word match. Whole-word matches of distinct keywords cannot overlap,
/// but a keyword can overlap the ghost text; such spans are emitted as-is and
/// whichever reset comes first ends both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<(String, String)>,
}

const DEFAULT_KEYWORDS: &[(&str, &str)] = &[
    ("int", "\x1b[1;34m"),
    ("float", "\x1b[1;34m"),
    ("double", "\x1b[1;34m"),
    ("char", "\x1b[1;34m"),
    ("bool", "\x1b[1;34m"),
    ("void", "\x1b[1;34m"),
    ("string", "\x1b[1;34m"),
    ("if", "\x1b[1;35m"),
    ("else", "\x1b[1;35m"),
    ("for", "\x1b[1;35m"),
    ("while", "\x1b[1;35m"),
    ("return", "\x1b[1;35m"),
    ("break", "\x1b[1;35m"),
    ("continue", "\x1b[1;35m"),
    ("true", "\x1b[1;33m"),
    ("false", "\x1b[1;33m"),
    ("include", "\x1b[1;32m"),
    ("using", "\x1b[1;32m"),
    ("namespace", "\x1b[1;32m"),
    ("const", "\x1b[1;36m"),
    ("auto", "\x1b[1;36m"),
];

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl KeywordTable {
    pub fn new<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(word, color)| (word.to_string(), color.to_string()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(word, color)| (word.as_str(), color.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Inline completion to splice into a line at a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost<'a> {
    pub offset: usize,
    pub text: &'a str,
}

/// A style switch at a byte position of the augmented line.
#[derive(Debug, Clone, Copy)]
struct Mark<'a> {
    at: usize,
    code: &'a str,
    closes: bool,
}

/// Render `line` with the ghost text spliced in and keywords colored.
///
/// The returned string is display-only; `line` itself is never changed.
pub fn highlight_line(line: &str, ghost: Option<Ghost<'_>>, keywords: &KeywordTable) -> String {
    let mut text = line.to_string();
    let mut marks: Vec<Mark<'_>> = Vec::new();

    if let Some(ghost) = ghost.filter(|ghost| !ghost.text.is_empty()) {
        let offset = ghost.offset.min(text.len());
        text.insert_str(offset, ghost.text);
        marks.push(Mark {
            at: offset,
            code: DIM,
            closes: false,
        });
        marks.push(Mark {
            at: offset + ghost.text.len(),
            code: RESET,
            closes: true,
        });
    }

    for (word, color) in keywords.iter() {
        let Some(start) = find_word(&text, word) else {
            continue;
        };
        marks.push(Mark {
            at: start,
            code: color,
            closes: false,
        });
        marks.push(Mark {
            at: start + word.len(),
            code: RESET,
            closes: true,
        });
    }

    // Stable sort: at equal positions resets go first, then opens in the
    // order they were pushed.
    marks.sort_by_key(|mark| (mark.at, !mark.closes));

    let mut out = String::with_capacity(text.len() + marks.len() * 8);
    let mut cursor = 0usize;
    for mark in &marks {
        out.push_str(&text[cursor..mark.at]);
        out.push_str(mark.code);
        cursor = mark.at;
    }
    out.push_str(&text[cursor..]);
    out
}
