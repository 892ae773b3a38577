//! Identifier discovery and inline completion.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::prefix_index::PrefixIndex;

/// Byte that completes a statement and triggers identifier discovery.
pub const STATEMENT_TERMINATOR: char = ';';

/// Identifiers this short are never stored.
const MIN_IDENTIFIER_LEN: usize = 4;

/// Typed words shorter than this never get a suggestion.
pub const MIN_PREFIX_LEN: usize = 4;

/// Optional type keyword, identifier, `=`, anything up to the terminator.
static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:\b(?:int|long|short|float|double|char|bool|auto|string|var|let|const|unsigned)\s+)?\b([A-Za-z_][A-Za-z0-9_]*)\s*=[^;]*;",
    )
    .expect("assignment pattern is valid")
});

/// Known identifiers plus the prefix tree built from them. Append-only.
#[derive(Debug, Clone, Default)]
pub struct IdentifierSet {
    known: HashSet<String>,
    index: PrefixIndex,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.known.contains(identifier)
    }

    /// Store `identifier` if it is long enough. Returns whether it was new.
    pub fn insert(&mut self, identifier: &str) -> bool {
        if identifier.len() < MIN_IDENTIFIER_LEN || self.known.contains(identifier) {
            return false;
        }
        self.known.insert(identifier.to_string());
        self.index.insert(identifier);
        true
    }

    /// Scan `line` for assignment-like statements and store their targets.
    /// Returns the identifiers that were not known before.
    pub fn discover(&mut self, line: &str) -> Vec<String> {
        let mut found = Vec::new();
        for captures in ASSIGNMENT.captures_iter(line) {
            let Some(name) = captures.get(1) else {
                continue;
            };
            if self.insert(name.as_str()) {
                tracing::debug!(identifier = name.as_str(), "identifier discovered");
                found.push(name.as_str().to_string());
            }
        }
        found
    }

    /// Remainder of the best stored identifier extending `word`.
    pub fn suggest(&self, word: &str) -> Option<String> {
        if word.len() < MIN_PREFIX_LEN {
            return None;
        }
        self.index
            .complete(word)
            .map(|full| full[word.len()..].to_string())
    }
}

/// Byte range `[start, end)` of the alphanumeric word touching the cursor.
///
/// The scan starts at the character left of the cursor (`col - 1`) and grows
/// in both directions while characters stay alphanumeric.
pub fn word_at(line: &str, col: usize) -> Option<(usize, usize)> {
    let bytes = line.as_bytes();
    let anchor = col.checked_sub(2)?;
    if !bytes.get(anchor)?.is_ascii_alphanumeric() {
        return None;
    }

    let mut start = anchor;
    while start > 0 && bytes[start - 1].is_ascii_alphanumeric() {
        start -= 1;
    }
    let mut end = anchor + 1;
    while end < bytes.len() && bytes[end].is_ascii_alphanumeric() {
        end += 1;
    }
    Some((start, end))
}
