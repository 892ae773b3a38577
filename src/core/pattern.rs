//! Linear-time substring search (prefix-function / KMP).
//!
//! Both searches build the failure table once per call and scan the text a
//! single time, so a search costs O(n + m). Matches always tie-break on the
//! leftmost occurrence.

/// Build the prefix-function table for `pattern`.
///
/// `table[i]` is the length of the longest proper prefix of `pattern[..=i]`
/// that is also a suffix of it.
pub fn prefix_table(pattern: &[u8]) -> Vec<usize> {
    let mut table = vec![0usize; pattern.len()];
    let mut k = 0usize;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = table[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        table[i] = k;
    }
    table
}

/// Returns the index of the first occurrence of `pattern` in `text`.
///
/// An empty pattern matches at index 0.
pub fn find(text: &str, pattern: &str) -> Option<usize> {
    find_where(text.as_bytes(), pattern.as_bytes(), |_, _| true)
}

/// Returns the index of the first occurrence of `pattern` in `text` that is
/// not touching an ASCII alphanumeric byte on either side.
///
/// Start and end of text count as boundaries, so `"int"` matches in
/// `"int x"` but not in `"print(x)"`.
pub fn find_word(text: &str, pattern: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    find_where(bytes, pattern.as_bytes(), |start, end| {
        is_word_boundary(bytes, start, end)
    })
}

/// True when `text[start..end]` is not adjacent to an alphanumeric byte.
pub fn is_word_boundary(text: &[u8], start: usize, end: usize) -> bool {
    let left_ok = start == 0 || !text[start - 1].is_ascii_alphanumeric();
    let right_ok = end >= text.len() || !text[end].is_ascii_alphanumeric();
    left_ok && right_ok
}

/// Single KMP pass over `text`, returning the first match accepted by `accept`.
///
/// Rejected matches do not restart the scan; the automaton falls back through
/// the table exactly as it would after a full match.
fn find_where<F>(text: &[u8], pattern: &[u8], accept: F) -> Option<usize>
where
    F: Fn(usize, usize) -> bool,
{
    if pattern.is_empty() {
        return accept(0, 0).then_some(0);
    }
    if pattern.len() > text.len() {
        return None;
    }

    let table = prefix_table(pattern);
    let mut matched = 0usize;
    for (i, &byte) in text.iter().enumerate() {
        while matched > 0 && byte != pattern[matched] {
            matched = table[matched - 1];
        }
        if byte == pattern[matched] {
            matched += 1;
        }
        if matched == pattern.len() {
            let start = i + 1 - pattern.len();
            if accept(start, i + 1) {
                return Some(start);
            }
            matched = table[matched - 1];
        }
    }
    None
}
