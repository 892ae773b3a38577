//! Cursor position and movement directions.

/// A 1-indexed insertion point in the buffer.
///
/// `col == line length + 1` is the append position past the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 0-based byte offset of the cursor within its line.
    pub fn offset(&self) -> usize {
        self.col.saturating_sub(1)
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn default_cursor_is_home() {
        assert_eq!(Cursor::default(), Cursor::new(1, 1));
        assert_eq!(Cursor::default().offset(), 0);
    }
}
