//! Line buffer with an attached cursor.
//!
//! Rows and columns are 1-indexed at the API surface. Every mutating method
//! finishes by re-clamping the cursor, so callers can never observe an
//! out-of-range position or an empty buffer.

use crate::core::cursor::{Cursor, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    cursor: Cursor,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// One empty line with the cursor at (1, 1).
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Cursor::default(),
        }
    }

    /// Build a buffer from existing lines; an empty list yields one empty line.
    /// The cursor starts at (1, 1).
    ///
    /// Columns are byte offsets, so characters outside ASCII are dropped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines
            .into_iter()
            .map(|line| {
                let mut line: String = line.into();
                line.retain(|ch| ch.is_ascii());
                line
            })
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            cursor: Cursor::default(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of `row` (1-indexed), or `None` past the end.
    pub fn line(&self, row: usize) -> Option<&str> {
        row.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.row - 1]
    }

    pub fn line_len(&self, row: usize) -> usize {
        self.line(row).map_or(0, str::len)
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor, clamping it into the buffer.
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = Cursor::new(row, col);
        self.clamp_cursor();
    }

    /// Newline-joined contents.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Byte under the cursor, if the cursor is not at the append position.
    pub fn char_at_cursor(&self) -> Option<char> {
        self.current_line()
            .as_bytes()
            .get(self.cursor.offset())
            .map(|&byte| byte as char)
    }

    /// Number of leading space characters on `row`.
    pub fn leading_spaces(&self, row: usize) -> usize {
        self.line(row)
            .map_or(0, |line| line.bytes().take_while(|&b| b == b' ').count())
    }

    /// Insert `ch` at the cursor and advance past it. Non-ASCII is ignored.
    pub fn insert_char(&mut self, ch: char) {
        if !ch.is_ascii() {
            return;
        }
        let offset = self.cursor.offset();
        self.lines[self.cursor.row - 1].insert(offset, ch);
        self.cursor.col += 1;
        self.clamp_cursor();
    }

    /// Insert `text` at the cursor and advance past it. Non-ASCII is ignored.
    pub fn insert_str(&mut self, text: &str) {
        if !text.is_ascii() {
            let ascii: String = text.chars().filter(char::is_ascii).collect();
            return self.insert_str(&ascii);
        }
        let offset = self.cursor.offset();
        self.lines[self.cursor.row - 1].insert_str(offset, text);
        self.cursor.col += text.len();
        self.clamp_cursor();
    }

    /// Split the current line at the cursor. The tail moves to a new line
    /// below, prefixed by `indent` spaces, and the cursor lands just after
    /// that indentation.
    pub fn split_line(&mut self, indent: usize) {
        let row = self.cursor.row;
        let offset = self.cursor.offset();
        let tail = self.lines[row - 1].split_off(offset);
        self.lines.insert(row, format!("{}{}", " ".repeat(indent), tail));
        self.cursor = Cursor::new(row + 1, indent + 1);
        self.clamp_cursor();
    }

    /// Insert a whole line so that it becomes `row`; later lines shift down.
    pub fn insert_line(&mut self, row: usize, text: impl Into<String>) {
        let idx = row.saturating_sub(1).min(self.lines.len());
        self.lines.insert(idx, text.into());
        self.clamp_cursor();
    }

    /// Replace the contents of `row`. Out-of-range rows are ignored.
    pub fn replace_line(&mut self, row: usize, text: impl Into<String>) {
        if let Some(line) = row.checked_sub(1).and_then(|idx| self.lines.get_mut(idx)) {
            *line = text.into();
        }
        self.clamp_cursor();
    }

    /// Append the current line to the previous one and remove it. The cursor
    /// lands on the join point. No-op on the first row.
    pub fn join_with_previous(&mut self) -> bool {
        let row = self.cursor.row;
        if row <= 1 {
            return false;
        }
        let current = self.lines.remove(row - 1);
        let previous = &mut self.lines[row - 2];
        let join_col = previous.len() + 1;
        previous.push_str(&current);
        self.cursor = Cursor::new(row - 1, join_col);
        self.clamp_cursor();
        true
    }

    /// Remove the character left of the cursor. No-op at column 1.
    pub fn delete_before(&mut self) -> bool {
        if self.cursor.col <= 1 {
            return false;
        }
        let offset = self.cursor.offset();
        self.lines[self.cursor.row - 1].remove(offset - 1);
        self.cursor.col -= 1;
        self.clamp_cursor();
        true
    }

    /// Move the cursor one step. Left and Right wrap across line ends; every
    /// direction is a no-op at the buffer edge. Returns whether it moved.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let before = self.cursor;
        let Cursor { row, col } = self.cursor;
        match direction {
            Direction::Up => {
                if row > 1 {
                    self.cursor.row -= 1;
                }
            }
            Direction::Down => {
                if row < self.lines.len() {
                    self.cursor.row += 1;
                }
            }
            Direction::Left => {
                if col > 1 {
                    self.cursor.col -= 1;
                } else if row > 1 {
                    self.cursor = Cursor::new(row - 1, self.line_len(row - 1) + 1);
                }
            }
            Direction::Right => {
                if col <= self.line_len(row) {
                    self.cursor.col += 1;
                } else if row < self.lines.len() {
                    self.cursor = Cursor::new(row + 1, 1);
                }
            }
        }
        self.clamp_cursor();
        self.cursor != before
    }

    fn clamp_cursor(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        let row = self.cursor.row.clamp(1, self.lines.len());
        let max_col = self.lines[row - 1].len() + 1;
        self.cursor = Cursor::new(row, self.cursor.col.clamp(1, max_col));
    }
}
