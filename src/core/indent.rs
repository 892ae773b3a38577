//! Auto-indent and bracket pairing.
//!
//! The indent level is derived from the leading spaces of whichever line the
//! cursor sits on, using `(spaces + 1) / 4`. This is not brace-depth
//! tracking: a line indented by 3 spaces already counts as level 1, and a
//! stray `}` elsewhere has no effect.

use crate::core::buffer::LineBuffer;

/// Columns per indent level.
pub const INDENT_WIDTH: usize = 4;

/// Indent level implied by a run of `spaces` leading spaces.
pub fn level_for_spaces(spaces: usize) -> usize {
    (spaces + 1) / INDENT_WIDTH
}

/// The closing bracket auto-inserted after `open`.
pub fn closer_for(open: char) -> Option<char> {
    match open {
        '{' => Some('}'),
        '(' => Some(')'),
        _ => None,
    }
}

pub fn is_closer(ch: char) -> bool {
    matches!(ch, '}' | ')')
}

/// How an Enter keypress reshaped the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterKind {
    /// Cursor was at end of line; a fresh indented line was opened.
    NewLine,
    /// Text after the cursor moved to its own line; cursor at column 1.
    Split,
    /// `{|}` was split into an indented blank line between the braces.
    OpenBlock,
}

/// What typing a character did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedChar {
    Inserted,
    Paired,
    TypedThrough,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indenter {
    level: usize,
}

impl Indenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Spaces making up one line at the current level.
    pub fn columns(&self) -> usize {
        self.level * INDENT_WIDTH
    }

    /// Re-derive the level from the line under the cursor.
    pub fn recompute(&mut self, buffer: &LineBuffer) {
        self.level = level_for_spaces(buffer.leading_spaces(buffer.cursor().row));
    }

    /// Apply Enter at the cursor.
    pub fn enter(&mut self, buffer: &mut LineBuffer) -> EnterKind {
        let cursor = buffer.cursor();
        let line = buffer.current_line();

        if cursor.col == line.len() + 1 {
            buffer.split_line(self.columns());
            return EnterKind::NewLine;
        }

        let (before, after) = line.split_at(cursor.offset());
        let shifted_after = format!("{}{}", " ".repeat(self.columns()), after);
        let opens_block = before.ends_with('{')
            && shifted_after.as_bytes().get(self.columns()) == Some(&b'}');

        if opens_block {
            let before = before.to_string();
            self.level += 1;
            let blank = " ".repeat(self.columns());
            let row = cursor.row;
            buffer.replace_line(row, before);
            buffer.insert_line(row + 1, blank.clone());
            buffer.insert_line(row + 2, shifted_after);
            buffer.set_cursor(row + 1, blank.len() + 1);
            return EnterKind::OpenBlock;
        }

        buffer.split_line(self.columns());
        let row = buffer.cursor().row;
        buffer.set_cursor(row, 1);
        EnterKind::Split
    }

    /// Type `ch`, pairing openers and stepping over an existing closer.
    pub fn type_char(&self, buffer: &mut LineBuffer, ch: char) -> TypedChar {
        if is_closer(ch) && buffer.char_at_cursor() == Some(ch) {
            let cursor = buffer.cursor();
            buffer.set_cursor(cursor.row, cursor.col + 1);
            return TypedChar::TypedThrough;
        }

        buffer.insert_char(ch);
        match closer_for(ch) {
            Some(closer) => {
                buffer.insert_char(closer);
                let cursor = buffer.cursor();
                buffer.set_cursor(cursor.row, cursor.col - 1);
                TypedChar::Paired
            }
            None => TypedChar::Inserted,
        }
    }

    /// Insert spaces at the cursor until the current line's leading run
    /// reaches the next multiple of [`INDENT_WIDTH`]. Returns the count.
    pub fn insert_tab(&self, buffer: &mut LineBuffer) -> usize {
        let leading = buffer.leading_spaces(buffer.cursor().row);
        let count = INDENT_WIDTH - leading % INDENT_WIDTH;
        buffer.insert_str(&" ".repeat(count));
        count
    }
}
