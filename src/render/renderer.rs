//! Incremental line painter.
//!
//! Buffer row N is painted on screen row N. Each repainted row is addressed
//! and cleared before its highlighted text is written, and every paint ends by
//! placing the hardware cursor at the logical cursor.

use crate::core::buffer::LineBuffer;
use crate::core::output::TerminalCmd;
use crate::render::highlight::{highlight_line, Ghost, KeywordTable};

/// Which rows an edit invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repaint {
    /// Rows `first..=last`; used for same-line edits and cursor moves.
    Rows { first: usize, last: usize },
    /// Row `first` through the end of the buffer, plus any rows left over
    /// from a previously longer buffer.
    ToEnd { first: usize },
}

impl Repaint {
    pub fn line(row: usize) -> Self {
        Self::Rows {
            first: row,
            last: row,
        }
    }

    /// Smallest row range covering both rows.
    pub fn spanning(a: usize, b: usize) -> Self {
        Self::Rows {
            first: a.min(b),
            last: a.max(b),
        }
    }
}

/// Everything needed to paint a frame.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub buffer: &'a LineBuffer,
    pub suggestion: Option<&'a str>,
    pub keywords: &'a KeywordTable,
}

impl View<'_> {
    fn paint_row(&self, row: usize, cmds: &mut Vec<TerminalCmd>) {
        cmds.push(TerminalCmd::MoveTo { row, col: 1 });
        cmds.push(TerminalCmd::ClearLine);
        let Some(line) = self.buffer.line(row) else {
            return;
        };
        let cursor = self.buffer.cursor();
        let ghost = self
            .suggestion
            .filter(|_| cursor.row == row)
            .map(|text| Ghost {
                offset: cursor.offset(),
                text,
            });
        cmds.push(TerminalCmd::Bytes(highlight_line(line, ghost, self.keywords)));
    }

    fn place_cursor(&self, cmds: &mut Vec<TerminalCmd>) {
        let cursor = self.buffer.cursor();
        cmds.push(TerminalCmd::MoveTo {
            row: cursor.row,
            col: cursor.col,
        });
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    painted_rows: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of screen rows that currently hold buffer text.
    pub fn painted_rows(&self) -> usize {
        self.painted_rows
    }

    /// Clear the screen and paint every line.
    pub fn full(&mut self, view: View<'_>) -> Vec<TerminalCmd> {
        let mut cmds = vec![
            TerminalCmd::ClearScreen,
            TerminalCmd::MoveTo { row: 1, col: 1 },
        ];
        let count = view.buffer.line_count();
        for row in 1..=count {
            view.paint_row(row, &mut cmds);
        }
        view.place_cursor(&mut cmds);
        self.painted_rows = count;
        cmds
    }

    /// Repaint the rows named by `repaint`.
    pub fn paint(&mut self, view: View<'_>, repaint: Repaint) -> Vec<TerminalCmd> {
        let count = view.buffer.line_count();
        let (first, last) = match repaint {
            Repaint::Rows { first, last } => (first.max(1), last.min(count)),
            Repaint::ToEnd { first } => (first.max(1), count.max(self.painted_rows)),
        };

        let mut cmds = Vec::new();
        for row in first..=last {
            view.paint_row(row, &mut cmds);
        }
        view.place_cursor(&mut cmds);
        tracing::trace!(first, last, "repaint");
        self.painted_rows = count;
        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::{Renderer, Repaint, View};
    use crate::core::buffer::LineBuffer;
    use crate::core::output::encode;
    use crate::render::highlight::KeywordTable;

    fn view<'a>(buffer: &'a LineBuffer, keywords: &'a KeywordTable) -> View<'a> {
        View {
            buffer,
            suggestion: None,
            keywords,
        }
    }

    #[test]
    fn full_paint_clears_then_draws_each_row() {
        let keywords = KeywordTable::new(std::iter::empty());
        let buffer = LineBuffer::from_lines(["ab", "c"]);
        let mut renderer = Renderer::new();
        let out = encode(&renderer.full(view(&buffer, &keywords)));
        assert_eq!(
            out,
            "\x1b[2J\x1b[1;1H\x1b[1;1H\x1b[2Kab\x1b[2;1H\x1b[2Kc\x1b[1;1H"
        );
        assert_eq!(renderer.painted_rows(), 2);
    }

    #[test]
    fn same_line_edit_repaints_only_that_row() {
        let keywords = KeywordTable::new(std::iter::empty());
        let mut buffer = LineBuffer::from_lines(["one", "two", "three"]);
        buffer.set_cursor(2, 4);
        let mut renderer = Renderer::new();
        renderer.full(view(&buffer, &keywords));

        let out = encode(&renderer.paint(view(&buffer, &keywords), Repaint::line(2)));
        assert_eq!(out, "\x1b[2;1H\x1b[2Ktwo\x1b[2;4H");
    }

    #[test]
    fn shrinking_buffer_clears_vacated_rows() {
        let keywords = KeywordTable::new(std::iter::empty());
        let mut buffer = LineBuffer::from_lines(["ab", "cd"]);
        let mut renderer = Renderer::new();
        renderer.full(view(&buffer, &keywords));

        buffer.set_cursor(2, 1);
        buffer.join_with_previous();
        let out = encode(&renderer.paint(view(&buffer, &keywords), Repaint::ToEnd { first: 1 }));
        assert_eq!(out, "\x1b[1;1H\x1b[2Kabcd\x1b[2;1H\x1b[2K\x1b[1;3H");
        assert_eq!(renderer.painted_rows(), 1);
    }

    #[test]
    fn ghost_is_drawn_only_on_cursor_row() {
        let keywords = KeywordTable::new(std::iter::empty());
        let mut buffer = LineBuffer::from_lines(["vari", "vari"]);
        buffer.set_cursor(1, 5);
        let mut renderer = Renderer::new();
        let view = View {
            buffer: &buffer,
            suggestion: Some("ableName"),
            keywords: &keywords,
        };
        let out = encode(&renderer.paint(view, Repaint::spanning(1, 2)));
        assert_eq!(
            out,
            "\x1b[1;1H\x1b[2Kvari\x1b[90mableName\x1b[0m\x1b[2;1H\x1b[2Kvari\x1b[1;5H"
        );
    }
}
