//! Editor session: applies logical events to the buffer and editing aids.
//!
//! All per-session state lives here and is passed around explicitly. Each
//! call to [`EditorSession::apply`] fully processes one event and reports
//! what needs repainting, or that the session should end.

use crate::core::autocomplete::{word_at, IdentifierSet, STATEMENT_TERMINATOR};
use crate::core::buffer::LineBuffer;
use crate::core::cursor::Direction;
use crate::core::indent::Indenter;
use crate::core::input::InputEvent;
use crate::render::highlight::KeywordTable;
use crate::render::renderer::{Repaint, View};

/// Result of applying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue(Repaint),
    Exit,
}

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    buffer: LineBuffer,
    indenter: Indenter,
    identifiers: IdentifierSet,
    keywords: KeywordTable,
    suggestion: Option<String>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing buffer contents.
    pub fn with_buffer(buffer: LineBuffer) -> Self {
        let mut session = Self {
            buffer,
            ..Self::default()
        };
        session.indenter.recompute(&session.buffer);
        session.refresh_suggestion();
        session
    }

    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn indent_level(&self) -> usize {
        self.indenter.level()
    }

    pub fn identifiers(&self) -> &IdentifierSet {
        &self.identifiers
    }

    pub fn identifiers_mut(&mut self) -> &mut IdentifierSet {
        &mut self.identifiers
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Inline completion currently offered at the cursor.
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn view(&self) -> View<'_> {
        View {
            buffer: &self.buffer,
            suggestion: self.suggestion(),
            keywords: &self.keywords,
        }
    }

    /// Apply one event.
    pub fn apply(&mut self, event: InputEvent) -> Outcome {
        let pending = self.suggestion.take();
        let before = self.buffer.cursor();

        let repaint = match event {
            InputEvent::Interrupt => return Outcome::Exit,
            InputEvent::Char(byte) => {
                self.type_byte(byte);
                Repaint::line(before.row)
            }
            InputEvent::Enter => {
                let kind = self.indenter.enter(&mut self.buffer);
                tracing::debug!(?kind, level = self.indenter.level(), "enter");
                Repaint::ToEnd { first: before.row }
            }
            InputEvent::Backspace => {
                if self.buffer.delete_before() {
                    Repaint::line(before.row)
                } else if self.buffer.join_with_previous() {
                    Repaint::ToEnd {
                        first: before.row - 1,
                    }
                } else {
                    Repaint::line(before.row)
                }
            }
            InputEvent::Tab => {
                match pending {
                    Some(completion) => self.buffer.insert_str(&completion),
                    None => {
                        self.indenter.insert_tab(&mut self.buffer);
                    }
                }
                Repaint::line(before.row)
            }
            InputEvent::MoveUp => self.move_cursor(Direction::Up),
            InputEvent::MoveDown => self.move_cursor(Direction::Down),
            InputEvent::MoveLeft => self.move_cursor(Direction::Left),
            InputEvent::MoveRight => self.move_cursor(Direction::Right),
        };

        self.indenter.recompute(&self.buffer);
        self.refresh_suggestion();
        Outcome::Continue(repaint)
    }

    fn type_byte(&mut self, byte: u8) {
        // One byte is one column; anything outside ASCII is not editable text.
        if !byte.is_ascii() {
            tracing::trace!(byte, "ignored non-ascii byte");
            return;
        }
        let ch = char::from(byte);
        self.indenter.type_char(&mut self.buffer, ch);
        if ch == STATEMENT_TERMINATOR {
            let line = self.buffer.current_line().to_string();
            self.identifiers.discover(&line);
        }
    }

    fn move_cursor(&mut self, direction: Direction) -> Repaint {
        let from = self.buffer.cursor().row;
        self.buffer.move_cursor(direction);
        Repaint::spanning(from, self.buffer.cursor().row)
    }

    /// Recompute the inline completion for the word touching the cursor.
    fn refresh_suggestion(&mut self) {
        let cursor = self.buffer.cursor();
        let line = self.buffer.current_line();
        self.suggestion = word_at(line, cursor.col)
            .and_then(|(start, end)| self.identifiers.suggest(&line[start..end]));
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorSession, Outcome};
    use crate::core::buffer::LineBuffer;
    use crate::core::cursor::Cursor;
    use crate::core::input::InputEvent;
    use crate::render::renderer::Repaint;

    fn type_text(session: &mut EditorSession, text: &str) {
        for byte in text.bytes() {
            session.apply(InputEvent::Char(byte));
        }
    }

    #[test]
    fn interrupt_requests_exit_without_editing() {
        let mut session = EditorSession::new();
        type_text(&mut session, "ab");
        assert_eq!(session.apply(InputEvent::Interrupt), Outcome::Exit);
        assert_eq!(session.buffer().lines(), &["ab"]);
    }

    #[test]
    fn backspace_at_home_is_noop() {
        let mut session = EditorSession::new();
        assert_eq!(
            session.apply(InputEvent::Backspace),
            Outcome::Continue(Repaint::line(1))
        );
        assert_eq!(session.buffer().lines(), &[""]);
        assert_eq!(session.buffer().cursor(), Cursor::new(1, 1));
    }

    #[test]
    fn backspace_at_line_start_joins_and_repaints_to_end() {
        let mut session = EditorSession::with_buffer(LineBuffer::from_lines(["ab", "cd"]));
        session.apply(InputEvent::MoveDown);
        assert_eq!(session.buffer().cursor(), Cursor::new(2, 1));
        assert_eq!(
            session.apply(InputEvent::Backspace),
            Outcome::Continue(Repaint::ToEnd { first: 1 })
        );
        assert_eq!(session.buffer().lines(), &["abcd"]);
        assert_eq!(session.buffer().cursor(), Cursor::new(1, 3));
    }

    #[test]
    fn statement_terminator_feeds_identifiers() {
        let mut session = EditorSession::new();
        type_text(&mut session, "int total = 4;");
        assert!(session.identifiers().contains("total"));
    }

    #[test]
    fn typed_prefix_surfaces_and_tab_accepts_suggestion() {
        let mut session = EditorSession::new();
        session.identifiers_mut().insert("variableName");
        type_text(&mut session, "var");
        assert_eq!(session.suggestion(), None);
        type_text(&mut session, "i");
        assert_eq!(session.suggestion(), Some("ableName"));

        session.apply(InputEvent::Tab);
        assert_eq!(session.buffer().lines(), &["variableName"]);
        assert_eq!(session.buffer().cursor(), Cursor::new(1, 13));
        assert_eq!(session.suggestion(), None);
    }

    #[test]
    fn suggestion_is_dropped_by_unrelated_keystroke() {
        let mut session = EditorSession::new();
        session.identifiers_mut().insert("variableName");
        type_text(&mut session, "vari ");
        assert_eq!(session.suggestion(), None);
        session.apply(InputEvent::Tab);
        assert_eq!(session.buffer().lines(), &["vari     "]);
    }

    #[test]
    fn indent_level_follows_cursor_line() {
        let mut session =
            EditorSession::with_buffer(LineBuffer::from_lines(["x", "        y"]));
        assert_eq!(session.indent_level(), 0);
        session.apply(InputEvent::MoveDown);
        assert_eq!(session.indent_level(), 2);
        session.apply(InputEvent::MoveUp);
        assert_eq!(session.indent_level(), 0);
    }

    #[test]
    fn non_ascii_bytes_are_ignored() {
        let mut session = EditorSession::new();
        session.apply(InputEvent::Char(0xc3));
        assert_eq!(session.buffer().lines(), &[""]);
    }
}
