use std::collections::VecDeque;

use bento::{find_word, read_event, Cursor, EditorSession, InputEvent, LineBuffer, Outcome};
use pretty_assertions::assert_eq;

fn feed(session: &mut EditorSession, bytes: &[u8]) {
    let mut pending: VecDeque<u8> = bytes.iter().copied().collect();
    while !pending.is_empty() {
        if let Some(event) = read_event(&mut pending).expect("decode") {
            session.apply(event);
        }
    }
}

fn assert_cursor_in_bounds(session: &EditorSession) {
    let buffer = session.buffer();
    let cursor = buffer.cursor();
    assert!(buffer.line_count() >= 1);
    assert!(cursor.row >= 1 && cursor.row <= buffer.line_count());
    assert!(cursor.col >= 1 && cursor.col <= buffer.line_len(cursor.row) + 1);
}

#[test]
fn whole_word_search_respects_identifier_boundaries() {
    assert_eq!(find_word("print(x)", "int"), None);
    assert_eq!(find_word("int x", "int"), Some(0));
}

#[test]
fn brace_pairs_and_types_through() {
    let mut session = EditorSession::new();
    session.apply(InputEvent::Char(b'{'));
    assert_eq!(session.buffer().lines(), &["{}"]);
    assert_eq!(session.buffer().cursor(), Cursor::new(1, 2));

    session.apply(InputEvent::Char(b'}'));
    assert_eq!(session.buffer().lines(), &["{}"]);
    assert_eq!(session.buffer().cursor(), Cursor::new(1, 3));
}

#[test]
fn enter_between_braces_opens_indented_block() {
    let mut session = EditorSession::new();
    feed(&mut session, b"if (x) {");
    assert_eq!(session.buffer().lines(), &["if (x) {}"]);
    assert_eq!(session.buffer().cursor(), Cursor::new(1, 9));
    assert_eq!(session.indent_level(), 0);

    session.apply(InputEvent::Enter);
    assert_eq!(session.buffer().lines(), &["if (x) {", "    ", "}"]);
    assert_eq!(session.buffer().cursor(), Cursor::new(2, 5));
    assert_eq!(session.indent_level(), 1);
}

#[test]
fn enter_at_end_of_indented_line_keeps_indent() {
    let mut session = EditorSession::with_buffer(LineBuffer::from_lines(["    x = 1;"]));
    for _ in 0.."    x = 1;".len() {
        session.apply(InputEvent::MoveRight);
    }
    session.apply(InputEvent::Enter);
    assert_eq!(session.buffer().lines(), &["    x = 1;", "    "]);
    assert_eq!(session.buffer().cursor(), Cursor::new(2, 5));
}

#[test]
fn split_then_join_restores_line() {
    let mut session = EditorSession::with_buffer(LineBuffer::from_lines(["hello world"]));
    for _ in 0..5 {
        session.apply(InputEvent::MoveRight);
    }
    session.apply(InputEvent::Enter);
    assert_eq!(session.buffer().lines(), &["hello", " world"]);
    assert_eq!(session.buffer().cursor(), Cursor::new(2, 1));

    session.apply(InputEvent::Backspace);
    assert_eq!(session.buffer().lines(), &["hello world"]);
    assert_eq!(session.buffer().cursor(), Cursor::new(1, 6));
}

#[test]
fn split_then_join_adds_only_inherited_indent() {
    let original = "    ab";
    let mut session = EditorSession::with_buffer(LineBuffer::from_lines([original]));
    for _ in 0.."    a".len() {
        session.apply(InputEvent::MoveRight);
    }
    assert_eq!(session.indent_level(), 1);

    session.apply(InputEvent::Enter);
    assert_eq!(session.buffer().lines(), &["    a", "    b"]);
    assert_eq!(session.buffer().cursor(), Cursor::new(2, 1));

    session.apply(InputEvent::Backspace);
    let inserted = " ".repeat(4);
    let expected = format!("{}{}{}", &original[..5], inserted, &original[5..]);
    assert_eq!(session.buffer().lines(), &[expected]);
    assert_eq!(session.buffer().cursor(), Cursor::new(1, 6));
}

#[test]
fn known_identifier_is_suggested_and_accepted() {
    let mut session = EditorSession::new();
    feed(&mut session, b"int variableName = 0;\n");
    assert!(session.identifiers().contains("variableName"));

    feed(&mut session, b"vari");
    assert_eq!(session.suggestion(), Some("ableName"));
    assert_eq!(session.buffer().current_line(), "vari");

    session.apply(InputEvent::Tab);
    assert_eq!(session.buffer().current_line(), "variableName");
    assert_eq!(session.suggestion(), None);
}

#[test]
fn short_identifiers_are_not_learned() {
    let mut session = EditorSession::new();
    feed(&mut session, b"int abc = 1;");
    assert!(!session.identifiers().contains("abc"));
}

#[test]
fn cursor_stays_in_bounds_through_mixed_editing() {
    let script: &[u8] = b"ab\x1b[D\x1b[D\x1b[D\x7f\x7f\n\ncd\x1b[A\x1b[A\x1b[A\x1b[B\x1b[C\x1b[C\x1b[C\x1b[C\x7f\x7f\x7f\x7f\x7f\x7f\x7f\t{(";
    let mut session = EditorSession::new();
    let mut pending: VecDeque<u8> = script.iter().copied().collect();
    while !pending.is_empty() {
        if let Some(event) = read_event(&mut pending).expect("decode") {
            assert_ne!(session.apply(event), Outcome::Exit);
            assert_cursor_in_bounds(&session);
        }
    }
}

#[test]
fn interrupt_exits_without_touching_buffer() {
    let mut session = EditorSession::with_buffer(LineBuffer::from_lines(["keep"]));
    assert_eq!(session.apply(InputEvent::Interrupt), Outcome::Exit);
    assert_eq!(session.buffer().lines(), &["keep"]);
}
