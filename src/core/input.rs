//! Raw byte → logical editing event decoding.

use std::collections::VecDeque;
use std::io;

const ESC: u8 = 0x1b;
const CSI_INTRODUCER: u8 = b'[';
const TAB: u8 = b'\t';
const BACKSPACE: u8 = 0x7f;
const CTRL_H: u8 = 0x08;
const CTRL_C: u8 = 0x03;

/// A decoded, device-independent editing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(u8),
    Enter,
    Backspace,
    Tab,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Interrupt,
}

/// Blocking source of single input bytes.
///
/// `Ok(None)` means the input is exhausted.
pub trait ByteSource {
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

impl ByteSource for VecDeque<u8> {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

/// Decode one event starting at `first`, pulling continuation bytes from
/// `source` when `first` is ESC.
///
/// Returns `Ok(None)` for an escape sequence that is not one of the four
/// arrow keys; both continuation bytes are consumed and dropped.
pub fn decode_event<S>(first: u8, source: &mut S) -> io::Result<Option<InputEvent>>
where
    S: ByteSource + ?Sized,
{
    let event = match first {
        ESC => return decode_escape(source),
        b'\n' | b'\r' => InputEvent::Enter,
        TAB => InputEvent::Tab,
        BACKSPACE | CTRL_H => InputEvent::Backspace,
        CTRL_C => InputEvent::Interrupt,
        other => InputEvent::Char(other),
    };
    Ok(Some(event))
}

/// Read and decode the next event from `source`.
///
/// End of input decodes to [`InputEvent::Interrupt`] so callers shut down the
/// same way they would for Ctrl-C.
pub fn read_event<S>(source: &mut S) -> io::Result<Option<InputEvent>>
where
    S: ByteSource + ?Sized,
{
    match source.next_byte()? {
        Some(first) => decode_event(first, source),
        None => Ok(Some(InputEvent::Interrupt)),
    }
}

fn decode_escape<S>(source: &mut S) -> io::Result<Option<InputEvent>>
where
    S: ByteSource + ?Sized,
{
    let Some(introducer) = source.next_byte()? else {
        return Ok(None);
    };
    let Some(final_byte) = source.next_byte()? else {
        return Ok(None);
    };
    if introducer != CSI_INTRODUCER {
        return Ok(None);
    }

    let event = match final_byte {
        b'A' => InputEvent::MoveUp,
        b'B' => InputEvent::MoveDown,
        b'C' => InputEvent::MoveRight,
        b'D' => InputEvent::MoveLeft,
        _ => return Ok(None),
    };
    Ok(Some(event))
}
