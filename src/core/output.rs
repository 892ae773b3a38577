//! Typed terminal output commands and a single output gate.
//!
//! Invariant: all terminal writes flow through `OutputGate::flush(..)`.

use std::fmt::Write as _;
use std::io;

use crate::core::terminal::Terminal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCmd {
    /// Raw bytes/control sequences to be written to the terminal.
    Bytes(String),
    /// `ESC[2J`
    ClearScreen,
    /// `ESC[2K`
    ClearLine,
    /// `ESC[<row>;<col>H`, 1-indexed.
    MoveTo { row: usize, col: usize },
}

impl TerminalCmd {
    pub fn bytes(data: impl Into<String>) -> Self {
        Self::Bytes(data.into())
    }

    /// Append the exact byte sequence for this command to `out`.
    pub fn encode_into(&self, out: &mut String) {
        match self {
            TerminalCmd::Bytes(data) => out.push_str(data),
            TerminalCmd::ClearScreen => out.push_str("\x1b[2J"),
            TerminalCmd::ClearLine => out.push_str("\x1b[2K"),
            TerminalCmd::MoveTo { row, col } => {
                let _ = write!(out, "\x1b[{row};{col}H");
            }
        }
    }
}

/// Concatenate the byte sequences of `cmds`.
pub fn encode(cmds: &[TerminalCmd]) -> String {
    let mut out = String::new();
    for cmd in cmds {
        cmd.encode_into(&mut out);
    }
    out
}

#[derive(Debug, Default)]
pub struct OutputGate {
    cmds: Vec<TerminalCmd>,
}

impl OutputGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: TerminalCmd) {
        self.cmds.push(cmd);
    }

    pub fn extend<I>(&mut self, cmds: I)
    where
        I: IntoIterator<Item = TerminalCmd>,
    {
        self.cmds.extend(cmds);
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Flush buffered commands to the terminal in a single write.
    ///
    /// This is the single write gate: `Terminal::write(..)` must not be called
    /// from anywhere else.
    pub fn flush<T: Terminal + ?Sized>(&mut self, term: &mut T) -> io::Result<()> {
        if self.cmds.is_empty() {
            return Ok(());
        }
        let data = encode(&self.cmds);
        self.cmds.clear();
        term.write(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::{encode, OutputGate, TerminalCmd};
    use crate::platform::memory_terminal::MemoryTerminal;

    #[test]
    fn commands_encode_to_exact_sequences() {
        let cmds = vec![
            TerminalCmd::ClearScreen,
            TerminalCmd::MoveTo { row: 1, col: 1 },
            TerminalCmd::MoveTo { row: 12, col: 1 },
            TerminalCmd::ClearLine,
            TerminalCmd::bytes("hi"),
        ];
        assert_eq!(encode(&cmds), "\x1b[2J\x1b[1;1H\x1b[12;1H\x1b[2Khi");
    }

    #[test]
    fn flush_writes_once_and_empties() {
        let mut terminal = MemoryTerminal::new();
        let mut gate = OutputGate::new();
        gate.push(TerminalCmd::bytes("a"));
        gate.push(TerminalCmd::bytes("b"));
        gate.flush(&mut terminal).expect("flush");
        assert!(gate.is_empty());
        assert_eq!(terminal.output(), "ab");
        assert_eq!(terminal.write_count(), 1);

        gate.flush(&mut terminal).expect("flush");
        assert_eq!(terminal.write_count(), 1);
    }
}
