//! Scripted in-memory terminal for tests and headless runs.

use std::collections::VecDeque;
use std::io;

use crate::core::input::ByteSource;
use crate::core::terminal::Terminal;
use crate::platform::signals::ExitFlag;

/// One scripted input step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Byte(u8),
    /// Behave like a signal arriving during a blocking read: request exit on
    /// the attached flag, then fail the read with `Interrupted`.
    Signal,
    /// Fail the read with the given error kind.
    Fail(io::ErrorKind),
}

#[derive(Debug, Default)]
pub struct MemoryTerminal {
    script: VecDeque<ScriptStep>,
    exit_flag: Option<ExitFlag>,
    output: String,
    writes: usize,
    starts: usize,
    stops: usize,
    raw: bool,
    fail_start: bool,
}

impl MemoryTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl AsRef<[u8]>) -> Self {
        let mut terminal = Self::new();
        terminal.push_bytes(bytes);
        terminal
    }

    pub fn with_exit_flag(mut self, flag: ExitFlag) -> Self {
        self.exit_flag = Some(flag);
        self
    }

    pub fn fail_on_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn push_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        self.script
            .extend(bytes.as_ref().iter().copied().map(ScriptStep::Byte));
    }

    pub fn push_signal(&mut self) {
        self.script.push_back(ScriptStep::Signal);
    }

    pub fn push_failure(&mut self, kind: io::ErrorKind) {
        self.script.push_back(ScriptStep::Fail(kind));
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn start_count(&self) -> usize {
        self.starts
    }

    pub fn stop_count(&self) -> usize {
        self.stops
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Script steps not yet consumed.
    pub fn remaining_input(&self) -> usize {
        self.script.len()
    }
}

impl ByteSource for MemoryTerminal {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.script.pop_front() {
            None => Ok(None),
            Some(ScriptStep::Byte(byte)) => Ok(Some(byte)),
            Some(ScriptStep::Signal) => {
                if let Some(flag) = &self.exit_flag {
                    flag.request();
                }
                Err(io::Error::from(io::ErrorKind::Interrupted))
            }
            Some(ScriptStep::Fail(kind)) => Err(io::Error::from(kind)),
        }
    }
}

impl Terminal for MemoryTerminal {
    fn start(&mut self) -> io::Result<()> {
        if self.fail_start {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "not a terminal",
            ));
        }
        self.starts += 1;
        self.raw = true;
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        self.stops += 1;
        self.raw = false;
        Ok(())
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        self.writes += 1;
        self.output.push_str(data);
        Ok(())
    }
}
