//! Terminal trait and lifecycle guard.

use std::io;

use crate::core::input::ByteSource;

/// Minimal terminal interface the editor needs.
///
/// Reads come through [`ByteSource`]: one blocking byte at a time. A read
/// interrupted by a signal surfaces as [`io::ErrorKind::Interrupted`].
pub trait Terminal: ByteSource {
    /// Switch to byte-at-a-time input without echo.
    fn start(&mut self) -> io::Result<()>;

    /// Restore the mode captured by [`Terminal::start`].
    fn stop(&mut self) -> io::Result<()>;

    /// Write output to the terminal.
    fn write(&mut self, data: &str) -> io::Result<()>;
}

/// Holds a started terminal and stops it exactly once: either through
/// [`TerminalGuard::finish`] or on drop (including unwinding).
pub struct TerminalGuard<'a, T: Terminal> {
    terminal: &'a mut T,
    active: bool,
}

impl<'a, T: Terminal> TerminalGuard<'a, T> {
    /// Start `terminal` and guard it. Nothing needs restoring if start fails.
    pub fn start(terminal: &'a mut T) -> io::Result<Self> {
        terminal.start()?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Access the wrapped terminal.
    pub fn terminal_mut(&mut self) -> &mut T {
        self.terminal
    }

    /// Stop the terminal now and report the result.
    pub fn finish(mut self) -> io::Result<()> {
        self.active = false;
        self.terminal.stop()
    }
}

impl<T: Terminal> Drop for TerminalGuard<'_, T> {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            let _ = self.terminal.stop();
        }
    }
}
