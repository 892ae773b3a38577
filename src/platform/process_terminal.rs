//! Terminal backed by the process's stdin/stdout.

use std::io;
use std::os::unix::io::AsRawFd;

use libc::{self, c_int};

use crate::core::input::ByteSource;
use crate::core::terminal::Terminal;
use crate::platform::signals::SignalWake;

/// One `poll(2)` call over `fds`, retried while it times out. `EINTR` is
/// returned to the caller.
fn poll_fds(fds: &mut [libc::pollfd]) -> io::Result<()> {
    loop {
        let result = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if result < 0 {
            return Err(io::Error::last_os_error());
        }
        if result > 0 {
            return Ok(());
        }
    }
}

fn wait_writable(fd: c_int) -> io::Result<()> {
    let mut fds = [libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    }];
    loop {
        match poll_fds(&mut fds) {
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
            Ok(()) if (fds[0].revents & libc::POLLOUT) != 0 => return Ok(()),
            Ok(()) => {
                return Err(io::Error::other(format!(
                    "stdout not writable (revents=0x{:x})",
                    fds[0].revents
                )));
            }
        }
    }
}

/// Hand all of `bytes` to `fd`.
///
/// A repaint is only correct if every escape sequence reaches the tty, and
/// an exit signal can land mid-frame, so short writes and `EINTR` are retried
/// until the frame is out; a non-blocking stdout waits for `POLLOUT`.
fn write_all_fd_with<FWrite, FWait>(
    fd: c_int,
    bytes: &[u8],
    mut write_once: FWrite,
    mut wait_writable: FWait,
) -> io::Result<()>
where
    FWrite: FnMut(c_int, &[u8]) -> io::Result<usize>,
    FWait: FnMut(c_int) -> io::Result<()>,
{
    let mut rest = bytes;
    while !rest.is_empty() {
        match write_once(fd, rest) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "stdout accepted no bytes",
                ));
            }
            Ok(count) if count > rest.len() => {
                return Err(io::Error::other("write reported more bytes than requested"));
            }
            Ok(count) => rest = &rest[count..],
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) if err.kind() == io::ErrorKind::WouldBlock => wait_writable(fd)?,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn write_once(fd: c_int, buf: &[u8]) -> io::Result<usize> {
    let result = unsafe { libc::write(fd, buf.as_ptr().cast::<libc::c_void>(), buf.len()) };
    if result < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(result as usize)
    }
}

/// Why a blocking input wait returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wakeup {
    Input,
    Signal,
}

/// Block until `fd` has input or `wake_fd` (the signal self-pipe) fires.
/// A pending signal wins over pending input.
fn wait_readable(fd: c_int, wake_fd: Option<c_int>) -> io::Result<Wakeup> {
    let mut fds = [
        libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        },
        libc::pollfd {
            fd: wake_fd.unwrap_or(-1),
            events: libc::POLLIN,
            revents: 0,
        },
    ];
    let watched = if wake_fd.is_some() { 2 } else { 1 };
    poll_fds(&mut fds[..watched])?;
    if watched == 2 && (fds[1].revents & libc::POLLIN) != 0 {
        return Ok(Wakeup::Signal);
    }
    Ok(Wakeup::Input)
}

fn read_one(fd: c_int) -> io::Result<Option<u8>> {
    let mut byte = 0u8;
    let result = unsafe { libc::read(fd, (&mut byte as *mut u8).cast::<libc::c_void>(), 1) };
    match result {
        n if n < 0 => Err(io::Error::last_os_error()),
        0 => Ok(None),
        _ => Ok(Some(byte)),
    }
}

fn get_termios(fd: c_int) -> io::Result<libc::termios> {
    let mut termios = unsafe { std::mem::zeroed::<libc::termios>() };
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(termios)
}

fn set_termios(fd: c_int, termios: &libc::termios) -> io::Result<()> {
    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, termios) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Editor input mode: no line buffering or echo, one byte per read.
///
/// `ISIG` stays on so Ctrl-C still raises SIGINT, and `ICRNL` stays on so
/// Enter arrives as `\n`.
fn editor_mode(original: &libc::termios) -> libc::termios {
    let mut raw = *original;
    raw.c_lflag &= !(libc::ICANON | libc::ECHO);
    raw.c_cc[libc::VMIN] = 1;
    raw.c_cc[libc::VTIME] = 0;
    raw
}

pub struct ProcessTerminal {
    stdin_fd: c_int,
    stdout_fd: c_int,
    original_termios: Option<libc::termios>,
    wake: Option<SignalWake>,
}

impl ProcessTerminal {
    pub fn new() -> Self {
        Self {
            stdin_fd: libc::STDIN_FILENO,
            stdout_fd: libc::STDOUT_FILENO,
            original_termios: None,
            wake: None,
        }
    }

    /// Let exit signals wake a blocked read; the read then fails with
    /// `ErrorKind::Interrupted`.
    pub fn with_signal_wake(mut self, wake: SignalWake) -> Self {
        self.wake = Some(wake);
        self
    }
}

impl Default for ProcessTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for ProcessTerminal {
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let wake_fd = self.wake.as_ref().map(AsRawFd::as_raw_fd);
        if wait_readable(self.stdin_fd, wake_fd)? == Wakeup::Signal {
            if let Some(wake) = &self.wake {
                wake.drain();
            }
            tracing::debug!("blocked read woken by exit signal");
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        read_one(self.stdin_fd)
    }
}

impl Terminal for ProcessTerminal {
    fn start(&mut self) -> io::Result<()> {
        let original = match self.original_termios {
            Some(original) => original,
            None => get_termios(self.stdin_fd)?,
        };
        set_termios(self.stdin_fd, &editor_mode(&original))?;
        self.original_termios = Some(original);
        tracing::debug!("terminal switched to editor mode");
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        let Some(original) = self.original_termios.take() else {
            return Ok(());
        };
        // Drop unread input so it does not leak to the shell.
        let _ = unsafe { libc::tcflush(self.stdin_fd, libc::TCIFLUSH) };
        set_termios(self.stdin_fd, &original)?;
        tracing::debug!("terminal mode restored");
        Ok(())
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        write_all_fd_with(self.stdout_fd, data.as_bytes(), write_once, wait_writable)
    }
}
