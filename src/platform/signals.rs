//! SIGINT/SIGTERM handling.
//!
//! Handlers only set a flag and poke a self-pipe. The event loop notices the
//! flag between events and whenever a blocking read is woken, then shuts down
//! on its own stack, so cleanup never runs inside a signal handler.

use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::net::UnixStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::SigId;

use crate::error::BentoError;

pub const EXIT_SIGNALS: [i32; 2] = [libc::SIGINT, libc::SIGTERM];

/// Shared "please exit" flag.
#[derive(Debug, Clone, Default)]
pub struct ExitFlag(Arc<AtomicBool>);

impl ExitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Route SIGINT and SIGTERM to this flag until the guard is dropped.
    pub fn register_signals(&self) -> Result<SignalGuard, BentoError> {
        let mut guard = SignalGuard { ids: Vec::new() };
        for signal in EXIT_SIGNALS {
            let id = signal_hook::flag::register(signal, Arc::clone(&self.0))
                .map_err(|source| BentoError::Signal { signal, source })?;
            guard.ids.push(id);
        }
        tracing::debug!(signals = ?EXIT_SIGNALS, "exit signals registered");
        Ok(guard)
    }
}

/// Unregisters the flag handlers on drop.
#[derive(Debug)]
pub struct SignalGuard {
    ids: Vec<SigId>,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Self-pipe that turns readable when an exit signal arrives.
///
/// A terminal polls it next to its input so a signal landing just before a
/// blocking wait still wakes that wait.
#[derive(Debug)]
pub struct SignalWake {
    reader: UnixStream,
    ids: Vec<SigId>,
}

impl SignalWake {
    pub fn register() -> Result<Self, BentoError> {
        let (reader, writer) = UnixStream::pair().map_err(BentoError::WakePipe)?;
        reader.set_nonblocking(true).map_err(BentoError::WakePipe)?;
        writer.set_nonblocking(true).map_err(BentoError::WakePipe)?;

        let mut wake = Self {
            reader,
            ids: Vec::new(),
        };
        for signal in EXIT_SIGNALS {
            let end = writer.try_clone().map_err(BentoError::WakePipe)?;
            let id = signal_hook::low_level::pipe::register(signal, end)
                .map_err(|source| BentoError::Signal { signal, source })?;
            wake.ids.push(id);
        }
        Ok(wake)
    }

    /// Consume pending wake bytes. Returns how many were read.
    pub fn drain(&self) -> usize {
        let mut total = 0;
        let mut chunk = [0u8; 16];
        loop {
            match (&self.reader).read(&mut chunk) {
                Ok(0) => return total,
                Ok(count) => total += count,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => return total,
            }
        }
    }
}

impl AsRawFd for SignalWake {
    fn as_raw_fd(&self) -> RawFd {
        self.reader.as_raw_fd()
    }
}

impl Drop for SignalWake {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}
