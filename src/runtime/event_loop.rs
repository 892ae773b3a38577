//! Blocking read / apply / paint loop.
//!
//! The terminal is started once and stopped exactly once on every path out
//! of [`run_session`]. The buffer is saved exactly once after the loop ends,
//! whether it ended by interrupt, end of input, or a fatal I/O error.

use std::io;
use std::path::Path;

use crate::core::input::read_event;
use crate::core::output::OutputGate;
use crate::core::terminal::{Terminal, TerminalGuard};
use crate::error::BentoError;
use crate::platform::signals::ExitFlag;
use crate::platform::storage::save_buffer;
use crate::render::renderer::Renderer;
use crate::runtime::session::{EditorSession, Outcome};

/// What happened during a completed session.
#[derive(Debug)]
pub struct SessionReport {
    /// Events applied to the session, including the final interrupt.
    pub events: usize,
    /// Save failure; non-fatal.
    pub save_error: Option<BentoError>,
}

impl SessionReport {
    pub fn saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Run `session` on `terminal` until interrupt, then save to `output_path`.
///
/// Returns `Err` only for failures that ended the loop early or prevented a
/// clean terminal restore. Save failures are carried in the report.
pub fn run_session<T: Terminal>(
    terminal: &mut T,
    session: &mut EditorSession,
    exit: &ExitFlag,
    output_path: &Path,
) -> Result<SessionReport, BentoError> {
    let mut guard = TerminalGuard::start(terminal).map_err(BentoError::RawMode)?;
    tracing::info!(output = %output_path.display(), "session started");

    let mut events = 0;
    let loop_result = drive(guard.terminal_mut(), session, exit, &mut events);

    let save_error = save_buffer(output_path, session.buffer()).err();
    if let Some(err) = &save_error {
        tracing::warn!(error = %err, "save failed");
    }

    let restore = guard.finish().map_err(BentoError::RestoreMode);
    tracing::info!(events, "session ended");

    loop_result?;
    restore?;
    Ok(SessionReport { events, save_error })
}

fn drive<T: Terminal>(
    terminal: &mut T,
    session: &mut EditorSession,
    exit: &ExitFlag,
    events: &mut usize,
) -> Result<(), BentoError> {
    let mut renderer = Renderer::new();
    let mut gate = OutputGate::new();

    gate.extend(renderer.full(session.view()));
    gate.flush(terminal).map_err(BentoError::Write)?;

    loop {
        if exit.is_requested() {
            tracing::debug!("exit requested");
            return Ok(());
        }

        let event = match read_event(terminal) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::error!(error = %err, "terminal read failed");
                return Err(BentoError::Read(err));
            }
        };

        // A signal can land while the read was blocked; its byte is dropped.
        if exit.is_requested() {
            tracing::debug!(?event, "exit requested during read");
            return Ok(());
        }

        *events += 1;
        tracing::trace!(?event, "event");
        match session.apply(event) {
            Outcome::Exit => return Ok(()),
            Outcome::Continue(repaint) => {
                gate.extend(renderer.paint(session.view(), repaint));
                gate.flush(terminal).map_err(BentoError::Write)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run_session;
    use crate::core::input::ByteSource;
    use crate::core::terminal::Terminal;
    use crate::error::BentoError;
    use crate::platform::memory_terminal::MemoryTerminal;
    use crate::platform::signals::ExitFlag;
    use crate::runtime::session::EditorSession;
    use std::io::{self, ErrorKind};

    /// Terminal whose read races an exit signal: the flag is raised while
    /// the read is in progress and a key still comes back.
    struct SignalDuringRead {
        exit: ExitFlag,
        output: String,
        stops: usize,
    }

    impl ByteSource for SignalDuringRead {
        fn next_byte(&mut self) -> io::Result<Option<u8>> {
            self.exit.request();
            Ok(Some(b'z'))
        }
    }

    impl Terminal for SignalDuringRead {
        fn start(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn stop(&mut self) -> io::Result<()> {
            self.stops += 1;
            Ok(())
        }

        fn write(&mut self, data: &str) -> io::Result<()> {
            self.output.push_str(data);
            Ok(())
        }
    }

    #[test]
    fn key_read_after_exit_signal_is_not_applied() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let exit = ExitFlag::new();
        let mut terminal = SignalDuringRead {
            exit: exit.clone(),
            output: String::new(),
            stops: 0,
        };
        let mut session = EditorSession::new();

        let report = run_session(&mut terminal, &mut session, &exit, &path).expect("run");
        assert_eq!(report.events, 0);
        assert_eq!(session.buffer().lines(), &[""]);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "");
        assert_eq!(terminal.stops, 1);
        assert!(!terminal.output.contains('z'));
    }

    #[test]
    fn ctrl_c_saves_once_and_restores_terminal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let mut terminal = MemoryTerminal::with_bytes(b"hi\x03ignored");
        let mut session = EditorSession::new();

        let report = run_session(&mut terminal, &mut session, &ExitFlag::new(), &path)
            .expect("run");
        assert!(report.saved());
        assert_eq!(report.events, 3);
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "hi");
        assert_eq!(terminal.start_count(), 1);
        assert_eq!(terminal.stop_count(), 1);
        assert_eq!(terminal.remaining_input(), "ignored".len());
    }

    #[test]
    fn failed_start_does_not_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let mut terminal = MemoryTerminal::new().fail_on_start();
        let err = run_session(&mut terminal, &mut EditorSession::new(), &ExitFlag::new(), &path)
            .expect_err("start fails");
        assert!(matches!(err, BentoError::RawMode(_)));
        assert!(!path.exists());
        assert_eq!(terminal.stop_count(), 0);
    }

    #[test]
    fn read_error_still_saves_and_restores() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        let mut terminal = MemoryTerminal::with_bytes("ab");
        terminal.push_failure(ErrorKind::BrokenPipe);
        let err = run_session(&mut terminal, &mut EditorSession::new(), &ExitFlag::new(), &path)
            .expect_err("read fails");
        assert!(matches!(err, BentoError::Read(_)));
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "ab");
        assert_eq!(terminal.stop_count(), 1);
    }

    #[test]
    fn save_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.txt");
        let mut terminal = MemoryTerminal::with_bytes("x\x03");
        let report = run_session(&mut terminal, &mut EditorSession::new(), &ExitFlag::new(), &path)
            .expect("run");
        assert!(matches!(report.save_error, Some(BentoError::Save { .. })));
        assert_eq!(terminal.stop_count(), 1);
    }
}
