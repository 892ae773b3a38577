//! Session state and the run loop.

pub mod event_loop;
pub mod session;

pub use event_loop::{run_session, SessionReport};
pub use session::{EditorSession, Outcome};
