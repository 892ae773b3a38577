//! Bento: a small raw-mode terminal text editor.
//!
//! Invariant: single output gate. Only `core::output::OutputGate::flush(..)`
//! writes to the terminal.
//!
//! # Public API Overview
//! - Drive a session with [`run_session`] over any [`Terminal`].
//! - Apply decoded [`InputEvent`]s to an [`EditorSession`] directly for
//!   headless use.
//! - Use [`MemoryTerminal`] to script input and capture output in tests.

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;
pub mod render;
pub mod runtime;

pub use crate::config::EditorConfig;
pub use crate::error::BentoError;

/// Editing model.
pub use crate::core::buffer::LineBuffer;
pub use crate::core::cursor::{Cursor, Direction};
pub use crate::core::input::{decode_event, read_event, ByteSource, InputEvent};

/// Editing aids.
pub use crate::core::autocomplete::IdentifierSet;
pub use crate::core::indent::Indenter;
pub use crate::core::pattern::{find, find_word};
pub use crate::core::prefix_index::PrefixIndex;

/// Terminal interfaces and implementations.
pub use crate::core::terminal::{Terminal, TerminalGuard};
pub use crate::platform::{
    ExitFlag, MemoryTerminal, ProcessTerminal, SignalGuard, SignalWake,
};

/// Rendering.
pub use crate::render::{highlight_line, KeywordTable, Renderer, Repaint};

/// Session and run loop.
pub use crate::runtime::{run_session, EditorSession, Outcome, SessionReport};
