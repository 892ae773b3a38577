//! Platform integrations: terminals, signals, and file output.

pub mod memory_terminal;
pub mod process_terminal;
pub mod signals;
pub mod storage;

pub use memory_terminal::{MemoryTerminal, ScriptStep};
pub use process_terminal::ProcessTerminal;
pub use signals::{ExitFlag, SignalGuard, SignalWake};
pub use storage::save_buffer;
