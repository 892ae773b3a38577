//! Rendering pipeline.

pub mod highlight;
pub mod renderer;

pub use highlight::{highlight_line, Ghost, KeywordTable};
pub use renderer::{Renderer, Repaint, View};
