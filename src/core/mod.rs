//! Editing model: buffer, cursor, input decoding, and editing aids.

pub mod autocomplete;
pub mod buffer;
pub mod cursor;
pub mod indent;
pub mod input;
pub mod output;
pub mod pattern;
pub mod prefix_index;
pub mod terminal;
