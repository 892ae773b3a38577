use std::fs;
use std::path::Path;

use crate::core::buffer::LineBuffer;
use crate::error::BentoError;

/// Write the buffer to `path`, creating or truncating it.
///
/// Lines are joined with `\n` and no trailing newline is added.
pub fn save_buffer(path: &Path, buffer: &LineBuffer) -> Result<(), BentoError> {
    let text = buffer.text();
    fs::write(path, text.as_bytes()).map_err(|err| BentoError::save(path, err))?;
    tracing::info!(path = %path.display(), lines = buffer.line_count(), "buffer saved");
    Ok(())
}
