//! Write query responses to disk.
//!
//! The document is written exactly as received (pretty-printed), ready for a
//! notebook or dataframe library to load.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::AppError;

/// Write a response document as pretty JSON.
pub fn write_response_json(path: &Path, response: &Value) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create output JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, response)
        .map_err(|e| AppError::new(2, format!("Failed to write output JSON: {e}")))?;
    writeln!(writer).map_err(|e| AppError::new(2, format!("Failed to write output JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write output JSON: {e}")))?;

    Ok(())
}

/// Render a response document as pretty JSON for the terminal.
pub fn format_response_json(response: &Value) -> String {
    format!("{response:#}")
}
