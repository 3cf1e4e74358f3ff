//! Append-only results file, one wall-clock time per line.

use crate::error::*;
use std::io::prelude::*;
use std::path::Path;

/// Append `wall_seconds` as `%f` to `path`, creating the file if needed.
pub fn append_result<P: AsRef<Path>>(path: &P, wall_seconds: f64) -> Result<()> {
    let file_error = |source| BenchError::FileOpen {
        path: path.as_ref().to_path_buf(),
        source,
    };
    let mut output = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(file_error)?;
    writeln!(output, "{wall_seconds:.6}").map_err(file_error)?;
    Ok(())
}
