// src/serialize/mod.rs
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::error::{InjectError, Result};

/// Write `records` to `path` as one pretty-printed JSON array (two-space indent,
/// non-ASCII kept verbatim, trailing newline). An existing file is replaced.
#[tracing::instrument(level = "info", skip(path, records), fields(path = %path.as_ref().display(), records = records.len()))]
pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, records: &[T]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| InjectError::file_access(path, e))?;
    let mut out = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut out, records).map_err(|e| {
        if e.is_io() {
            InjectError::file_access(path, e.into())
        } else {
            InjectError::Json(e)
        }
    })?;
    out.write_all(b"\n")
        .and_then(|()| out.flush())
        .map_err(|e| InjectError::file_access(path, e))?;

    info!("wrote JSON document");
    Ok(())
}

/// Render `records` in the same layout as [`write_json`].
pub fn to_json_string<T: Serialize>(records: &[T]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(records)?;
    text.push('\n');
    Ok(text)
}
