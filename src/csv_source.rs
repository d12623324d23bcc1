// src/csv_source.rs
use csv::{Reader, ReaderBuilder, StringRecord};
use std::{
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::{InjectError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A delimited text file buffered in memory, with its header row already parsed.
pub struct CsvSource {
    path: PathBuf,
    headers: Vec<String>,
    reader: Reader<Cursor<Vec<u8>>>,
}

impl CsvSource {
    /// Read `path` fully, drop a leading UTF-8 BOM, and parse the header row.
    pub fn open<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut data = fs::read(&path).map_err(|e| InjectError::file_access(&path, e))?;
        if data.starts_with(UTF8_BOM) {
            data.drain(..UTF8_BOM.len());
        }
        Self::from_bytes(path, data, delimiter)
    }

    fn from_bytes(path: PathBuf, data: Vec<u8>, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true) // short/long rows are handled by the caller
            .from_reader(Cursor::new(data));

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| InjectError::csv(&path, e))?
            .iter()
            .map(str::to_string)
            .collect();
        debug!(path = %path.display(), ?headers, "parsed header row");

        Ok(Self {
            path,
            headers,
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of `name` in the header row, if present. A repeated name resolves
    /// to its last occurrence, the column whose value a record ends up keeping.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().rposition(|h| h == name)
    }

    /// Like [`column_index`](Self::column_index), but a missing column is a schema error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| InjectError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    /// Iterate data rows in file order, tagging parse failures with the file path.
    pub fn records(&mut self) -> impl Iterator<Item = Result<StringRecord>> + '_ {
        let path = &self.path;
        self.reader
            .records()
            .map(move |r| r.map_err(|e| InjectError::csv(path, e)))
    }
}
