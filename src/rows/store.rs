//! Row storage: delimiter-split records addressed by original index

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::template;

/// One parsed input line
pub type Row = Vec<String>;

/// Errors surfaced while loading rows
#[derive(Debug, thiserror::Error)]
pub enum RowStoreError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),
}

/// Split a line on a single delimiter character.
///
/// No quoting or escaping; consecutive delimiters yield empty fields.
pub fn split_line(line: &str, delimiter: char) -> Row {
    line.split(delimiter).map(str::to_string).collect()
}

/// Ordered rows, indices always contiguous from 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowStore {
    rows: Vec<Row>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already split rows
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Replace all rows with the contents of `path`.
    ///
    /// The store is cleared first, so it stays empty when the file cannot
    /// be opened.
    pub fn load(&mut self, path: &Path, delimiter: char) -> Result<usize, RowStoreError> {
        self.rows.clear();
        let file = File::open(path).map_err(|source| RowStoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let count = self.load_reader(BufReader::new(file), delimiter)?;
        tracing::info!("Loaded {} rows from {}", count, path.display());
        Ok(count)
    }

    /// Replace all rows with lines read from `reader` (used for piped stdin)
    pub fn load_reader<R: BufRead>(
        &mut self,
        mut reader: R,
        delimiter: char,
    ) -> Result<usize, RowStoreError> {
        self.rows.clear();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            self.add_line(&String::from_utf8_lossy(&buf), delimiter);
        }
        Ok(self.rows.len())
    }

    /// Append one parsed line
    pub fn add_line(&mut self, line: &str, delimiter: char) {
        self.rows.push(split_line(line, delimiter));
    }

    /// Remove the row at `idx`; later rows shift down by one.
    /// Out-of-range indices are ignored.
    pub fn erase(&mut self, idx: usize) {
        if idx < self.rows.len() {
            self.rows.remove(idx);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow a row, `None` when out of range
    pub fn get(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    /// Copy of the row, empty when out of range
    pub fn row(&self, idx: usize) -> Row {
        self.rows.get(idx).cloned().unwrap_or_default()
    }

    /// Fields of the row joined with `sep`, empty when out of range
    pub fn joined_row(&self, idx: usize, sep: &str) -> String {
        self.rows
            .get(idx)
            .map(|row| row.join(sep))
            .unwrap_or_default()
    }

    /// Run the template engine against one row, empty when out of range
    pub fn substitute(&self, template_str: &str, idx: usize) -> String {
        match self.rows.get(idx) {
            Some(row) => template::substitute(template_str, row),
            None => String::new(),
        }
    }

    /// Labels for every row in store order
    pub fn menu_entries(&self, template_str: &str) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| template::substitute(template_str, row))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}
