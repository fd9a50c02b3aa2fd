//! CSV datasets of articles

use crate::error::{FinsentError, FinsentResult};
use std::path::Path;
use tracing::debug;

/// Column holding the article body
pub const CONTENT_COLUMN: &str = "article_content";

/// Column receiving the label
pub const SENTIMENT_COLUMN: &str = "Sentiment";

/// An in-memory CSV table. Columns other than the two above pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a table. Every row is padded with empty cells, or cut, to the
    /// header width.
    pub fn new(headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        for row in &mut rows {
            row.resize(headers.len(), String::new());
        }
        Self { headers, rows }
    }

    /// Read a CSV file with a header row
    pub fn read_csv(path: &Path) -> FinsentResult<Self> {
        let path_str = path.display().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| FinsentError::csv(format!("Failed to open dataset: {}", e), &path_str))?;

        let headers = reader
            .headers()
            .map_err(|e| FinsentError::csv(format!("Failed to read header: {}", e), &path_str))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| FinsentError::csv(format!("Failed to read row: {}", e), &path_str))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(rows = rows.len(), "read dataset {}", path_str);
        Ok(Self::new(headers, rows))
    }

    /// Write the table, creating the parent directory if needed
    pub fn write_csv(&self, path: &Path) -> FinsentResult<()> {
        let path_str = path.display().to_string();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    FinsentError::io_with_path(
                        format!("Failed to create output directory: {}", e),
                        parent.display().to_string(),
                    )
                })?;
            }
        }

        let mut writer = csv::Writer::from_path(path)
            .map_err(|e| FinsentError::csv(format!("Failed to create output: {}", e), &path_str))?;
        writer
            .write_record(&self.headers)
            .map_err(|e| FinsentError::csv(format!("Failed to write header: {}", e), &path_str))?;
        for row in &self.rows {
            writer
                .write_record(row)
                .map_err(|e| FinsentError::csv(format!("Failed to write row: {}", e), &path_str))?;
        }
        writer
            .flush()
            .map_err(|e| FinsentError::io_with_path(format!("Failed to flush output: {}", e), &path_str))?;

        debug!(rows = self.rows.len(), "wrote dataset {}", path_str);
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Values of one column, in row order
    pub fn column(&self, name: &str) -> FinsentResult<Vec<&str>> {
        let index = self.column_index(name).ok_or_else(|| {
            FinsentError::invalid_input_field(format!("dataset has no '{}' column", name), name)
        })?;
        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Replace a column, or append it when absent
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> FinsentResult<()> {
        if values.len() != self.rows.len() {
            return Err(FinsentError::invalid_input(format!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            )));
        }

        match self.column_index(name) {
            Some(index) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}
