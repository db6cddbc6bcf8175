//! A header-addressed snapshot of one CSV collection.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

use crate::errors::SheetsError;

/// Full snapshot of a collection: trimmed headers plus every non-blank row.
#[derive(Debug, Clone)]
pub struct SheetTable {
    collection: String,
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl SheetTable {
    pub fn from_path(collection: &str, path: &Path) -> Result<Self, SheetsError> {
        let content = std::fs::read(path).map_err(|source| SheetsError::Io {
            collection: collection.to_string(),
            source,
        })?;
        Self::from_bytes(collection, &content)
    }

    /// Parses raw bytes. A UTF-8 byte order mark is ignored; ragged rows are
    /// tolerated and read as blank past their last field.
    pub fn from_bytes(collection: &str, content: &[u8]) -> Result<Self, SheetsError> {
        let content = strip_bom(content);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(content);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| SheetsError::Csv {
                collection: collection.to_string(),
                row: 0,
                source,
            })?
            .iter()
            .map(|h| h.to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(SheetsError::Empty {
                collection: collection.to_string(),
            });
        }

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|source| SheetsError::Csv {
                collection: collection.to_string(),
                row: idx + 1,
                source,
            })?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record);
        }

        Ok(Self {
            collection: collection.to_string(),
            headers,
            rows,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header that must be present.
    pub fn required_column(&self, name: &str) -> Result<usize, SheetsError> {
        self.optional_column(name)
            .ok_or_else(|| SheetsError::MissingColumn {
                collection: self.collection.clone(),
                column: name.to_string(),
            })
    }

    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of the first present header among `names`, reported as missing
    /// under the first name.
    pub fn first_of_columns(&self, names: &[&str]) -> Result<usize, SheetsError> {
        names
            .iter()
            .find_map(|name| self.optional_column(name))
            .ok_or_else(|| SheetsError::MissingColumn {
                collection: self.collection.clone(),
                column: names.first().copied().unwrap_or_default().to_string(),
            })
    }
}

/// Cell text at `idx`, empty when the row is shorter than the header.
pub fn cell(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().to_string()
}

fn strip_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(content)
}
