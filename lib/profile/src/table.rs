//! Raw tables
//!
//! A parsed table before profiling: a header row followed by data rows of
//! untyped string cells. Rows may be ragged; the header decides the width.

use insightx_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A single column after transposition. `None` marks a missing cell.
pub type ColumnValues = Vec<Option<String>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawTable {
    /// Column names; duplicates are allowed
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Build from row-major records where the first record is the header
    pub fn from_records(mut records: Vec<Vec<String>>) -> Self {
        if records.is_empty() {
            return Self::default();
        }
        let header = records.remove(0);
        Self { header, rows: records }
    }

    /// Parse CSV text. Blank lines are skipped and rows may have any width.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes())
    }

    /// Parse CSV from any reader.
    ///
    /// Data records that fail to decode (e.g. invalid UTF-8) are skipped with
    /// a warning instead of failing the whole table. An undecodable header is
    /// a [`Error::TableParse`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (line, result) in reader.records().enumerate() {
            match result {
                Ok(record) => records.push(record.iter().map(str::to_string).collect()),
                Err(e) if e.is_io_error() => {
                    return Err(Error::TableParse(e.to_string()));
                }
                Err(e) if records.is_empty() => {
                    return Err(Error::TableParse(format!("unreadable header record: {}", e)));
                }
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping malformed CSV record {}: {}", line + 1, e);
                }
            }
        }
        if skipped > 0 {
            tracing::info!("CSV parsed: {} records kept, {} skipped", records.len(), skipped);
        }

        Ok(Self::from_records(records))
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there is nothing to profile: no header or no data rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() || self.rows.is_empty()
    }

    /// Column-major view of the data rows.
    ///
    /// Cells are trimmed and empty cells become `None`. Short rows are padded
    /// with `None`; cells beyond the header width are dropped.
    pub fn columns(&self) -> Vec<ColumnValues> {
        let width = self.header.len();
        let mut columns: Vec<ColumnValues> = (0..width)
            .map(|_| Vec::with_capacity(self.rows.len()))
            .collect();

        for row in &self.rows {
            for (c, column) in columns.iter_mut().enumerate() {
                let cell = row
                    .get(c)
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string);
                column.push(cell);
            }
        }
        columns
    }

    /// Flatten header and rows into comma-joined lines, for chunking as text
    pub fn to_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .filter(|r| !r.is_empty())
            .map(|r| r.join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_csv_with_header() {
        let table = RawTable::from_csv_str("id,name\n1,alice\n2,bob\n").unwrap();
        assert_eq!(table.header, strings(&["id", "name"]));
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table = RawTable::from_csv_str("a,b\n\n1,2\n\n3,4\n").unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let table = RawTable::from_csv_str("").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_header_only_is_empty() {
        let table = RawTable::from_csv_str("a,b,c\n").unwrap();
        assert_eq!(table.column_count(), 3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_columns_trim_pad_and_truncate() {
        let table = RawTable::new(
            strings(&["a", "b"]),
            vec![strings(&[" 1 ", "x", "extra"]), strings(&["2"]), strings(&["", "  "])],
        );
        let columns = table.columns();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], vec![Some("1".to_string()), Some("2".to_string()), None]);
        assert_eq!(columns[1], vec![Some("x".to_string()), None, None]);
    }

    #[test]
    fn test_quoted_fields() {
        let table = RawTable::from_csv_str("name,notes\n\"Smith, J\",\"said \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.rows[0], strings(&["Smith, J", "said \"hi\""]));
    }

    #[test]
    fn test_to_text() {
        let table = RawTable::new(strings(&["a", "b"]), vec![strings(&["1", "2"])]);
        assert_eq!(table.to_text(), "a,b\n1,2");
    }

    #[test]
    fn test_unreadable_header_is_parse_error() {
        let bytes: &[u8] = b"\xff\xfeid,name\n1,ana\n2,rui\n";
        let err = RawTable::from_csv_reader(bytes).unwrap_err();
        assert!(matches!(err, Error::TableParse(_)));
    }

    #[test]
    fn test_unreadable_data_row_is_skipped() {
        let bytes: &[u8] = b"id,name\n1,\xff\n2,rui\n";
        let table = RawTable::from_csv_reader(bytes).unwrap();
        assert_eq!(table.header, strings(&["id", "name"]));
        assert_eq!(table.rows, vec![strings(&["2", "rui"])]);
    }
}
