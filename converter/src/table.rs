//! Header-driven CSV tables
//!
//! A table is loaded completely before conversion starts. Each row is a
//! column name -> cell mapping; cells are trimmed and empty cells read as
//! absent.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use crate::error::{ConvertError, ConvertResult};

/// Which of the two input tables a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Persons,
    Families,
}

impl TableKind {
    /// Header columns that must be present for the table to be usable.
    /// Any other column may be missing and then reads as empty.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Persons => &["id", "full_name", "gender"],
            TableKind::Families => &["id", "partner1", "partner2"],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Persons => write!(f, "person"),
            TableKind::Families => write!(f, "family"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    /// Cell value, `None` when the column is missing or the cell is empty
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// True when every cell is empty (spreadsheet exports often end with such rows)
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from already parsed rows, checking the required headers.
    pub fn new(kind: TableKind, headers: Vec<String>, rows: Vec<Row>) -> ConvertResult<Self> {
        for column in kind.required_columns() {
            if !headers.iter().any(|h| h == column) {
                return Err(ConvertError::MalformedTable {
                    table: kind,
                    detail: format!("missing required column `{column}`"),
                });
            }
        }

        Ok(Self { rows })
    }

    /// Reads a whole CSV document with a header line.
    pub fn from_reader<R: Read>(kind: TableKind, reader: R) -> ConvertResult<Self> {
        let malformed = |err: csv::Error| ConvertError::MalformedTable {
            table: kind,
            detail: err.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(malformed)?
            .iter()
            .map(String::from)
            .collect();

        let mut rows: Vec<Row> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(malformed)?;
            rows.push(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h.as_str(), v))
                    .collect(),
            );
        }

        Self::new(kind, headers, rows)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows paired with their 1-based data row number, blank rows skipped
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| (index + 1, row))
            .filter(|(_, row)| !row.is_blank())
    }
}
