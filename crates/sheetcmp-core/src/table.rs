//! Core table types for label-indexed attribute/value data

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A table keyed by row label, loaded from a single export file
///
/// Rows keep the order they appeared in the source. Labels are unique
/// (the loader keeps the first occurrence of a duplicate) and every row
/// carries exactly `column_count` cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Row data, in source order
    pub rows: Vec<Row>,
    /// Number of data columns (the label column is not counted)
    pub column_count: usize,
}

impl Table {
    /// Create a new empty table with the given width
    pub fn new(column_count: usize) -> Self {
        Self {
            rows: Vec::new(),
            column_count,
        }
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of data columns
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Find a row by its label
    ///
    /// With duplicate labels in `rows` this returns the first match,
    /// which is also the occurrence the loader keeps.
    pub fn find_row(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Get a cell by row label and column position
    ///
    /// Unlike indexing, out-of-range access fails with a named error.
    pub fn cell(&self, label: &str, index: usize) -> Result<&CellValue> {
        let row = self.find_row(label).ok_or_else(|| Error::RowNotFound {
            label: label.to_string(),
        })?;
        row.cells.get(index).ok_or_else(|| Error::ColumnOutOfRange {
            label: label.to_string(),
            index,
            width: row.cells.len(),
        })
    }

    /// Iterate over the row labels in table order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }
}

/// A row of data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    /// Row label (first column of the source file)
    pub label: String,
    /// Cell values for each data column
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a new row
    pub fn new(label: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A cell value with type detection
///
/// Equality is structural, so a numeric cell never equals a text cell
/// holding the same digits: `Integer(0) != Text("0".into())`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Integer value
    Integer(i64),
    /// Floating-point value
    Float(f64),
    /// Text value
    Text(String),
    /// Boolean value (spreadsheet inputs only)
    Boolean(bool),
    /// Empty/null cell
    Empty,
}

impl CellValue {
    /// Parse a string into a CellValue, detecting the type
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        // Try parsing as integer first
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }

        // Try parsing as float
        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }

        // Otherwise, keep as text
        CellValue::Text(trimmed.to_string())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Convert to a display string
    pub fn to_string_value(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(fl) => write!(f, "{}", fl),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Empty => write!(f, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table {
            rows: vec![
                Row::new("Revenue", vec![CellValue::Integer(100), CellValue::Integer(200)]),
                Row::new("Page Name", vec![CellValue::Text("home".into()), CellValue::Empty]),
            ],
            column_count: 2,
        }
    }

    #[test]
    fn test_cell_value_parse_integer() {
        assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
        assert_eq!(CellValue::parse("-123"), CellValue::Integer(-123));
        assert_eq!(CellValue::parse("0"), CellValue::Integer(0));
    }

    #[test]
    fn test_cell_value_parse_float() {
        assert_eq!(CellValue::parse("3.14"), CellValue::Float(3.14));
        assert_eq!(CellValue::parse("-2.5"), CellValue::Float(-2.5));
    }

    #[test]
    fn test_cell_value_parse_text() {
        assert_eq!(
            CellValue::parse("hello"),
            CellValue::Text("hello".to_string())
        );
    }

    #[test]
    fn test_cell_value_parse_empty() {
        assert_eq!(CellValue::parse(""), CellValue::Empty);
        assert_eq!(CellValue::parse("   "), CellValue::Empty);
    }

    #[test]
    fn test_number_and_text_are_distinct() {
        assert_ne!(CellValue::Integer(0), CellValue::Text("0".to_string()));
        assert_ne!(CellValue::Float(1.5), CellValue::Text("1.5".to_string()));
    }

    #[test]
    fn test_find_row() {
        let table = sample_table();
        assert!(table.find_row("Revenue").is_some());
        assert!(table.find_row("Missing").is_none());
    }

    #[test]
    fn test_cell_access() {
        let table = sample_table();
        assert_eq!(
            table.cell("Revenue", 1).unwrap(),
            &CellValue::Integer(200)
        );
    }

    #[test]
    fn test_cell_access_row_not_found() {
        let table = sample_table();
        assert!(matches!(
            table.cell("Missing", 0),
            Err(crate::Error::RowNotFound { .. })
        ));
    }

    #[test]
    fn test_cell_access_column_out_of_range() {
        let table = sample_table();
        assert!(matches!(
            table.cell("Revenue", 5),
            Err(crate::Error::ColumnOutOfRange { index: 5, .. })
        ));
    }
}
