//! Table loader for production/development export files
//!
//! Reads a raw tabular file with no header interpretation, promotes the
//! first column to the row-label index, then strips the boilerplate
//! `"Solution"` row and everything in the excluded-rows set.

use crate::error::{Error, Result};
use crate::filter::RowFilterSet;
use crate::table::{CellValue, Row, Table};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Label of the boilerplate row the export tool prepends; never real data
const SOLUTION_LABEL: &str = "Solution";

/// Load an export file and clean it for comparison
///
/// The first row of the file is ordinary data, not column names. The
/// first column becomes the row-label index. The `"Solution"` row (if
/// present) and every row whose label is in `filter` are dropped;
/// surviving rows keep their source order.
pub fn load_and_clean<P: AsRef<Path>>(path: P, filter: &RowFilterSet) -> Result<Table> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let grid = match extension.as_str() {
        "xlsx" | "xlsm" => read_workbook_grid(path)?,
        "csv" => {
            let file = File::open(path).map_err(|e| Error::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            read_csv_grid(BufReader::new(file), path)?
        }
        other => {
            return Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    index_and_clean(grid, filter, path)
}

/// Load and clean CSV content from a string (useful for testing)
pub fn load_and_clean_csv_str(
    content: &str,
    source_name: &str,
    filter: &RowFilterSet,
) -> Result<Table> {
    let path = PathBuf::from(source_name);
    let grid = read_csv_grid(content.as_bytes(), &path)?;
    index_and_clean(grid, filter, &path)
}

/// Read the first worksheet of a workbook into a raw grid
fn read_workbook_grid(path: &Path) -> Result<Vec<Vec<CellValue>>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| Error::Workbook {
        path: path.to_path_buf(),
        source: e,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::TableParse {
            path: path.to_path_buf(),
            message: "workbook has no worksheets".to_string(),
        })?
        .map_err(|e| Error::Workbook {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect())
}

/// Map a workbook cell to our value model
///
/// Floats with no fractional part become integers so that the two
/// supported input formats agree on whole numbers.
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                CellValue::Integer(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// Read CSV content into a raw grid, treating every row as data
fn read_csv_grid<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<Vec<CellValue>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // Allow varying number of fields
        .from_reader(reader);

    let mut grid = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        grid.push(record.iter().map(CellValue::parse).collect());
    }

    Ok(grid)
}

/// Promote column 0 to the label index and drop excluded rows
fn index_and_clean(grid: Vec<Vec<CellValue>>, filter: &RowFilterSet, path: &Path) -> Result<Table> {
    let width = grid.iter().map(|r| r.len()).max().unwrap_or(0);
    if grid.is_empty() || width == 0 {
        return Err(Error::EmptyTable {
            path: path.to_path_buf(),
        });
    }
    let column_count = width - 1;

    let mut rows: Vec<Row> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut removed = 0usize;

    for source_row in grid {
        let mut cells = source_row.into_iter();
        let label = cells.next().map(|c| c.to_string_value()).unwrap_or_default();
        let mut data: Vec<CellValue> = cells.collect();

        if label == SOLUTION_LABEL || filter.contains(&label) {
            removed += 1;
            continue;
        }

        // Duplicate labels: the first occurrence wins
        if !seen.insert(label.clone()) {
            warn!(label = %label, file = %path.display(), "duplicate row label, keeping first occurrence");
            continue;
        }

        // Pad short rows so every row carries column_count cells
        data.resize(column_count, CellValue::Empty);
        rows.push(Row::new(label, data));
    }

    debug!(
        file = %path.display(),
        rows = rows.len(),
        removed,
        columns = column_count,
        "loaded table"
    );

    Ok(Table { rows, column_count })
}
