//! Cell-level diff of two shape-aligned tables

use crate::error::{Error, Result};
use crate::table::{CellValue, Table};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A production cell annotated with whether development diverges from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffCell {
    /// The production value
    pub value: CellValue,
    /// True when the corresponding development cell holds a different value
    pub differs: bool,
}

/// A diffed row, shaped like its production counterpart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffRow {
    /// Row label (from production)
    pub label: String,
    /// Annotated cells
    pub cells: Vec<DiffCell>,
}

/// The differences view: production values with per-cell divergence flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffTable {
    /// Rows in production order
    pub rows: Vec<DiffRow>,
    /// Number of data columns
    pub column_count: usize,
}

impl DiffTable {
    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells flagged as differing
    pub fn changed_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.iter().filter(|c| c.differs).count())
            .sum()
    }
}

/// Compare two shape-aligned tables cell by cell
///
/// Walks production rows in order; the matching development cell is
/// looked up by row label and column position. A label absent from
/// development counts as different from any concrete value, as does a
/// missing cell. Equality is exact on both value and type, so the
/// number `0` and the text `"0"` differ.
///
/// Rows present only in development are not emitted: the differences
/// view is always shaped like the production table. This asymmetry is
/// intended.
pub fn diff_tables(prod: &Table, dev: &Table) -> Result<DiffTable> {
    if prod.column_count() != dev.column_count() {
        return Err(Error::ShapeMismatch {
            left: prod.column_count(),
            right: dev.column_count(),
        });
    }

    let rows: Vec<DiffRow> = prod
        .rows
        .iter()
        .map(|row| {
            let dev_row = dev.find_row(&row.label);
            let cells = row
                .cells
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let differs = match dev_row {
                        Some(d) => d.get(i) != Some(value),
                        None => true,
                    };
                    DiffCell {
                        value: value.clone(),
                        differs,
                    }
                })
                .collect();
            DiffRow {
                label: row.label.clone(),
                cells,
            }
        })
        .collect();

    let diff = DiffTable {
        rows,
        column_count: prod.column_count(),
    };
    debug!(
        rows = diff.row_count(),
        changed = diff.changed_count(),
        "diffed tables"
    );

    Ok(diff)
}
