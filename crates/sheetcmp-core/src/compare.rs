//! The comparison pipeline: load, reconcile, diff, write
//!
//! One run is synchronous and self-contained: two input paths and a
//! filter set go in, a [`ComparisonResult`] (and optionally the output
//! workbook) comes out. Any failure aborts the run; nothing is retried.

use crate::diff::{diff_tables, DiffTable};
use crate::error::Result;
use crate::filter::RowFilterSet;
use crate::loader::load_and_clean;
use crate::reconcile::reconcile;
use crate::table::Table;
use crate::writer::write_report;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// The outcome of one comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Cleaned production table, shape-reconciled
    pub production: Table,
    /// Cleaned development table, shape-reconciled
    pub development: Table,
    /// Differences view, shaped like production
    pub differences: DiffTable,
    /// True when column counts differed and both tables were narrowed
    /// to their first and last column
    pub narrowed: bool,
}

impl ComparisonResult {
    /// Number of cells flagged as divergent
    pub fn changed_count(&self) -> usize {
        self.differences.changed_count()
    }
}

/// Load both exports, align their shapes and diff them
pub fn compare_files<P: AsRef<Path>>(
    prod_path: P,
    dev_path: P,
    filter: &RowFilterSet,
) -> Result<ComparisonResult> {
    let prod = load_and_clean(prod_path, filter)?;
    let dev = load_and_clean(dev_path, filter)?;

    let narrowed = prod.column_count() != dev.column_count();
    let (prod, dev) = reconcile(prod, dev);
    let differences = diff_tables(&prod, &dev)?;

    info!(
        rows = differences.row_count(),
        changed = differences.changed_count(),
        narrowed,
        "comparison complete"
    );

    Ok(ComparisonResult {
        production: prod,
        development: dev,
        differences,
        narrowed,
    })
}

/// Run a full comparison and write the output workbook
pub fn compare_and_write<P: AsRef<Path>, D: AsRef<Path>>(
    prod_path: P,
    dev_path: P,
    filter: &RowFilterSet,
    destination: D,
) -> Result<ComparisonResult> {
    let result = compare_files(prod_path, dev_path, filter)?;
    write_report(
        &result.production,
        &result.development,
        &result.differences,
        destination,
    )?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_compare_files_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let prod_path = dir.path().join("prod.csv");
        let dev_path = dir.path().join("dev.csv");
        fs::write(&prod_path, "Revenue,100,200\nVisits,10,20\n").unwrap();
        fs::write(&dev_path, "Revenue,100,300\nVisits,10,20\n").unwrap();

        let result =
            compare_files(&prod_path, &dev_path, &RowFilterSet::empty()).unwrap();

        assert!(!result.narrowed);
        assert_eq!(result.changed_count(), 1);
        assert!(result.differences.rows[0].cells[1].differs);
    }

    #[test]
    fn test_compare_files_records_narrowing() {
        let dir = tempfile::tempdir().unwrap();
        let prod_path = dir.path().join("prod.csv");
        let dev_path = dir.path().join("dev.csv");
        fs::write(&prod_path, "Revenue,1,2,3\n").unwrap();
        fs::write(&dev_path, "Revenue,1,3\n").unwrap();

        let result =
            compare_files(&prod_path, &dev_path, &RowFilterSet::empty()).unwrap();

        assert!(result.narrowed);
        assert_eq!(result.production.column_count(), 2);
        assert_eq!(result.development.column_count(), 2);
        assert_eq!(result.changed_count(), 0);
    }
}
