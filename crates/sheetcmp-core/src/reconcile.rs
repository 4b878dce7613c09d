//! Shape reconciliation for tables with drifted column counts
//!
//! When the two exports carry a different number of columns the schemas
//! have drifted and positional comparison is meaningless. Each table is
//! then narrowed to its first and last data column, which are assumed to
//! hold the two comparable snapshot values. Columns are picked purely by
//! position; there is no guarantee the sampled columns correspond
//! semantically between the two tables.

use crate::table::Table;
use tracing::debug;

/// Align the shapes of two tables before diffing
///
/// Equal column counts pass through untouched. Unequal counts narrow
/// both tables to two columns each (see [`narrow_to_ends`]). Applying
/// this twice yields the same result as applying it once.
pub fn reconcile(prod: Table, dev: Table) -> (Table, Table) {
    if prod.column_count() == dev.column_count() {
        return (prod, dev);
    }

    debug!(
        prod_columns = prod.column_count(),
        dev_columns = dev.column_count(),
        "column counts differ, narrowing both tables to first and last column"
    );

    (narrow_to_ends(prod), narrow_to_ends(dev))
}

/// Keep only the first and last data column of a table
///
/// A one-column table yields that column in both positions, so the
/// result always has exactly two columns.
pub fn narrow_to_ends(table: Table) -> Table {
    if table.column_count() == 0 {
        return table;
    }
    let last = table.column_count() - 1;

    let rows = table
        .rows
        .into_iter()
        .map(|mut row| {
            row.cells = vec![row.cells[0].clone(), row.cells[last].clone()];
            row
        })
        .collect();

    Table {
        rows,
        column_count: 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::RowFilterSet;
    use crate::loader::load_and_clean_csv_str;

    fn table(csv: &str) -> Table {
        load_and_clean_csv_str(csv, "test.csv", &RowFilterSet::empty()).unwrap()
    }

    #[test]
    fn test_equal_shapes_untouched() {
        let prod = table("Revenue,1,2\n");
        let dev = table("Revenue,3,4\n");

        let (prod, dev) = reconcile(prod, dev);
        assert_eq!(prod.column_count(), 2);
        assert_eq!(dev.column_count(), 2);
        assert_eq!(prod.rows[0].cells[1], crate::CellValue::Integer(2));
    }

    #[test]
    fn test_mismatch_narrows_to_first_and_last() {
        let prod = table("Revenue,1,2,3\n");
        let dev = table("Revenue,7,8\n");

        let (prod, dev) = reconcile(prod, dev);
        assert_eq!(prod.column_count(), 2);
        assert_eq!(dev.column_count(), 2);

        // Production keeps columns 0 and 2, development keeps 0 and 1
        assert_eq!(prod.rows[0].cells[0], crate::CellValue::Integer(1));
        assert_eq!(prod.rows[0].cells[1], crate::CellValue::Integer(3));
        assert_eq!(dev.rows[0].cells[0], crate::CellValue::Integer(7));
        assert_eq!(dev.rows[0].cells[1], crate::CellValue::Integer(8));
    }

    #[test]
    fn test_one_column_table_duplicates_its_column() {
        let prod = table("Revenue,1,2,3\n");
        let dev = table("Revenue,9\n");

        let (prod, dev) = reconcile(prod, dev);
        assert_eq!(prod.column_count(), 2);
        assert_eq!(dev.column_count(), 2);
        assert_eq!(dev.rows[0].cells[0], crate::CellValue::Integer(9));
        assert_eq!(dev.rows[0].cells[1], crate::CellValue::Integer(9));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let prod = table("Revenue,1,2,3\nVisits,4,5,6\n");
        let dev = table("Revenue,7,8\nVisits,9,10\n");

        let (prod_once, dev_once) = reconcile(prod, dev);
        let (prod_twice, dev_twice) = reconcile(prod_once.clone(), dev_once.clone());

        assert_eq!(prod_once.column_count(), prod_twice.column_count());
        assert_eq!(dev_once.column_count(), dev_twice.column_count());
        for (a, b) in prod_once.rows.iter().zip(prod_twice.rows.iter()) {
            assert_eq!(a.cells, b.cells);
        }
        for (a, b) in dev_once.rows.iter().zip(dev_twice.rows.iter()) {
            assert_eq!(a.cells, b.cells);
        }
    }
}
