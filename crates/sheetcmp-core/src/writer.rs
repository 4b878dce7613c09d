//! Output workbook writer
//!
//! Serializes a comparison into one workbook with three sheets:
//! the cleaned production table, the cleaned development table, and the
//! differences view where every divergent cell gets a solid yellow fill.

use crate::diff::DiffTable;
use crate::error::{Error, Result};
use crate::table::{CellValue, Table};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::Path;
use tracing::info;

/// Sheet name for the cleaned production table
pub const SHEET_PRODUCTION: &str = "Production";
/// Sheet name for the cleaned development table
pub const SHEET_DEVELOPMENT: &str = "Development";
/// Sheet name for the highlighted differences view
pub const SHEET_DIFFERENCES: &str = "Differences";

/// Fill color for cells whose value diverges
const HIGHLIGHT_COLOR: Color = Color::RGB(0xFFFF00);

/// Write the three-sheet comparison workbook to `destination`
///
/// Missing parent directories are created. An existing file at
/// `destination` is overwritten without warning.
pub fn write_report<P: AsRef<Path>>(
    prod: &Table,
    dev: &Table,
    diff: &DiffTable,
    destination: P,
) -> Result<()> {
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut workbook = build_workbook(prod, dev, diff).map_err(|e| Error::WorkbookWrite {
        path: destination.to_path_buf(),
        source: e,
    })?;
    workbook
        .save(destination)
        .map_err(|e| Error::WorkbookWrite {
            path: destination.to_path_buf(),
            source: e,
        })?;

    info!(destination = %destination.display(), "wrote comparison workbook");
    Ok(())
}

fn build_workbook(
    prod: &Table,
    dev: &Table,
    diff: &DiffTable,
) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_PRODUCTION)?;
    write_table(sheet, prod)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_DEVELOPMENT)?;
    write_table(sheet, dev)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_DIFFERENCES)?;
    write_differences(sheet, diff)?;

    Ok(workbook)
}

/// Write a table verbatim: labels in column A, data from column B
fn write_table(sheet: &mut Worksheet, table: &Table) -> std::result::Result<(), XlsxError> {
    for (r, row) in table.rows.iter().enumerate() {
        let r = r as u32;
        sheet.write_string(r, 0, row.label.as_str())?;
        for (c, cell) in row.cells.iter().enumerate() {
            write_cell(sheet, r, (c + 1) as u16, cell)?;
        }
    }
    Ok(())
}

/// Write the differences view, filling flagged cells
fn write_differences(sheet: &mut Worksheet, diff: &DiffTable) -> std::result::Result<(), XlsxError> {
    let highlight = Format::new()
        .set_background_color(HIGHLIGHT_COLOR)
        .set_pattern(FormatPattern::Solid);

    for (r, row) in diff.rows.iter().enumerate() {
        let r = r as u32;
        sheet.write_string(r, 0, row.label.as_str())?;
        for (c, cell) in row.cells.iter().enumerate() {
            let col = (c + 1) as u16;
            if cell.differs {
                write_cell_with_format(sheet, r, col, &cell.value, &highlight)?;
            } else {
                write_cell(sheet, r, col, &cell.value)?;
            }
        }
    }
    Ok(())
}

fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Integer(i) => sheet.write_number(row, col, *i as f64)?,
        CellValue::Float(f) => sheet.write_number(row, col, *f)?,
        CellValue::Text(s) => sheet.write_string(row, col, s.as_str())?,
        CellValue::Boolean(b) => sheet.write_boolean(row, col, *b)?,
        CellValue::Empty => return Ok(()),
    };
    Ok(())
}

fn write_cell_with_format(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Integer(i) => sheet.write_number_with_format(row, col, *i as f64, format)?,
        CellValue::Float(f) => sheet.write_number_with_format(row, col, *f, format)?,
        CellValue::Text(s) => sheet.write_string_with_format(row, col, s.as_str(), format)?,
        CellValue::Boolean(b) => sheet.write_boolean_with_format(row, col, *b, format)?,
        // A flagged empty cell still needs the fill to be visible
        CellValue::Empty => sheet.write_blank(row, col, format)?,
    };
    Ok(())
}
