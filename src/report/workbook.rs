//! Workbook serialization: `Datos` (full augmented table) and `Resumen`
//! (descriptive statistics), built in memory for the download mechanism.

use crate::error::{YieldError, YieldResult};
use crate::types::{CellValue, Summary, Table, DATA_SHEET, SUMMARY_SHEET, YIELD_COLUMN};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Serialize the augmented table and its summary into an in-memory xlsx
/// buffer, ready to hand to a download mechanism.
pub fn build_workbook(table: &Table, summary: &Summary) -> YieldResult<Vec<u8>> {
    let mut workbook = assemble(table, summary)?;
    workbook
        .save_to_buffer()
        .map_err(|e| YieldError::Export(format!("failed to serialize workbook: {e}")))
}

/// Serialize the workbook straight to a file path.
pub fn save_workbook(table: &Table, summary: &Summary, path: &Path) -> YieldResult<()> {
    let mut workbook = assemble(table, summary)?;
    workbook
        .save(path)
        .map_err(|e| YieldError::Export(format!("failed to save workbook: {e}")))
}

fn assemble(table: &Table, summary: &Summary) -> YieldResult<Workbook> {
    let mut workbook = Workbook::new();
    write_data_sheet(&mut workbook, table)?;
    write_summary_sheet(&mut workbook, summary)?;
    Ok(workbook)
}

fn write_data_sheet(workbook: &mut Workbook, table: &Table) -> YieldResult<()> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(DATA_SHEET)
        .map_err(|e| YieldError::Export(format!("failed to set worksheet name: {e}")))?;

    for (col_idx, column) in table.columns.iter().enumerate() {
        let col = col_idx as u16;
        worksheet
            .write_string(0, col, &column.name)
            .map_err(|e| YieldError::Export(format!("failed to write header: {e}")))?;

        for (row_idx, cell) in column.values.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            match cell {
                CellValue::Number(n) => {
                    worksheet
                        .write_number(row, col, *n)
                        .map_err(|e| YieldError::Export(format!("failed to write number: {e}")))?;
                }
                CellValue::Text(s) => {
                    worksheet
                        .write_string(row, col, s)
                        .map_err(|e| YieldError::Export(format!("failed to write text: {e}")))?;
                }
                CellValue::Bool(b) => {
                    worksheet
                        .write_boolean(row, col, *b)
                        .map_err(|e| YieldError::Export(format!("failed to write boolean: {e}")))?;
                }
                CellValue::Empty => {}
            }
        }
    }
    Ok(())
}

/// Statistic labels down column A, values under a `Rendimiento (%)` header
/// in column B. Non-finite statistics (std of a single row) stay blank.
fn write_summary_sheet(workbook: &mut Workbook, summary: &Summary) -> YieldResult<()> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SUMMARY_SHEET)
        .map_err(|e| YieldError::Export(format!("failed to set worksheet name: {e}")))?;

    worksheet
        .write_string(0, 1, YIELD_COLUMN)
        .map_err(|e| YieldError::Export(format!("failed to write header: {e}")))?;

    for (idx, (label, value)) in summary.rows().into_iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet
            .write_string(row, 0, label)
            .map_err(|e| YieldError::Export(format!("failed to write statistic label: {e}")))?;
        if value.is_finite() {
            worksheet
                .write_number(row, 1, value)
                .map_err(|e| YieldError::Export(format!("failed to write statistic: {e}")))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{compute_yield, describe};
    use crate::types::Column;
    use tempfile::TempDir;

    fn augmented_table() -> (Table, Summary) {
        let mut table = Table::new();
        table.add_column(Column::numeric("real", vec![50.0, 90.0]));
        table.add_column(Column::numeric("teorico", vec![100.0, 100.0]));
        let report = compute_yield(&mut table, "real", "teorico").unwrap();
        (table, report.summary)
    }

    #[test]
    fn test_build_workbook_nonempty_buffer() {
        let (table, summary) = augmented_table();
        let buffer = build_workbook(&table, &summary).unwrap();
        // xlsx files are zip archives
        assert!(buffer.len() > 4);
        assert_eq!(&buffer[0..2], b"PK");
    }

    #[test]
    fn test_save_workbook_writes_file() {
        let (table, summary) = augmented_table();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resultados_rendimiento.xlsx");
        save_workbook(&table, &summary, &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_single_row_summary_skips_nan_std() {
        let mut table = Table::new();
        table.add_column(Column::numeric("real", vec![50.0]));
        table.add_column(Column::numeric("teorico", vec![100.0]));
        let report = compute_yield(&mut table, "real", "teorico").unwrap();
        assert!(report.summary.std.is_nan());
        // NaN std must not break serialization
        let buffer = build_workbook(&table, &report.summary).unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_summary_sheet_layout() {
        let summary = describe(&[50.0, 90.0]);
        let rows = summary.rows();
        assert_eq!(rows[0], ("count", 2.0));
        assert_eq!(rows[4].0, "25%");
        assert_eq!(rows[7].0, "max");
    }
}
