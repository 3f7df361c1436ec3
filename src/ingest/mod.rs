//! Tabular ingestion - CSV and Excel (.xlsx) files into a [`Table`].
//!
//! The upstream file picker only offers the two supported extensions, but the
//! loader re-checks and rejects anything else with a parse error rather than
//! guessing at the content.

use crate::error::{YieldError, YieldResult};
use crate::types::{CellValue, Column, Table};
use calamine::{open_workbook, open_workbook_from_rs, Data, Range, Reader, Xlsx};
use std::io::Cursor;
use std::path::Path;

/// Load a table from a file path, dispatching on the extension.
pub fn load_table(path: &Path) -> YieldResult<Table> {
    match extension_of(path)? {
        FileKind::Csv => read_csv(std::fs::File::open(path)?),
        FileKind::Xlsx => {
            let mut workbook: Xlsx<_> = open_workbook(path)
                .map_err(|e| YieldError::Parse(format!("failed to open Excel file: {e}")))?;
            read_xlsx(&mut workbook)
        }
    }
}

/// Load a table from in-memory bytes, dispatching on the original filename's
/// extension. This is the path an upload mechanism hands us.
pub fn load_table_from_bytes(file_name: &str, bytes: &[u8]) -> YieldResult<Table> {
    match extension_of(Path::new(file_name))? {
        FileKind::Csv => read_csv(Cursor::new(bytes)),
        FileKind::Xlsx => {
            let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
                .map_err(|e| YieldError::Parse(format!("failed to open Excel file: {e}")))?;
            read_xlsx(&mut workbook)
        }
    }
}

enum FileKind {
    Csv,
    Xlsx,
}

fn extension_of(path: &Path) -> YieldResult<FileKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok(FileKind::Csv),
        Some("xlsx") => Ok(FileKind::Xlsx),
        other => Err(YieldError::Parse(format!(
            "unsupported file extension {:?} for '{}' (expected .csv or .xlsx)",
            other.unwrap_or(""),
            path.display()
        ))),
    }
}

/// Parse delimited text. The first record is the header row; fields that
/// parse as f64 become numbers, empty fields become nulls, everything else
/// stays text.
fn read_csv<R: std::io::Read>(reader: R) -> YieldResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (idx, field) in record.iter().enumerate() {
            columns[idx].push(parse_csv_field(field));
        }
    }

    let mut table = Table::new();
    for (name, values) in headers.into_iter().zip(columns) {
        table.add_column(Column::new(name, values));
    }
    Ok(table)
}

fn parse_csv_field(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        // NaN markers in numeric columns are missing values, not numbers.
        return if n.is_nan() {
            CellValue::Empty
        } else {
            CellValue::Number(n)
        };
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "true" => CellValue::Bool(true),
        "false" => CellValue::Bool(false),
        _ => CellValue::Text(trimmed.to_string()),
    }
}

/// Parse the first worksheet of an xlsx workbook, mirroring the default of
/// most spreadsheet readers.
fn read_xlsx<RS: std::io::Read + std::io::Seek>(workbook: &mut Xlsx<RS>) -> YieldResult<Table> {
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| YieldError::Parse("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| YieldError::Parse(format!("failed to read sheet '{sheet_name}': {e}")))?;

    read_sheet_range(&range)
}

fn read_sheet_range(range: &Range<Data>) -> YieldResult<Table> {
    let (height, width) = range.get_size();
    if height == 0 || width == 0 {
        return Ok(Table::new());
    }

    // Header row
    let mut names: Vec<String> = Vec::with_capacity(width);
    for col in 0..width {
        let name = match range.get((0, col)) {
            Some(Data::String(s)) => s.clone(),
            Some(Data::Int(i)) => i.to_string(),
            Some(Data::Float(f)) => f.to_string(),
            _ => format!("col_{}", col),
        };
        names.push(name);
    }

    let mut table = Table::new();
    for (col, name) in names.into_iter().enumerate() {
        let mut values = Vec::with_capacity(height.saturating_sub(1));
        for row in 1..height {
            values.push(convert_cell(range.get((row, col))));
        }
        table.add_column(Column::new(name, values));
    }
    Ok(table)
}

fn convert_cell(cell: Option<&Data>) -> CellValue {
    match cell {
        Some(Data::Float(f)) => CellValue::Number(*f),
        Some(Data::Int(i)) => CellValue::Number(*i as f64),
        Some(Data::Bool(b)) => CellValue::Bool(*b),
        Some(Data::String(s)) if s.trim().is_empty() => CellValue::Empty,
        Some(Data::String(s)) => CellValue::Text(s.clone()),
        Some(Data::DateTime(dt)) => CellValue::Number(dt.as_f64()),
        Some(Data::Error(e)) => CellValue::Text(format!("{e:?}")),
        Some(Data::Empty) | None => CellValue::Empty,
        Some(other) => CellValue::Text(other.to_string()),
    }
}
