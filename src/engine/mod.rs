//! Yield Engine - validation and per-row yield computation.
//!
//! The only part of the pipeline with real contracts. Validation rules fire
//! in a fixed order and short-circuit: nulls first, then numeric-ness, then
//! sign constraints. Nothing is appended to the table unless every rule
//! passes.

use crate::error::{YieldError, YieldResult};
use crate::types::{CellValue, Column, Summary, Table, YIELD_COLUMN};

/// Outcome of a successful computation: the per-row yields that were
/// appended, and their descriptive statistics.
#[derive(Debug, Clone)]
pub struct YieldReport {
    pub yields: Vec<f64>,
    pub summary: Summary,
}

/// Validate the two selected columns, then compute `actual / theoretical *
/// 100` per row, append the result as `Rendimiento (%)` and summarize it.
///
/// The two selections may name the same column; every yield is then exactly
/// 100%. Pure over its inputs apart from the single column append.
pub fn compute_yield(
    table: &mut Table,
    actual_col: &str,
    theoretical_col: &str,
) -> YieldResult<YieldReport> {
    let actual = selected(table, actual_col)?;
    let theoretical = selected(table, theoretical_col)?;

    check_nulls(actual_col, actual, theoretical_col, theoretical)?;
    let actual_values = check_numeric(actual_col, "actual", actual)?;
    let theoretical_values = check_numeric(theoretical_col, "theoretical", theoretical)?;
    check_ranges(&actual_values, &theoretical_values)?;

    let yields: Vec<f64> = actual_values
        .iter()
        .zip(&theoretical_values)
        .map(|(a, t)| a / t * 100.0)
        .collect();

    let summary = describe(&yields);
    table.upsert_column(Column::numeric(YIELD_COLUMN, yields.clone()));

    Ok(YieldReport { yields, summary })
}

fn selected<'a>(table: &'a Table, name: &str) -> YieldResult<&'a Column> {
    table
        .column(name)
        .ok_or_else(|| YieldError::UnknownColumn(name.to_string()))
}

/// A cell counts as missing when it is empty or carries a NaN number, the
/// way spreadsheet readers surface `nan` markers.
fn is_null(cell: &CellValue) -> bool {
    match cell {
        CellValue::Empty => true,
        CellValue::Number(n) => n.is_nan(),
        _ => false,
    }
}

/// Rule 1: no nulls in either selection. The message enumerates every
/// affected selection so the user can fix both at once.
fn check_nulls(
    actual_name: &str,
    actual: &Column,
    theoretical_name: &str,
    theoretical: &Column,
) -> YieldResult<()> {
    let mut affected = Vec::new();
    if actual.values.iter().any(is_null) {
        affected.push(format!("'{actual_name}' (actual)"));
    }
    if theoretical.values.iter().any(is_null) {
        affected.push(format!("'{theoretical_name}' (theoretical)"));
    }
    if affected.is_empty() {
        Ok(())
    } else {
        Err(YieldError::NullValue(affected.join(", ")))
    }
}

/// Rule 2: every cell must be numeric. A text or boolean selection used to
/// surface as a generic runtime failure; it is now a distinct error.
fn check_numeric(name: &str, role: &str, column: &Column) -> YieldResult<Vec<f64>> {
    column
        .values
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            cell.as_number().ok_or_else(|| {
                YieldError::NonNumeric(format!(
                    "column '{name}' ({role}) has a non-numeric value at row {}",
                    row + 1
                ))
            })
        })
        .collect()
}

/// Rule 3: actual >= 0 and theoretical > 0 in every row.
fn check_ranges(actual: &[f64], theoretical: &[f64]) -> YieldResult<()> {
    let bad = actual.iter().any(|a| *a < 0.0) || theoretical.iter().any(|t| *t <= 0.0);
    if bad {
        Err(YieldError::InvalidRange(
            "negative actual values or non-positive theoretical values in the selected columns"
                .to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Descriptive statistics with pandas `describe()` conventions: sample
/// standard deviation (N-1, NaN below two observations) and
/// linear-interpolation quantiles.
pub fn describe(values: &[f64]) -> Summary {
    let count = values.len();
    let mean = if count == 0 {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / count as f64
    };

    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Summary {
        count,
        mean,
        std,
        min: sorted.first().copied().unwrap_or(f64::NAN),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.50),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// Linear-interpolation quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
        }
    }
}
