//! Yield Engine integration tests: validation order, computation contracts
//! and statistics conventions.

use pretty_assertions::assert_eq;
use synthyield::engine::{compute_yield, describe};
use synthyield::types::{CellValue, Column, Table, YIELD_COLUMN};
use synthyield::YieldError;

fn numeric_table(actual: &[f64], theoretical: &[f64]) -> Table {
    let mut table = Table::new();
    table.add_column(Column::numeric("real_g", actual.to_vec()));
    table.add_column(Column::numeric("teorico_g", theoretical.to_vec()));
    table
}

// ═══════════════════════════════════════════════════════════════════════════
// COMPUTATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_yields_match_formula_exactly() {
    let actual = [12.5, 80.0, 3.75, 0.0];
    let theoretical = [25.0, 100.0, 5.0, 7.0];
    let mut table = numeric_table(&actual, &theoretical);

    let report = compute_yield(&mut table, "real_g", "teorico_g").unwrap();

    for (i, y) in report.yields.iter().enumerate() {
        let expected = actual[i] / theoretical[i] * 100.0;
        assert!((y - expected).abs() < 1e-12, "row {i}: {y} vs {expected}");
    }
    assert_eq!(
        table.column(YIELD_COLUMN).unwrap().len(),
        table.row_count()
    );
}

#[test]
fn test_equal_columns_give_uniform_100() {
    let values = [7.0, 42.0, 0.001];
    let mut table = numeric_table(&values, &values);
    let report = compute_yield(&mut table, "real_g", "teorico_g").unwrap();
    assert!(report.yields.iter().all(|y| (*y - 100.0).abs() < 1e-12));
}

#[test]
fn test_same_column_selected_twice_is_allowed() {
    let mut table = numeric_table(&[3.0, 9.0], &[6.0, 18.0]);
    let report = compute_yield(&mut table, "teorico_g", "teorico_g").unwrap();
    assert_eq!(report.yields, vec![100.0, 100.0]);
}

#[test]
fn test_reference_bands_at_five_percent_of_mean() {
    let mut table = numeric_table(&[50.0, 100.0], &[100.0, 100.0]);
    let report = compute_yield(&mut table, "real_g", "teorico_g").unwrap();

    assert_eq!(report.yields, vec![50.0, 100.0]);
    assert_eq!(report.summary.mean, 75.0);
    assert_eq!(report.summary.mean * 1.05, 78.75);
    assert_eq!(report.summary.mean * 0.95, 71.25);
}

// ═══════════════════════════════════════════════════════════════════════════
// VALIDATION ORDER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_null_wins_over_range_violation() {
    let mut table = Table::new();
    table.add_column(Column::new(
        "real_g",
        vec![CellValue::Empty, CellValue::Number(-1.0)],
    ));
    table.add_column(Column::numeric("teorico_g", vec![0.0, 100.0]));

    let err = compute_yield(&mut table, "real_g", "teorico_g").unwrap_err();
    assert!(matches!(err, YieldError::NullValue(_)), "got {err:?}");
}

#[test]
fn test_nan_theoretical_is_null_error_not_nan_yield() {
    // NaN compares false against every range bound, so without the null
    // rule catching it the computation would return NaN yields.
    let mut table = Table::new();
    table.add_column(Column::numeric("real_g", vec![50.0]));
    table.add_column(Column::new(
        "teorico_g",
        vec![CellValue::Number(f64::NAN)],
    ));

    let err = compute_yield(&mut table, "real_g", "teorico_g").unwrap_err();
    assert!(matches!(err, YieldError::NullValue(_)), "got {err:?}");
    assert!(table.column(YIELD_COLUMN).is_none());
}

#[test]
fn test_null_error_names_affected_column() {
    let mut table = Table::new();
    table.add_column(Column::new(
        "real_g",
        vec![CellValue::Number(1.0), CellValue::Empty],
    ));
    table.add_column(Column::numeric("teorico_g", vec![2.0, 2.0]));

    let err = compute_yield(&mut table, "real_g", "teorico_g").unwrap_err();
    assert!(err.to_string().contains("real_g"));
    assert!(!err.to_string().contains("teorico_g"));
}

#[test]
fn test_zero_theoretical_is_invalid_range_and_no_column_added() {
    let mut table = numeric_table(&[10.0], &[0.0]);
    let err = compute_yield(&mut table, "real_g", "teorico_g").unwrap_err();
    assert!(matches!(err, YieldError::InvalidRange(_)));
    assert!(table.column(YIELD_COLUMN).is_none());
}

#[test]
fn test_negative_actual_is_invalid_range() {
    let mut table = numeric_table(&[-0.5, 1.0], &[2.0, 2.0]);
    assert!(matches!(
        compute_yield(&mut table, "real_g", "teorico_g"),
        Err(YieldError::InvalidRange(_))
    ));
}

#[test]
fn test_text_column_is_non_numeric_error() {
    let mut table = Table::new();
    table.add_column(Column::new(
        "lote",
        vec![
            CellValue::Text("A-1".to_string()),
            CellValue::Text("A-2".to_string()),
        ],
    ));
    table.add_column(Column::numeric("teorico_g", vec![1.0, 1.0]));

    let err = compute_yield(&mut table, "lote", "teorico_g").unwrap_err();
    assert!(matches!(err, YieldError::NonNumeric(_)), "got {err:?}");
}

#[test]
fn test_missing_column_is_unknown_column() {
    let mut table = numeric_table(&[1.0], &[1.0]);
    assert!(matches!(
        compute_yield(&mut table, "no_such_column", "teorico_g"),
        Err(YieldError::UnknownColumn(_))
    ));
}

// ═══════════════════════════════════════════════════════════════════════════
// STATISTICS CONVENTIONS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_sample_standard_deviation() {
    // pandas: Series([2, 4, 4, 4, 5, 5, 7, 9]).std() == 2.138089935299395
    let s = describe(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert!((s.std - 2.138089935299395).abs() < 1e-12);
    assert_eq!(s.mean, 5.0);
}

#[test]
fn test_quantiles_match_pandas_linear_interpolation() {
    // pandas: Series([10, 20, 30, 40, 50]).describe()
    let s = describe(&[10.0, 20.0, 30.0, 40.0, 50.0]);
    assert_eq!(s.count, 5);
    assert_eq!(s.min, 10.0);
    assert_eq!(s.q25, 20.0);
    assert_eq!(s.median, 30.0);
    assert_eq!(s.q75, 40.0);
    assert_eq!(s.max, 50.0);

    // Interpolated case: [1, 2, 3, 4] → q25 = 1.75, q75 = 3.25
    let s = describe(&[1.0, 2.0, 3.0, 4.0]);
    assert!((s.q25 - 1.75).abs() < 1e-12);
    assert!((s.q75 - 3.25).abs() < 1e-12);
}

#[test]
fn test_summary_over_unsorted_input() {
    let s = describe(&[90.0, 50.0, 70.0]);
    assert_eq!(s.min, 50.0);
    assert_eq!(s.median, 70.0);
    assert_eq!(s.max, 90.0);
}
