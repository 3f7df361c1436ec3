use serde::Serialize;

/// Name of the derived column appended after a successful computation.
///
/// The label is fixed for compatibility with workbooks produced by earlier
/// versions of the tool.
pub const YIELD_COLUMN: &str = "Rendimiento (%)";

/// Sheet holding the full augmented table.
pub const DATA_SHEET: &str = "Datos";

/// Sheet holding the descriptive statistics.
pub const SUMMARY_SHEET: &str = "Resumen";

/// Suggested filename for the downloadable workbook.
pub const DOWNLOAD_FILENAME: &str = "resultados_rendimiento.xlsx";

/// MIME type of the downloadable workbook.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Format a number for display, removing unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "NaN".to_string();
    }
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// A single cell. `Empty` is the null of the system: CSV empty fields and
/// blank Excel cells both map to it.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Display form used for previews and workbook text cells.
    pub fn display(&self) -> String {
        match self {
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

/// A named column of row-aligned cells.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Convenience constructor for an all-numeric column.
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(
            name,
            values.into_iter().map(CellValue::Number).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered sequence of row-aligned columns, loaded fresh from one upload.
///
/// Column order follows the source file. The table is mutated exactly once
/// per successful computation, by appending the derived yield column.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Replace an existing column of the same name or append a new one.
    /// Recomputing on the same table must not stack derived columns.
    pub fn upsert_column(&mut self, column: Column) {
        if let Some(existing) = self.columns.iter_mut().find(|c| c.name == column.name) {
            *existing = column;
        } else {
            self.columns.push(column);
        }
    }

    /// First `n` rows in display form, for the preview panel.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        let rows = self.row_count().min(n);
        (0..rows)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.values[row].display())
                    .collect()
            })
            .collect()
    }
}

/// Descriptive statistics over the derived yield column.
///
/// Follows the conventions of pandas `describe()`: sample standard deviation
/// (N-1 denominator, NaN when count < 2) and linear-interpolation quantiles.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    /// Rows in `describe()` order, as (label, value) pairs.
    pub fn rows(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}
