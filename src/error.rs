use thiserror::Error;

pub type YieldResult<T> = Result<T, YieldError>;

#[derive(Error, Debug)]
pub enum YieldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Null values in selected columns: {0}")]
    NullValue(String),

    #[error("Non-numeric values in selected columns: {0}")]
    NonNumeric(String),

    #[error("Out-of-range values: {0}")]
    InvalidRange(String),

    #[error("Chart rendering error: {0}")]
    Chart(String),

    #[error("Workbook export error: {0}")]
    Export(String),
}
