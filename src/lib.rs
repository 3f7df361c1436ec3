//! Synthyield - chemical synthesis yield analysis
//!
//! Loads a tabular file of synthesis results (.csv or .xlsx), validates two
//! user-selected columns (actual vs. theoretical product mass), computes a
//! per-row yield percentage, descriptive statistics, a bar chart with mean
//! ±5% reference bands, and a two-sheet results workbook (Datos/Resumen).
//!
//! # Example
//!
//! ```no_run
//! use synthyield::engine::compute_yield;
//! use synthyield::ingest::load_table;
//! use synthyield::report::build_workbook;
//! use std::path::Path;
//!
//! let mut table = load_table(Path::new("sinteses.csv"))?;
//! let report = compute_yield(&mut table, "real_g", "teorico_g")?;
//!
//! println!("mean yield: {:.2}%", report.summary.mean);
//!
//! let workbook = build_workbook(&table, &report.summary)?;
//! # let _ = workbook;
//! # Ok::<(), synthyield::error::YieldError>(())
//! ```

pub mod api;
pub mod cli;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod report;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{YieldError, YieldResult};
pub use types::{CellValue, Column, Summary, Table, YIELD_COLUMN};
