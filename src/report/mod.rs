//! Reporting - bar chart rendering and workbook serialization.

pub mod chart;
pub mod workbook;

pub use chart::{render_chart_png, render_chart_svg};
pub use workbook::{build_workbook, save_workbook};
