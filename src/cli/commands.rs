use crate::engine;
use crate::error::YieldResult;
use crate::ingest;
use crate::report;
use crate::types::{format_number, Table, YIELD_COLUMN};
use colored::Colorize;
use std::path::PathBuf;

const PREVIEW_ROWS: usize = 5;

/// Execute the columns command: list column names and a head preview.
pub fn columns(file: PathBuf) -> YieldResult<()> {
    println!("{}", "📊 Synthyield - Loaded data".bold().green());
    println!("   File: {}\n", file.display());

    let table = ingest::load_table(&file)?;

    println!("{}", "📋 Columns:".bold().cyan());
    for name in table.column_names() {
        println!("   {}", name.bright_blue());
    }
    println!("\n   {} rows", table.row_count());

    print_preview(&table);
    Ok(())
}

/// Execute the analyze command: ingest, validate, compute, report.
pub fn analyze(
    file: PathBuf,
    actual: String,
    theoretical: String,
    output: Option<PathBuf>,
    chart: Option<PathBuf>,
    verbose: bool,
) -> YieldResult<()> {
    println!("{}", "📊 Synthyield - Calculating yields".bold().green());
    println!("   File: {}", file.display());
    println!(
        "   Actual: {}  Theoretical: {}\n",
        actual.bright_blue().bold(),
        theoretical.bright_blue().bold()
    );

    if verbose {
        println!("{}", "📖 Parsing input file...".cyan());
    }
    let mut table = ingest::load_table(&file)?;
    if verbose {
        println!(
            "   Found {} columns, {} rows\n",
            table.columns.len(),
            table.row_count()
        );
    }

    let report = engine::compute_yield(&mut table, &actual, &theoretical)?;

    println!("{}", "📈 Yield statistics:".bold().cyan());
    for (label, value) in report.summary.rows() {
        if value.is_finite() {
            println!(
                "   {:<6} {}",
                label.bright_blue(),
                format_number(value).bold()
            );
        } else {
            println!("   {:<6} {}", label.bright_blue(), "n/a".dimmed());
        }
    }
    println!();

    if verbose {
        println!("{}", "🧮 Per-row yields:".cyan());
        for (idx, y) in report.yields.iter().enumerate() {
            println!("   fila {:>3}: {:.1} %", idx + 1, y);
        }
        println!();
    }

    if let Some(chart_path) = chart {
        report::render_chart_png(
            &report.yields,
            &report.summary,
            &chart_path,
            report::chart::DEFAULT_SIZE,
        )?;
        println!(
            "{} {}",
            "🖼️  Chart written to".green(),
            chart_path.display()
        );
    }

    if let Some(output_path) = output {
        report::save_workbook(&table, &report.summary, &output_path)?;
        println!(
            "{} {}",
            "📥 Workbook written to".green(),
            output_path.display()
        );
    } else {
        // No output requested; still confirm the derived column exists.
        debug_assert!(table.column(YIELD_COLUMN).is_some());
        println!(
            "{}",
            "💡 Pass -o <file.xlsx> to save the Datos/Resumen workbook".yellow()
        );
    }

    Ok(())
}

fn print_preview(table: &Table) {
    let head = table.head(PREVIEW_ROWS);
    if head.is_empty() {
        return;
    }
    println!("\n{}", "👀 Preview:".bold().cyan());
    println!("   {}", table.column_names().join(" | ").bright_blue());
    for row in head {
        println!("   {}", row.join(" | "));
    }
}
