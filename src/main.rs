use clap::{Parser, Subcommand};
use std::path::PathBuf;
use synthyield::cli;
use synthyield::error::YieldResult;

#[derive(Parser)]
#[command(name = "synthyield")]
#[command(about = "Chemical synthesis yield analysis from CSV/Excel result tables.")]
#[command(long_about = "Synthyield - Chemical synthesis yield analyzer

Computes per-row yield percentages (actual / theoretical * 100) from a
tabular file of synthesis results, plus descriptive statistics, a bar chart
with mean ±5% reference bands, and a two-sheet results workbook
(Datos / Resumen).

COMMANDS:
  columns  - List the columns and preview the first rows of a file
  analyze  - Validate, compute yields, and write chart/workbook outputs

EXAMPLES:
  synthyield columns sinteses.csv
  synthyield analyze sinteses.csv --actual real_g --theoretical teorico_g
  synthyield analyze sinteses.xlsx -a real_g -t teorico_g \\
      -o resultados_rendimiento.xlsx --chart rendimiento.png")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List column names and preview the first rows of a CSV/XLSX file
    Columns {
        /// Path to the input file (.csv or .xlsx)
        file: PathBuf,
    },

    #[command(long_about = "Run the full yield analysis pipeline on one file.

Validates the two selected columns in order (nulls, numeric-ness, sign
constraints), computes the per-row yield percentage, appends it as the
'Rendimiento (%)' column, and prints descriptive statistics.

VALIDATION RULES:
  1. No null/missing cells in either selected column
  2. Both selections must be numeric
  3. actual >= 0 and theoretical > 0 in every row

OUTPUTS (optional):
  -o <file.xlsx>   Workbook with sheets 'Datos' (augmented table)
                   and 'Resumen' (statistics)
  --chart <file.png>  Bar chart with mean and ±5% reference lines

EXAMPLE:
  synthyield analyze sinteses.csv -a real_g -t teorico_g -o resultados.xlsx")]
    /// Compute per-row yields and statistics for two selected columns
    Analyze {
        /// Path to the input file (.csv or .xlsx)
        file: PathBuf,

        /// Column with the measured (actual) product mass
        #[arg(short, long)]
        actual: String,

        /// Column with the calculated (theoretical) product mass
        #[arg(short, long)]
        theoretical: String,

        /// Output workbook path (.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output chart path (.png)
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Show verbose pipeline steps and per-row yields
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> YieldResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Columns { file } => cli::columns(file),

        Commands::Analyze {
            file,
            actual,
            theoretical,
            output,
            chart,
            verbose,
        } => cli::analyze(file, actual, theoretical, output, chart, verbose),
    }
}
