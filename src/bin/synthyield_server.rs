//! Synthyield API server binary
//!
//! HTTP REST API wrapping the yield pipeline for an external UI.

use clap::Parser;
use synthyield::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "synthyield-server")]
#[command(version)]
#[command(about = "Synthyield API server - HTTP REST API for chemical synthesis yield analysis")]
#[command(long_about = r#"
Synthyield API server

Holds one session-scoped table and re-runs the pipeline per request:
  - POST /api/v1/load      - Load a CSV/XLSX file into the session slot
  - GET  /api/v1/columns   - Columns of the loaded table
  - POST /api/v1/calculate - Validate, compute yields and statistics
  - POST /api/v1/chart     - Render the yield bar chart as inline SVG
  - POST /api/v1/export    - Download resultados_rendimiento.xlsx

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  synthyield-server                           # Start on localhost:8080
  synthyield-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/load \
    -H "Content-Type: application/json" \
    -d '{"file_path": "sinteses.csv"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SYNTHYIELD_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SYNTHYIELD_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
