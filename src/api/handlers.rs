//! API request handlers
//!
//! Every interaction re-runs the pipeline against whatever table is loaded
//! in the session slot. Engine failures come back as messages in the JSON
//! envelope; nothing here is fatal to the process.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine;
use crate::ingest;
use crate::report;
use crate::types::{Summary, DOWNLOAD_FILENAME, XLSX_MIME};

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

fn endpoint(path: &str, method: &str, description: &str) -> EndpointInfo {
    EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Synthyield API Server".to_string(),
        version: state.version.clone(),
        description: "HTTP API for chemical synthesis yield analysis".to_string(),
        endpoints: vec![
            endpoint("/health", "GET", "Health check endpoint"),
            endpoint("/version", "GET", "Get server version"),
            endpoint("/api/v1/load", "POST", "Load a CSV/XLSX file into the session"),
            endpoint("/api/v1/columns", "GET", "Columns of the loaded table"),
            endpoint("/api/v1/calculate", "POST", "Compute yields and statistics"),
            endpoint("/api/v1/chart", "POST", "Render the yield bar chart as SVG"),
            endpoint("/api/v1/export", "POST", "Download the Datos/Resumen workbook"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub table_loaded: bool,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let table_loaded = state.session.read().await.loaded().is_some();
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        table_loaded,
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "load".to_string(),
            "columns".to_string(),
            "calculate".to_string(),
            "chart".to_string(),
            "export".to_string(),
        ],
    }))
}

/// Load request
#[derive(Deserialize)]
pub struct LoadRequest {
    pub file_path: String,
}

/// Load response
#[derive(Serialize, Default)]
pub struct LoadResponse {
    pub file_path: String,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub preview: Vec<Vec<String>>,
}

/// POST /api/v1/load - Ingest a file and replace the session table
pub async fn load(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoadRequest>,
) -> impl IntoResponse {
    let path = PathBuf::from(&req.file_path);

    match ingest::load_table(&path) {
        Ok(table) => {
            let response = LoadResponse {
                file_path: req.file_path.clone(),
                columns: table.column_names(),
                row_count: table.row_count(),
                preview: table.head(5),
            };
            state.session.write().await.load(req.file_path, table);
            Json(ApiResponse::ok(response))
        }
        Err(e) => Json(ApiResponse::<LoadResponse>::err(e.to_string())),
    }
}

/// Columns response
#[derive(Serialize, Default)]
pub struct ColumnsResponse {
    pub source: String,
    pub columns: Vec<String>,
    pub row_count: usize,
}

/// GET /api/v1/columns - Columns of the currently loaded table
pub async fn columns(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.read().await;
    match session.loaded() {
        Some(loaded) => Json(ApiResponse::ok(ColumnsResponse {
            source: loaded.source.clone(),
            columns: loaded.table.column_names(),
            row_count: loaded.table.row_count(),
        })),
        None => Json(ApiResponse::<ColumnsResponse>::err(
            "no table loaded; POST /api/v1/load first",
        )),
    }
}

/// Column selection shared by calculate, chart and export requests
#[derive(Deserialize)]
pub struct SelectionRequest {
    pub actual: String,
    pub theoretical: String,
}

/// Calculate response
#[derive(Serialize)]
pub struct CalculateResponse {
    pub summary: Summary,
    pub yields: Vec<f64>,
    pub mean_band_upper: f64,
    pub mean_band_lower: f64,
}

/// POST /api/v1/calculate - Validate the selection and compute yields
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> impl IntoResponse {
    let mut session = state.session.write().await;
    let Some(loaded) = session.loaded_mut() else {
        return Json(ApiResponse::<CalculateResponse>::err(
            "no table loaded; POST /api/v1/load first",
        ));
    };

    match engine::compute_yield(&mut loaded.table, &req.actual, &req.theoretical) {
        Ok(report) => {
            let mean = report.summary.mean;
            Json(ApiResponse::ok(CalculateResponse {
                mean_band_upper: mean * 1.05,
                mean_band_lower: mean * 0.95,
                yields: report.yields,
                summary: report.summary,
            }))
        }
        Err(e) => Json(ApiResponse::<CalculateResponse>::err(e.to_string())),
    }
}

/// Chart response
#[derive(Serialize, Default)]
pub struct ChartResponse {
    pub svg: String,
}

/// POST /api/v1/chart - Re-run the pipeline and render the chart inline
pub async fn chart(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> impl IntoResponse {
    let session = state.session.read().await;
    let Some(loaded) = session.loaded() else {
        return Json(ApiResponse::<ChartResponse>::err(
            "no table loaded; POST /api/v1/load first",
        ));
    };

    // Work on a copy: rendering must not commit the derived column.
    let mut table = loaded.table.clone();
    let result = engine::compute_yield(&mut table, &req.actual, &req.theoretical)
        .and_then(|report| report::render_chart_svg(&report.yields, &report.summary));

    match result {
        Ok(svg) => Json(ApiResponse::ok(ChartResponse { svg })),
        Err(e) => Json(ApiResponse::<ChartResponse>::err(e.to_string())),
    }
}

/// POST /api/v1/export - Build the workbook in memory and stream it back as
/// an attachment named `resultados_rendimiento.xlsx`.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectionRequest>,
) -> Response {
    let session = state.session.read().await;
    let Some(loaded) = session.loaded() else {
        return error_response("no table loaded; POST /api/v1/load first");
    };

    let mut table = loaded.table.clone();
    let result = engine::compute_yield(&mut table, &req.actual, &req.theoretical)
        .and_then(|report| report::build_workbook(&table, &report.summary));

    match result {
        Ok(buffer) => (
            [
                (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
                ),
            ],
            buffer,
        )
            .into_response(),
        Err(e) => error_response(e.to_string()),
    }
}

fn error_response(message: impl Into<String>) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse::<()>::err(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_ok() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.success);
        assert_eq!(response.data, Some("test".to_string()));
        assert!(response.error.is_none());
        // UUID format: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
        assert_eq!(response.request_id.len(), 36);
    }

    #[test]
    fn test_api_response_err() {
        let response: ApiResponse<String> = ApiResponse::err("error message");
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("error message".to_string()));
    }

    #[test]
    fn test_api_response_unique_ids() {
        let r1: ApiResponse<i32> = ApiResponse::ok(1);
        let r2: ApiResponse<i32> = ApiResponse::ok(2);
        assert_ne!(r1.request_id, r2.request_id);
    }

    #[test]
    fn test_endpoint_info() {
        let info = endpoint("/health", "GET", "Health check");
        assert_eq!(info.path, "/health");
        assert_eq!(info.method, "GET");
    }
}
