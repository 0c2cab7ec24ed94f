//! HTTP request handlers for the analysis service.
//!
//! Implements analyze, search, lookup and health check endpoints using axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use glean_analyzer::{Analyzer, AnalyzerError};
use glean_domain::{AnalysisRecord, RecordId};
use glean_llm::Backend;
use glean_store::SqliteStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Analyzer wired to the configured backend and SQLite store
pub type AppAnalyzer = Analyzer<Backend, SqliteStore>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline built once at startup
    pub analyzer: Arc<AppAnalyzer>,
    /// Locale reported by the health check
    pub locale: String,
}

/// Analysis request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Text to analyze
    pub text: String,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Exact topic or keyword to match
    pub topic: String,
}

/// Stored analysis as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordResponse {
    /// Record identifier
    pub id: String,
    /// Original input text
    pub text: String,
    /// Title
    pub title: String,
    /// Summary
    pub summary: String,
    /// Topics
    pub topics: Vec<String>,
    /// Sentiment label ("positive", "neutral" or "negative")
    pub sentiment: String,
    /// Keywords extracted from the text
    pub keywords: Vec<String>,
    /// Configured generation backend
    pub provider: String,
    /// Whether the heuristic fallback produced the analysis fields
    pub fallback_used: bool,
    /// Fallback reason, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Persistence time (Unix seconds)
    pub created_at: Option<u64>,
}

impl From<&AnalysisRecord> for RecordResponse {
    fn from(record: &AnalysisRecord) -> Self {
        let provenance = record.provenance();
        Self {
            id: record.id().to_string(),
            text: record.text().to_string(),
            title: record.title().to_string(),
            summary: record.summary().to_string(),
            topics: record.topics().to_vec(),
            sentiment: record.sentiment().as_str().to_string(),
            keywords: record.keywords().to_vec(),
            provider: provenance.provider.clone(),
            fallback_used: provenance.fallback_used,
            error: provenance.error.clone(),
            created_at: record.created_at(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Configured generation backend
    pub provider: String,
    /// Default locale
    pub locale: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Pipeline error
    Analyzer(AnalyzerError),
    /// Malformed request parameter
    BadRequest(String),
    /// No record with the requested ID
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Analyzer(e @ AnalyzerError::EmptyText) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Analyzer(e) => {
                error!("Request failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<AnalyzerError> for AppError {
    fn from(e: AnalyzerError) -> Self {
        AppError::Analyzer(e)
    }
}

/// POST /analyze - Analyze and persist text
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<RecordResponse>, AppError> {
    let record = state.analyzer.analyze(&request.text).await?;
    Ok(Json(RecordResponse::from(&record)))
}

/// GET /search?topic= - Records whose topics or keywords contain the value
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecordResponse>>, AppError> {
    let records = state.analyzer.search(&params.topic)?;
    info!("Search '{}' returned {} records", params.topic, records.len());
    Ok(Json(records.iter().map(RecordResponse::from).collect()))
}

/// GET /analyses/:id - Fetch one record
async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>, AppError> {
    let record_id = RecordId::from_string(&id).map_err(AppError::BadRequest)?;
    let record = state
        .analyzer
        .get(record_id)?
        .ok_or_else(|| AppError::NotFound(format!("Analysis not found: {}", id)))?;
    Ok(Json(RecordResponse::from(&record)))
}

/// GET /health - Service status
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        provider: state.analyzer.provider_name().to_string(),
        locale: state.locale.clone(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/analyze", post(analyze))
        .route("/search", get(search))
        .route("/analyses/:id", get(get_analysis))
        .route("/health", get(health_check))
        .with_state(state)
}
