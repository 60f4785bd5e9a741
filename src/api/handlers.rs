//! Batch HTTP request handlers (service-function format).
//!
//! Each endpoint accepts `{"data": [[row_index, arg1, arg2, ...]]}` with
//! positional arguments in the same order as the matching tool call, and
//! answers `{"data": [[row_index, result_string]]}`, echoing the opaque row
//! correlation token. The result string is the operation's wire form —
//! operation failures ride inside it with HTTP 200. Only a malformed
//! envelope is a 400, and only an unexpected internal fault is a 500.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::analytics::results::{render_outcome, Operation};
use crate::analytics::AnalyticsService;

/// Shared server state.
pub struct ServerState {
    pub analytics: Arc<AnalyticsService>,
}

pub type ApiState = Arc<ServerState>;

// ============================================================================
// Health check
// ============================================================================

/// Liveness probe; performs no data access.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "soccer-graph-analytics",
    }))
}

// ============================================================================
// Service-function endpoints
// ============================================================================

/// POST /shortest-path — row: `[row_index, source_id, target_id, graph_type]`
pub async fn shortest_path(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let row = batch_row(&payload, 3)?;
    let source_id = row_i64(row, 1, "source_id")?;
    let target_id = row_i64(row, 2, "target_id")?;
    let graph_type = row_str(row, 3, "graph_type")?;

    let outcome = state
        .analytics
        .shortest_path(source_id, target_id, &graph_type)
        .await;
    Ok(batch_response(
        &row[0],
        render_outcome(Operation::ShortestPath, &outcome),
    ))
}

/// POST /centrality — row: `[row_index, graph_type, analysis_type, top_n]`
pub async fn centrality(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let row = batch_row(&payload, 3)?;
    let graph_type = row_str(row, 1, "graph_type")?;
    let analysis_type = row_str(row, 2, "analysis_type")?;
    let top_n = row_i64(row, 3, "top_n")?.max(0) as usize;

    let outcome = state
        .analytics
        .centrality(&graph_type, &analysis_type, top_n)
        .await;
    Ok(batch_response(
        &row[0],
        render_outcome(Operation::Centrality, &outcome),
    ))
}

/// POST /community-detect — row: `[row_index, graph_type]`
pub async fn community_detect(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let row = batch_row(&payload, 1)?;
    let graph_type = row_str(row, 1, "graph_type")?;

    let outcome = state.analytics.community_detection(&graph_type).await;
    Ok(batch_response(
        &row[0],
        render_outcome(Operation::CommunityDetection, &outcome),
    ))
}

/// POST /transfer-network — row:
/// `[row_index, club_id, player_id, start_date, end_date]`
/// (null or 0 ids mean "absent"; null or empty dates mean "absent")
pub async fn transfer_network(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let row = batch_row(&payload, 4)?;
    let club_id = row_opt_id(row, 1);
    let player_id = row_opt_id(row, 2);
    let start_date = row_opt_str(row, 3);
    let end_date = row_opt_str(row, 4);

    let outcome = state
        .analytics
        .transfer_network(
            club_id,
            player_id,
            start_date.as_deref(),
            end_date.as_deref(),
        )
        .await;
    Ok(batch_response(
        &row[0],
        render_outcome(Operation::TransferNetwork, &outcome),
    ))
}

/// POST /temporal-analysis — row: `[row_index, time_range, analysis_type]`
pub async fn temporal_analysis(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let row = batch_row(&payload, 2)?;
    let time_range = row_str(row, 1, "time_range")?;
    let analysis_type = row_str(row, 2, "analysis_type")?;

    let outcome = state.analytics.temporal(&time_range, &analysis_type).await;
    Ok(batch_response(
        &row[0],
        render_outcome(Operation::Temporal, &outcome),
    ))
}

// ============================================================================
// Envelope helpers
// ============================================================================

/// Extract and validate the single argument row from a service-function
/// payload: `row_index` plus exactly `arity` positional arguments.
fn batch_row(payload: &Value, arity: usize) -> Result<&Vec<Value>, AppError> {
    let data = payload
        .get("data")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::bad_request("missing 'data' array"))?;
    let row = data
        .first()
        .and_then(|v| v.as_array())
        .ok_or_else(|| AppError::bad_request("'data' must contain at least one row array"))?;
    if row.len() != arity + 1 {
        return Err(AppError::bad_request(format!(
            "expected {} row elements (row_index + {} arguments), got {}",
            arity + 1,
            arity,
            row.len()
        )));
    }
    Ok(row)
}

fn row_i64(row: &[Value], pos: usize, name: &str) -> Result<i64, AppError> {
    row[pos]
        .as_i64()
        .ok_or_else(|| AppError::bad_request(format!("argument '{name}' must be an integer")))
}

fn row_str(row: &[Value], pos: usize, name: &str) -> Result<String, AppError> {
    row[pos]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AppError::bad_request(format!("argument '{name}' must be a string")))
}

/// Optional id argument: null or 0 mean "not supplied".
fn row_opt_id(row: &[Value], pos: usize) -> Option<i64> {
    row[pos].as_i64().filter(|id| *id != 0)
}

/// Optional string argument: null or empty mean "not supplied".
fn row_opt_str(row: &[Value], pos: usize) -> Option<String> {
    row[pos]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn batch_response(row_index: &Value, result: String) -> Json<Value> {
    Json(json!({ "data": [[row_index, result]] }))
}

// ============================================================================
// Error type
// ============================================================================

/// Application error → HTTP response mapping.
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    BadRequest { message: String, details: String },
}

impl AppError {
    fn bad_request(details: impl Into<String>) -> Self {
        Self::BadRequest {
            message: "Invalid request format".to_string(),
            details: details.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response(),
            AppError::BadRequest { message, details } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message, "details": details })),
            )
                .into_response(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

// ============================================================================
// Tests
// ============================================================================
