// GET /instances and /instances/{id}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::SnapshotError;

const DB_ERROR_MESSAGE: &str = "An error occurred while communicating with the database.";

/// GET /instances: every recently reporting host; JSON error body on failure.
pub(super) async fn list_instances(State(state): State<AppState>) -> Response {
    match state.aggregator.aggregate_fleet().await {
        Ok(snapshots) => Json(snapshots).into_response(),
        Err(e) => {
            tracing::error!(error = %e.detail(), "fleet snapshot query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "Error querying metric store",
                    "error": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// GET /instances/{id}: one host; plain-text errors.
pub(super) async fn get_instance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    instance_response(&state, &id).await
}

/// GET /instances/: empty id segment.
pub(super) async fn missing_instance_id(State(state): State<AppState>) -> Response {
    instance_response(&state, "").await
}

async fn instance_response(state: &AppState, id: &str) -> Response {
    match state.aggregator.aggregate_one(id).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e @ SnapshotError::Validation(_)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e @ SnapshotError::NotFound { .. }) => {
            tracing::debug!(host = %id, "instance not found");
            (StatusCode::NOT_FOUND, e.to_string()).into_response()
        }
        Err(e @ SnapshotError::Infrastructure(_)) => {
            tracing::error!(host = %id, error = %e.detail(), "instance snapshot query failed");
            (StatusCode::INTERNAL_SERVER_ERROR, DB_ERROR_MESSAGE).into_response()
        }
    }
}
