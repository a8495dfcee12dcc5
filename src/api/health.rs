use crate::api::MgmtState;
use crate::api::schemas::health::HealthResponse;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Liveness probe: returns 200 OK as long as the server is running.
pub async fn livez() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe: checks connectivity to the database.
pub async fn readyz(State(state): State<MgmtState>) -> impl IntoResponse {
    let (status_code, db_status) = match state.health_service.check_db().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, component = "database", "Readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, "error")
        }
    };

    let response = HealthResponse { status: db_status.to_string(), database: db_status.to_string() };

    (status_code, Json(response))
}
