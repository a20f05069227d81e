//! Health and probe endpoints.

use axum::{extract::State, http::StatusCode, Json};
use persistence::db::ping;
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
    pub google_sign_in: bool,
}

/// Database health status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
    pub pool_size: u32,
    pub idle_connections: usize,
}

/// Body of the liveness and readiness probes.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Service health with database round-trip latency.
///
/// GET /api/health
///
/// Answers 503 with the same body when the database cannot be reached.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let latency = match ping(&state.pool).await {
        Ok(elapsed) => Some(elapsed.as_millis() as u64),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed: database unreachable");
            None
        }
    };
    let connected = latency.is_some();

    let response = HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseHealth {
            connected,
            latency_ms: latency,
            pool_size: state.pool.size(),
            idle_connections: state.pool.num_idle(),
        },
        google_sign_in: state.google.is_some(),
    };
    let status = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

/// GET /api/health/live
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "alive".to_string(),
    })
}

/// GET /api/health/ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    ping(&state.pool)
        .await
        .map(|_| {
            Json(StatusResponse {
                status: "ready".to_string(),
            })
        })
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            database: DatabaseHealth {
                connected: true,
                latency_ms: Some(5),
                pool_size: 4,
                idle_connections: 3,
            },
            google_sign_in: false,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["database"]["latency_ms"], 5);
        assert_eq!(json["database"]["idle_connections"], 3);
        assert_eq!(json["google_sign_in"], false);
    }

    #[tokio::test]
    async fn test_live() {
        let Json(response) = live().await;
        assert_eq!(response.status, "alive");
    }
}
