use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub ledger: HealthCheck,
    pub checked_at: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Always answers 200 so load balancers keep routing; an empty catalog only degrades the report.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(state.catalog.len());
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "freightdesk-server runtime initialized".to_string(),
        },
        catalog,
        ledger: HealthCheck {
            status: "ready",
            detail: format!("{} calls recorded", state.ledger.len()),
        },
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}

fn catalog_check(loads: usize) -> HealthCheck {
    match loads {
        0 => HealthCheck { status: "degraded", detail: "load catalog is empty".to_string() },
        count => HealthCheck { status: "ready", detail: format!("{count} loads available") },
    }
}
