use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use freightdesk_core::InterfaceError;
use secrecy::ExposeSecret;
use tracing::warn;

use crate::api::{interface_error, new_correlation_id};
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request.headers().get(API_KEY_HEADER).map(|value| value.as_bytes());
    let authorized = provided
        .map(|provided| keys_match(provided, state.api_key.expose_secret().as_bytes()))
        .unwrap_or(false);

    if !authorized {
        let correlation_id = new_correlation_id();
        warn!(
            event_name = "auth.api_key.rejected",
            correlation_id = %correlation_id,
            path = %request.uri().path(),
            header_present = provided.is_some(),
            "request rejected: missing or invalid api key"
        );
        return interface_error(InterfaceError::unauthorized(correlation_id)).into_response();
    }

    next.run(request).await
}

fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided.iter().zip(expected).fold(0u8, |diff, (left, right)| diff | (left ^ right)) == 0
}
