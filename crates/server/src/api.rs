//! HTTP surface used by the voice agent and the dashboard.
//!
//! Open:
//! - `GET  /`             service banner
//! - `GET  /health`       readiness report
//!
//! Require `X-API-Key`:
//! - `POST /auth-carrier` carrier eligibility by MC number
//! - `POST /loads/search` filter the load catalog
//! - `POST /negotiate`    one negotiation turn
//! - `POST /call-log`     record a completed call
//! - `GET  /dashboard`    aggregate call metrics

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use freightdesk_core::{
    metrics, ApplicationError, CallId, CallRecord, CallRecordInput, CarrierEligibility,
    DashboardMetrics, DomainError, InterfaceError, Load, LoadId, LoadSearchQuery,
    NegotiationDecision, NegotiationInput,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::require_api_key;
use crate::health;
use crate::state::AppState;

pub type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiErrorBody>)>;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    pub correlation_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CarrierAuthRequest {
    pub mc_number: String,
}

#[derive(Debug, Serialize)]
pub struct LoadSearchResponse {
    pub loads: Vec<Load>,
}

#[derive(Debug, Deserialize)]
pub struct NegotiationRequest {
    pub load_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub listed_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub carrier_offer: Decimal,
    pub round: u32,
}

/// Call summary posted by the voice agent once the call has ended.
#[derive(Debug, Deserialize)]
pub struct CallLogRequest {
    pub call_id: String,
    pub carrier_mc: String,
    pub carrier_name: Option<String>,
    pub load_id: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub listed_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub agreed_rate: Option<Decimal>,
    pub outcome: String,
    pub sentiment: String,
    pub rounds_of_negotiation: Option<u32>,
    pub transcript_summary: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<CallLogRequest> for CallRecordInput {
    type Error = DomainError;

    fn try_from(body: CallLogRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            call_id: CallId(body.call_id),
            carrier_mc: body.carrier_mc,
            carrier_name: body.carrier_name,
            load_id: body.load_id.map(LoadId),
            listed_rate: body.listed_rate,
            agreed_rate: body.agreed_rate,
            outcome: body.outcome.parse()?,
            sentiment: body.sentiment.parse()?,
            rounds_of_negotiation: body.rounds_of_negotiation,
            transcript_summary: body.transcript_summary,
            notes: body.notes,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub health: &'static str,
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth-carrier", post(auth_carrier))
        .route("/loads/search", post(search_loads))
        .route("/negotiate", post(negotiate))
        .route("/call-log", post(log_call))
        .route("/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/", get(root))
        .merge(health::router())
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse { message: "Inbound carrier sales API is running.", health: "/health" })
}

async fn auth_carrier(
    State(state): State<AppState>,
    Json(body): Json<CarrierAuthRequest>,
) -> ApiResult<CarrierEligibility> {
    let correlation_id = new_correlation_id();
    let eligibility = state.carriers.check_eligibility(&body.mc_number).await.map_err(|error| {
        warn!(
            event_name = "carrier.eligibility.failed",
            correlation_id = %correlation_id,
            error = %error,
            "carrier eligibility lookup failed"
        );
        interface_error(error.into_interface(&correlation_id))
    })?;

    info!(
        event_name = "carrier.eligibility.checked",
        correlation_id = %correlation_id,
        carrier_mc = %body.mc_number.trim(),
        eligible = eligibility.eligible,
        "carrier eligibility checked"
    );
    Ok(Json(eligibility))
}

async fn search_loads(
    State(state): State<AppState>,
    Json(query): Json<LoadSearchQuery>,
) -> ApiResult<LoadSearchResponse> {
    let loads = state.catalog.search(&query);
    info!(
        event_name = "catalog.search",
        correlation_id = %new_correlation_id(),
        matches = loads.len(),
        "load catalog searched"
    );
    Ok(Json(LoadSearchResponse { loads }))
}

async fn negotiate(
    State(state): State<AppState>,
    Json(body): Json<NegotiationRequest>,
) -> ApiResult<NegotiationDecision> {
    let correlation_id = new_correlation_id();

    if body.round == 0 {
        return Err(interface_error(InterfaceError::bad_request(
            "Round must be at least 1.",
            &correlation_id,
        )));
    }

    let input = NegotiationInput {
        load_id: LoadId(body.load_id),
        listed_rate: body.listed_rate,
        carrier_offer: body.carrier_offer,
        round: body.round,
    };

    let decision = state.negotiator.decide(&input).map_err(|error| {
        warn!(
            event_name = "negotiation.rejected_input",
            correlation_id = %correlation_id,
            load_id = %input.load_id.0,
            error = %error,
            "negotiation request failed validation"
        );
        interface_error(ApplicationError::from(error).into_interface(&correlation_id))
    })?;

    info!(
        event_name = "negotiation.decided",
        correlation_id = %correlation_id,
        load_id = %input.load_id.0,
        round = input.round,
        listed_rate = %input.listed_rate,
        carrier_offer = %input.carrier_offer,
        status = decision.status().as_str(),
        "negotiation decision issued"
    );
    Ok(Json(decision))
}

async fn log_call(
    State(state): State<AppState>,
    Json(body): Json<CallLogRequest>,
) -> ApiResult<CallRecord> {
    let correlation_id = new_correlation_id();
    let input = CallRecordInput::try_from(body).map_err(|error| {
        warn!(
            event_name = "call_log.rejected_input",
            correlation_id = %correlation_id,
            error = %error,
            "call log failed validation"
        );
        interface_error(ApplicationError::from(error).into_interface(&correlation_id))
    })?;

    let record = state.ledger.add(input);
    info!(
        event_name = "call_log.recorded",
        correlation_id = %correlation_id,
        call_id = %record.call_id.0,
        outcome = record.outcome.as_str(),
        sentiment = record.sentiment.as_str(),
        "completed call recorded"
    );
    Ok(Json(record))
}

async fn dashboard(State(state): State<AppState>) -> ApiResult<DashboardMetrics> {
    Ok(Json(metrics::compute(&state.ledger.all())))
}

pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn interface_error(error: InterfaceError) -> (StatusCode, Json<ApiErrorBody>) {
    let status = match error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    let body = ApiErrorBody {
        error: error.user_message(),
        correlation_id: error.correlation_id().to_string(),
    };
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use chrono::{TimeZone, Utc};
    use freightdesk_core::{CallLedger, FixedClock, LoadCatalog};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::router;
    use crate::state::AppState;

    const KEY: &str = "test-shared-secret";

    fn app() -> (Router, AppState) {
        let instant = Utc.with_ymd_and_hms(2024, 8, 1, 15, 0, 0).single().expect("instant");
        let catalog: LoadCatalog = LoadCatalog::new(
            serde_json::from_value(json!([
                {
                    "load_id": "LD-1001",
                    "origin": "Chicago, IL",
                    "destination": "Dallas, TX",
                    "pickup_datetime": "2024-08-01T08:00:00Z",
                    "delivery_datetime": "2024-08-02T18:00:00Z",
                    "equipment_type": "Dry Van",
                    "loadboard_rate": 2100.0
                }
            ]))
            .expect("catalog fixture"),
        );
        let state = AppState::new(catalog, KEY.to_string().into())
            .with_ledger(CallLedger::new(Arc::new(FixedClock(instant))));
        (router(state.clone()), state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        key: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(key) = key {
            builder = builder.header("X-API-Key", key);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = app.clone().oneshot(request).await.expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn negotiation(listed_rate: f64, carrier_offer: f64, round: u32) -> Value {
        json!({
            "load_id": "LD-1001",
            "listed_rate": listed_rate,
            "carrier_offer": carrier_offer,
            "round": round
        })
    }

    fn call_log(call_id: &str, outcome: &str, listed: Option<f64>, agreed: Option<f64>) -> Value {
        json!({
            "call_id": call_id,
            "carrier_mc": "123456",
            "carrier_name": "Mock Carrier MC 123456",
            "load_id": "LD-1001",
            "listed_rate": listed,
            "agreed_rate": agreed,
            "outcome": outcome,
            "sentiment": "positive",
            "rounds_of_negotiation": 2
        })
    }

    #[tokio::test]
    async fn protected_routes_require_api_key() {
        let (app, _) = app();

        for (method, uri) in [
            ("POST", "/negotiate"),
            ("POST", "/call-log"),
            ("GET", "/dashboard"),
            ("POST", "/auth-carrier"),
            ("POST", "/loads/search"),
        ] {
            let (status, body) = send(&app, method, uri, None, Some(json!({}))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["error"], "Invalid API key");

            let (status, _) = send(&app, method, uri, Some("wrong"), Some(json!({}))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn root_and_health_are_open() {
        let (app, _) = app();

        let (status, body) = send(&app, "GET", "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["health"], "/health");

        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn negotiate_returns_each_decision_shape() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/negotiate",
            Some(KEY),
            Some(negotiation(1000.0, 960.0, 1)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["final_rate"], 960.0);
        assert!(body.get("counter_rate").is_none());

        let (_, body) = send(
            &app,
            "POST",
            "/negotiate",
            Some(KEY),
            Some(negotiation(1000.0, 900.0, 1)),
        )
        .await;
        assert_eq!(body["status"], "counter");
        assert_eq!(body["counter_rate"], 950.0);
        assert_eq!(body["message"], "Countering based on margin rules.");

        let (_, body) = send(
            &app,
            "POST",
            "/negotiate",
            Some(KEY),
            Some(negotiation(1000.0, 800.0, 3)),
        )
        .await;
        assert_eq!(body["status"], "rejected");
        assert!(body.get("final_rate").is_none());
    }

    #[tokio::test]
    async fn negotiate_rejects_non_positive_listed_rate_without_touching_ledger() {
        let (app, state) = app();

        for listed in [0.0, -250.0] {
            let (status, body) = send(
                &app,
                "POST",
                "/negotiate",
                Some(KEY),
                Some(negotiation(listed, 100.0, 1)),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Listed rate must be positive.");
        }

        assert!(state.ledger.is_empty());
        let (_, dashboard) = send(&app, "GET", "/dashboard", Some(KEY), None).await;
        assert_eq!(dashboard["total_calls"], 0);
    }

    #[tokio::test]
    async fn negotiate_rejects_round_zero() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            "POST",
            "/negotiate",
            Some(KEY),
            Some(negotiation(1000.0, 900.0, 0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Round must be at least 1.");
    }

    #[tokio::test]
    async fn negotiate_counters_rates_near_decimal_max() {
        let (app, _) = app();
        let (status, body) =
            send(&app, "POST", "/negotiate", Some(KEY), Some(negotiation(7.0e28, 6.0e28, 1)))
                .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "counter");
        let counter = body["counter_rate"].as_f64().expect("counter rate");
        assert!((counter / 6.5e28 - 1.0).abs() < 1e-9, "unexpected counter {counter}");
    }

    #[tokio::test]
    async fn dashboard_survives_extreme_booked_call() {
        let (app, _) = app();

        let (status, _) = send(
            &app,
            "POST",
            "/call-log",
            Some(KEY),
            Some(call_log("call-extreme", "booked", Some(0.0001), Some(1e25))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        for _ in 0..2 {
            let (status, body) = send(&app, "GET", "/dashboard", Some(KEY), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["total_booked"], 1);
            let average = body["avg_discount_percent"].as_f64().expect("average discount");
            assert!(average < -9.9e30, "unexpected average {average}");
        }
    }

    #[tokio::test]
    async fn call_log_returns_stamped_record() {
        let (app, state) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/call-log",
            Some(KEY),
            Some(call_log("call-001", "booked", Some(2100.0), Some(1995.0))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["call_id"], "call-001");
        assert_eq!(body["timestamp"], "2024-08-01T15:00:00Z");
        assert_eq!(body["outcome"], "booked");
        assert_eq!(body["agreed_rate"], 1995.0);
        assert_eq!(body["notes"], Value::Null);
        assert_eq!(state.ledger.len(), 1);
    }

    #[tokio::test]
    async fn call_log_rejects_unknown_enum_values() {
        let (app, state) = app();

        let (status, body) =
            send(&app, "POST", "/call-log", Some(KEY), Some(call_log("call-x", "won", None, None)))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown call outcome `won`");

        let mut bad_sentiment = call_log("call-y", "booked", None, None);
        bad_sentiment["sentiment"] = json!("ecstatic");
        let (status, _) = send(&app, "POST", "/call-log", Some(KEY), Some(bad_sentiment)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(state.ledger.is_empty());
    }

    #[tokio::test]
    async fn call_log_requires_call_id_and_carrier_mc() {
        let (app, state) = app();

        let (status, _) = send(
            &app,
            "POST",
            "/call-log",
            Some(KEY),
            Some(json!({"carrier_mc": "123456", "outcome": "booked", "sentiment": "neutral"})),
        )
        .await;
        assert!(status.is_client_error());
        assert!(state.ledger.is_empty());
    }

    #[tokio::test]
    async fn dashboard_reflects_logged_calls() {
        let (app, _) = app();

        for body in [
            call_log("c1", "booked", Some(1000.0), Some(900.0)),
            call_log("c2", "booked", Some(2000.0), Some(2000.0)),
            call_log("c3", "rejected_by_carrier", None, None),
        ] {
            let (status, _) = send(&app, "POST", "/call-log", Some(KEY), Some(body)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, "GET", "/dashboard", Some(KEY), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_calls"], 3);
        assert_eq!(body["total_booked"], 2);
        let conversion = body["conversion_rate"].as_f64().expect("conversion rate");
        assert!((conversion - 66.67).abs() < 0.01);
        assert_eq!(body["avg_discount_percent"], 5.0);
        assert_eq!(body["outcomes_breakdown"], json!({"booked": 2, "rejected_by_carrier": 1}));
        assert_eq!(body["sentiment_breakdown"], json!({"positive": 3}));
    }

    #[tokio::test]
    async fn auth_carrier_applies_mock_rules() {
        let (app, _) = app();

        let (status, body) =
            send(&app, "POST", "/auth-carrier", Some(KEY), Some(json!({"mc_number": "123456"})))
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["eligible"], true);
        assert_eq!(body["risk_level"], "LOW");

        let (_, body) =
            send(&app, "POST", "/auth-carrier", Some(KEY), Some(json!({"mc_number": "900001"})))
                .await;
        assert_eq!(body["eligible"], false);
        assert_eq!(body["risk_level"], "HIGH");
    }

    #[tokio::test]
    async fn load_search_filters_catalog() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/loads/search",
            Some(KEY),
            Some(json!({"origin": "chicago", "equipment_type": "dry van"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loads"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["loads"][0]["load_id"], "LD-1001");
        assert_eq!(body["loads"][0]["loadboard_rate"], 2100.0);

        let (_, body) =
            send(&app, "POST", "/loads/search", Some(KEY), Some(json!({"origin": "Boston"}))).await;
        assert_eq!(body["loads"], json!([]));
    }
}
