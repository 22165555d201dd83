//! Router construction and server startup.

use std::net::SocketAddr;

use {
    axum::{
        Json, Router,
        extract::State,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::{get, post},
    },
    serde_json::json,
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::{error, info},
};

use pharos_audit::{AuditError, Fault, ReportRequest, RunConfig};

use crate::state::AppState;

/// Build the gateway router. Shared between production startup and tests.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/ping", get(ping_handler))
        .route("/report", post(report_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn start_gateway(bind: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "gateway listening");
    axum::serve(
        listener,
        build_app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

async fn root_handler() -> impl IntoResponse {
    Json(json!({ "hello": "pharos" }))
}

async fn ping_handler() -> impl IntoResponse {
    Json(json!({ "data": "pong" }))
}

async fn report_handler(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Response {
    let config = match RunConfig::resolve(request, state.defaults) {
        Ok(config) => config,
        Err(e) => return fault_response(e),
    };

    info!(
        url = %config.url,
        device = %config.device,
        throttling = %config.throttling,
        attempts = config.attempts,
        "audit run requested"
    );

    match state.runner.run(config).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => fault_response(e),
    }
}

/// Map an audit error onto the HTTP contract: client faults surface their
/// message verbatim as a 400, everything else is an opaque 500 with the
/// original error logged server-side only.
fn fault_response(err: AuditError) -> Response {
    match err.fault() {
        Fault::Client => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        Fault::Server => {
            error!(error = %err, "audit run failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        },
    }
}
