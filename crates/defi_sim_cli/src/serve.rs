//! `defi-sim serve`: HTTP API over the staking simulator.

use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use defi_sim::{SimulationError, SimulationRequest, SimulationResult, Simulator, StakingPool};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[cfg(test)]
mod router_tests;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone)]
struct AppState {
    simulator: Simulator,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

/// Request failures, rendered as JSON.
enum ApiError {
    /// Body missing, not JSON, wrong content type, or not matching the request schema.
    Body(JsonRejection),
    Simulation(SimulationError),
}

impl From<SimulationError> for ApiError {
    fn from(e: SimulationError) -> Self {
        Self::Simulation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Body(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: rejection.body_text(),
                    kind: "invalid_body",
                },
            ),
            Self::Simulation(e) => {
                let status = match e {
                    SimulationError::PoolNotFound { .. } => StatusCode::NOT_FOUND,
                    SimulationError::NegativeAmount(_)
                    | SimulationError::NegativeDuration(_)
                    | SimulationError::NonFiniteAmount => StatusCode::UNPROCESSABLE_ENTITY,
                };
                let body = ErrorBody {
                    error: e.to_string(),
                    kind: e.kind(),
                };
                (status, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// Every structural failure of the body is a 422, whatever the extractor's own status.
async fn simulate_staking(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationResult>, ApiError> {
    let Json(req) = payload.map_err(ApiError::Body)?;
    Ok(Json(state.simulator.handle_simulate_staking(&req)?))
}

async fn list_pools(State(state): State<AppState>) -> Json<Vec<StakingPool>> {
    Json(state.simulator.registry().pools().cloned().collect())
}

fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/simulate/staking", post(simulate_staking))
        .route("/pools", get(list_pools));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn start_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, app).await
}

pub fn run(addr: SocketAddr, simulator: Simulator) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState { simulator };
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(start_server(addr, state))?;
    Ok(())
}
