// SociaClip Control Plane Server
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Small HTTP surface over the pipeline: status, effective config, and an
// on-demand plan for a posted candidate list.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::agent::pipeline::PlanReport;
use crate::config::SociaConfig;
use crate::engine::candidate::Candidate;
use crate::engine::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::state::{ServerState, StatusResponse};

pub type AppState = Arc<ServerState>;

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Fixed seed for reproducible captions
    #[serde(default)]
    pub seed: Option<u64>,
    /// e.g. "sat"; defaults to today
    #[serde(default)]
    pub weekday: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/config", get(get_config))
        .route("/api/plan", post(create_plan))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let display_addr = if addr.ip().is_unspecified() {
        format!("127.0.0.1:{}", port)
    } else {
        addr.to_string()
    };
    info!("[SERVER] 🚀 SociaClip control plane on http://{}", display_addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let (runs, last_run) = match state.runs.lock() {
        Ok(log) => (log.total, log.last.clone()),
        Err(poisoned) => {
            let log = poisoned.into_inner();
            (log.total, log.last.clone())
        }
    };
    Json(StatusResponse {
        service: "sociaclip-core",
        version: env!("CARGO_PKG_VERSION"),
        runs,
        last_run,
    })
}

async fn get_config(State(state): State<AppState>) -> Json<SociaConfig> {
    Json(state.config().clone())
}

async fn create_plan(
    State(state): State<AppState>,
    Json(req): Json<PlanRequest>,
) -> Result<Json<PlanReport>, ApiError> {
    info!("[SERVER] Plan requested for {} candidate(s)", req.candidates.len());
    let report = run_plan(&state, req)?;
    match state.runs.lock() {
        Ok(mut log) => log.record(&report),
        Err(_) => warn!("[SERVER] ⚠️ Run log lock poisoned, run not recorded"),
    }
    Ok(Json(report))
}

fn run_plan(state: &ServerState, req: PlanRequest) -> Result<PlanReport, ApiError> {
    let weekday = match req.weekday.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ApiError::BadRequest(format!("invalid weekday '{}'", raw)))?,
        None => Local::now().weekday(),
    };

    let mut seeded;
    let mut thread = ThreadRandom;
    let rng: &mut dyn RandomSource = match req.seed {
        Some(seed) => {
            seeded = SeededRandom::new(seed);
            &mut seeded
        }
        None => &mut thread,
    };

    state
        .pipeline
        .plan(req.candidates, weekday, rng)
        .map_err(|e| {
            error!("[SERVER] Plan failed: {}", e);
            ApiError::Internal(e.to_string())
        })
}
