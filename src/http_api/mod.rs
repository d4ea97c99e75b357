use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{RenderModel, Resource, ResourceGrid, SnapshotError, ZoomLevel, validate_resources};

#[derive(Clone)]
pub struct AppState {
    grid: Arc<RwLock<ResourceGrid>>,
}

impl AppState {
    pub fn new(grid: ResourceGrid) -> Self {
        Self {
            grid: Arc::new(RwLock::new(grid)),
        }
    }

    pub fn with_shared(grid: Arc<RwLock<ResourceGrid>>) -> Self {
        Self { grid }
    }

    fn grid(&self) -> Arc<RwLock<ResourceGrid>> {
        self.grid.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
}

impl From<SnapshotError> for ApiError {
    fn from(value: SnapshotError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct GranularityPayload {
    granularity: ZoomLevel,
}

#[derive(Debug, Deserialize)]
struct AnchorPayload {
    anchor: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct ResourcesPayload {
    resources: Vec<Resource>,
}

/// Result of activating a header cell; `changed` is false when the cell was not a drill target.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivationResponse {
    pub changed: bool,
    pub model: RenderModel,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/view", get(get_view))
        .route("/resources", put(replace_resources))
        .route("/view/advance", post(advance))
        .route("/view/retreat", post(retreat))
        .route("/view/granularity", post(select_granularity))
        .route("/view/anchor", post(jump_to))
        .route("/view/cells/:index/activate", post(activate_cell))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, grid: ResourceGrid) -> std::io::Result<()> {
    let state = AppState::new(grid);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_view(State(state): State<AppState>) -> Json<RenderModel> {
    let grid = state.grid();
    let model = grid.read().render();
    Json(model)
}

async fn replace_resources(
    State(state): State<AppState>,
    Json(payload): Json<ResourcesPayload>,
) -> Result<Json<RenderModel>, ApiError> {
    let grid = state.grid();
    let model = {
        let mut guard = grid.write();
        validate_resources(&payload.resources, guard.config())?;
        guard.replace_resources(payload.resources);
        guard.render()
    };
    Ok(Json(model))
}

async fn advance(State(state): State<AppState>) -> Json<RenderModel> {
    let grid = state.grid();
    let model = {
        let mut guard = grid.write();
        guard.advance();
        guard.render()
    };
    Json(model)
}

async fn retreat(State(state): State<AppState>) -> Json<RenderModel> {
    let grid = state.grid();
    let model = {
        let mut guard = grid.write();
        guard.retreat();
        guard.render()
    };
    Json(model)
}

async fn select_granularity(
    State(state): State<AppState>,
    Json(payload): Json<GranularityPayload>,
) -> Json<RenderModel> {
    let grid = state.grid();
    let model = {
        let mut guard = grid.write();
        guard.select_granularity(payload.granularity, today());
        guard.render()
    };
    Json(model)
}

async fn jump_to(
    State(state): State<AppState>,
    Json(payload): Json<AnchorPayload>,
) -> Json<RenderModel> {
    let grid = state.grid();
    let model = {
        let mut guard = grid.write();
        guard.jump_to(payload.anchor);
        guard.render()
    };
    Json(model)
}

async fn activate_cell(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Json<ActivationResponse> {
    let grid = state.grid();
    let response = {
        let mut guard = grid.write();
        let changed = guard.activate_cell(index);
        ActivationResponse {
            changed,
            model: guard.render(),
        }
    };
    Json(response)
}
