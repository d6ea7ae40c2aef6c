//! API route definitions.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::state::AppState;
use super::ApiError;
use crate::queue::QueueError;

type ApiResult = Result<Json<Value>, ApiError>;

pub fn queue_routes() -> Router<AppState> {
    Router::new()
        .route("/put/{id}/{date}", post(enqueue))
        .route("/remove/top", delete(dequeue_top))
        .route("/remove/{id}", delete(dequeue))
        .route("/get/ids", get(list_ids))
        .route("/get/top", get(peek_top))
        .route("/get/position/{id}", get(position))
        .route("/get/mean/{time}", get(mean_wait))
}

pub fn ops_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Ids arrive as text so that non-numeric input is reported like any other
/// invalid argument.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QueueError::InvalidArgument(format!("'{raw}' is not an integer id")).into())
}

async fn enqueue(
    State(state): State<AppState>,
    Path((id, date)): Path<(String, String)>,
) -> ApiResult {
    let id = parse_id(&id)?;
    let request = state.service.enqueue(id, &date)?;
    Ok(Json(json!({ "data": request })))
}

async fn dequeue(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id)?;
    let removed = state.service.dequeue(id)?;
    Ok(Json(json!({ "data": removed })))
}

async fn dequeue_top(State(state): State<AppState>) -> ApiResult {
    let top = state.service.dequeue_top()?;
    Ok(Json(json!({
        "data": top,
        "meta": { "message": format!("Removed {} from the queue", top.id) }
    })))
}

async fn list_ids(State(state): State<AppState>) -> Json<Value> {
    let ids = state.service.list_ids();
    Json(json!({ "data": ids, "meta": { "total": ids.len() } }))
}

async fn peek_top(State(state): State<AppState>) -> ApiResult {
    let top = state.service.peek_top()?;
    Ok(Json(json!({ "data": top })))
}

async fn position(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let id = parse_id(&id)?;
    let position = state.service.position(id)?;
    Ok(Json(json!({ "data": { "id": id, "position": position } })))
}

async fn mean_wait(State(state): State<AppState>, Path(time): Path<String>) -> ApiResult {
    let mean = state.service.mean_wait(&time)?;
    Ok(Json(json!({ "data": mean })))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "data": {
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "queued": state.service.len()
        },
        "meta": {
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}
