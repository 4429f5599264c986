use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::models::{EventPatch, NewEvent};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

// Every store failure is logged in full server-side and masked behind this
// one message. Not-found is intentionally included: the client contract has
// no 404.
const GENERIC_ERROR: &str = "An unexpected error occurred. Please try again later.";

fn internal_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": GENERIC_ERROR })),
    )
}

// GET /events
async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    match state.store.list().await {
        Ok(events) => Ok((StatusCode::OK, Json(events))),
        Err(e) => {
            tracing::error!("list_events store error: {:?}", e);
            Err(internal_error())
        }
    }
}

// GET /events/{id}
async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    match state.store.get(&id).await {
        Ok(event) => Ok((StatusCode::OK, Json(event))),
        Err(e) => {
            tracing::error!("get_event store error for id {}: {:?}", id, e);
            Err(internal_error())
        }
    }
}

// POST /events
//
// All four fields are optional at the parse level so that a missing field
// reaches the presence check instead of failing deserialization.
#[derive(Debug, Deserialize)]
struct CreateEventRequest {
    name: Option<String>,
    description: Option<String>,
    date: Option<String>,
    time: Option<String>,
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    let missing = |f: &Option<String>| f.as_deref().map_or(true, str::is_empty);
    if missing(&req.name) || missing(&req.description) || missing(&req.date) || missing(&req.time)
    {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid body" })),
        ));
    }

    let new = NewEvent {
        name: req.name.unwrap_or_default(),
        description: req.description.unwrap_or_default(),
        date: req.date.unwrap_or_default(),
        time: req.time.unwrap_or_default(),
    };

    match state.store.create(new).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({ "message": "Successfully event created" })),
        )),
        Err(e) => {
            tracing::error!("create_event store error: {:?}", e);
            Err(internal_error())
        }
    }
}

// PUT /events/{id}
//
// The body is taken as-is: any subset of the mutable fields, unknown fields
// ignored, an empty object accepted. Updating an unknown id succeeds.
async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    match state.store.update(&id, patch).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({ "message": "Successfully event updated" })),
        )),
        Err(e) => {
            tracing::error!("update_event store error for id {}: {:?}", id, e);
            Err(internal_error())
        }
    }
}

// DELETE /events/{id}
async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    match state.store.delete(&id).await {
        Ok(()) => Ok((
            StatusCode::OK,
            Json(json!({ "message": "Successfully event deleted" })),
        )),
        Err(e) => {
            tracing::error!("delete_event store error for id {}: {:?}", id, e);
            Err(internal_error())
        }
    }
}
