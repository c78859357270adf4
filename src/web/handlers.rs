use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use super::{ApiError, RequestContext, WebServer};
use crate::error::TodoError;
use crate::todo::Status;

/// JSON body accepted by POST/PUT /todo. Absent and `null` fields mean "not given".
#[derive(Debug, Default, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TodoPayload {
    fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

fn decode_payload(body: &Bytes) -> Result<TodoPayload, TodoError> {
    serde_json::from_slice(body).map_err(TodoError::Decode)
}

fn parse_id(raw: &str) -> Result<i64, TodoError> {
    raw.parse::<i64>().map_err(|_| TodoError::InvalidId(raw.to_string()))
}

/// GET /todo/:id - single record as JSON
pub async fn get_todo(
    Extension(ctx): Extension<RequestContext>,
    State(state): State<WebServer>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id).map_err(|e| ApiError::new("Invalid id in request path", e, &ctx))?;
    tracing::info!(id, "Rest call to get_todo");

    let store = state.store.lock().await;
    let todo = store.get_by_id(id).map_err(|e| {
        ApiError::new(format!("Unable to execute GetByID with id : {}", id), e, &ctx)
    })?;

    Ok((StatusCode::OK, Json(todo)))
}

/// POST /todo - create from description/status in the body; any id is ignored
pub async fn create_todo(
    Extension(ctx): Extension<RequestContext>,
    State(state): State<WebServer>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload =
        decode_payload(&body).map_err(|e| ApiError::new("Unable to read request body", e, &ctx))?;
    let description = payload.description().unwrap_or_default();
    let raw_status = payload.status().unwrap_or_default();
    tracing::info!(description, status = raw_status, "Rest call to create_todo");

    let status = raw_status
        .parse::<Status>()
        .map_err(|e| ApiError::new("Error creating new ToDo item", e, &ctx))?;

    let store = state.store.lock().await;
    let todo = store
        .create(description, status)
        .map_err(|e| ApiError::new("Error creating new ToDo item", e, &ctx))?;

    Ok((StatusCode::OK, Json(todo)))
}

/// PUT /todo - update by body id. Empty description/status keep the stored values.
pub async fn update_todo(
    Extension(ctx): Extension<RequestContext>,
    State(state): State<WebServer>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload =
        decode_payload(&body).map_err(|e| ApiError::new("Unable to read request body", e, &ctx))?;
    tracing::info!(id = payload.id, "Rest call to update_todo");

    // held across the lookup and the write
    let store = state.store.lock().await;

    let original = store.get_by_id(payload.id).map_err(|e| {
        ApiError::new(
            format!("Error locating (original) todo with id {}", payload.id),
            e,
            &ctx,
        )
    })?;

    let description = payload
        .description()
        .map(str::to_string)
        .unwrap_or(original.description);
    let status = match payload.status() {
        Some(raw) => raw
            .parse::<Status>()
            .map_err(|e| ApiError::new(format!("Error updating todo {}", payload.id), e, &ctx))?,
        None => original.status,
    };

    store
        .update(payload.id, &description, status)
        .map_err(|e| ApiError::new(format!("Error updating todo {}", payload.id), e, &ctx))?;

    let updated = store
        .get_by_id(payload.id)
        .map_err(|e| ApiError::new(format!("Error updating todo {}", payload.id), e, &ctx))?;
    Ok((StatusCode::OK, Json(updated)))
}

/// DELETE /todo/:id
pub async fn delete_todo(
    Extension(ctx): Extension<RequestContext>,
    State(state): State<WebServer>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&raw_id).map_err(|e| ApiError::new("Invalid id in request path", e, &ctx))?;
    tracing::info!(id, "Rest call to delete_todo");

    let store = state.store.lock().await;
    store
        .delete(id)
        .map_err(|e| ApiError::new(format!("Unable to delete record ID: {}", id), e, &ctx))?;

    Ok(StatusCode::NO_CONTENT)
}
