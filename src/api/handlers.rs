//! API request handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::routes::AppState;
use crate::error::Error;
use crate::types::{NewNote, Note, NoteChanges, ALLOWED_UPDATE_FIELDS};

// Response types

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// Error mapping

/// Map a store error to an HTTP response. Store failures are logged with
/// full detail and surfaced to the client as a generic 500.
fn store_error(err: Error) -> ApiError {
    match err {
        Error::NoteNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Note not found".into(),
            }),
        ),
        other => {
            tracing::error!("Store operation failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".into(),
                }),
            )
        }
    }
}

fn invalid_id() -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid note ID".into(),
        }),
    )
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// List all notes
#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "All notes", body = [Note]),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn list_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.store.list().map_err(store_error)?;
    Ok(Json(notes))
}

/// Get a single note by ID
#[utoipa::path(
    get,
    path = "/note/{id}",
    params(
        ("id" = String, Path, description = "Note UUID")
    ),
    responses(
        (status = 200, description = "Note found", body = Note),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, ApiError> {
    let uuid = id.parse::<uuid::Uuid>().map_err(|_| invalid_id())?;

    let note = state
        .store
        .get(uuid)
        .map_err(store_error)?
        .ok_or_else(|| store_error(Error::NoteNotFound(id)))?;

    Ok(Json(note))
}

/// Create a new note
#[utoipa::path(
    post,
    path = "/note",
    request_body = NewNote,
    responses(
        (status = 201, description = "Note created", body = Note),
        (status = 400, description = "Could not save note", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn create_note(
    State(state): State<AppState>,
    Json(req): Json<NewNote>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.store.create(req).map_err(|e| {
        tracing::warn!("Failed to save note: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Could not save note".into(),
            }),
        )
    })?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Update an existing note
///
/// Only `title` and `body` may appear in the request body; any other key
/// rejects the whole request with no partial apply.
#[utoipa::path(
    patch,
    path = "/note/{id}",
    params(
        ("id" = String, Path, description = "Note UUID")
    ),
    request_body = NoteChanges,
    responses(
        (status = 201, description = "Note updated", body = Note),
        (status = 400, description = "Invalid note ID or disallowed update field", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let uuid = id.parse::<uuid::Uuid>().map_err(|_| invalid_id())?;

    // Allow-list check before touching the store
    let valid = body.keys().all(|key| ALLOWED_UPDATE_FIELDS.contains(&key.as_str()));
    if !valid {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "invalid updates".into(),
            }),
        ));
    }

    let changes: NoteChanges =
        serde_json::from_value(serde_json::Value::Object(body)).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "invalid updates".into(),
                }),
            )
        })?;

    let note = state.store.update(uuid, changes).map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Delete a note
#[utoipa::path(
    delete,
    path = "/note/{id}",
    params(
        ("id" = String, Path, description = "Note UUID")
    ),
    responses(
        (status = 200, description = "Note deleted", body = String),
        (status = 400, description = "Invalid note ID", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    ),
    tag = "notes"
)]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<&'static str, ApiError> {
    let uuid = id.parse::<uuid::Uuid>().map_err(|_| invalid_id())?;

    state.store.delete(uuid).map_err(store_error)?;

    Ok("Deleted successfully")
}
