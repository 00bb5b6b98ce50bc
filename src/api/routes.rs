//! API route definitions

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, ErrorResponse, HealthResponse};
use crate::store::NoteStore;
use crate::types::{NewNote, Note, NoteChanges};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notula API",
        version = "0.1.0",
        description = "Minimal notes CRUD service"
    ),
    tags(
        (name = "notes", description = "Note management"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::list_notes,
        handlers::get_note,
        handlers::create_note,
        handlers::update_note,
        handlers::delete_note,
    ),
    components(schemas(
        Note,
        NewNote,
        NoteChanges,
        HealthResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<NoteStore>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let openapi = ApiDoc::openapi();

    Router::new()
        // Notes CRUD
        .route("/notes", get(handlers::list_notes))
        .route("/note", post(handlers::create_note))
        .route("/note/{id}", get(handlers::get_note))
        .route("/note/{id}", patch(handlers::update_note))
        .route("/note/{id}", delete(handlers::delete_note))

        // Health
        .route("/health", get(handlers::health))

        // OpenAPI spec and Swagger UI
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", openapi))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
