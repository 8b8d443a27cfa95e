//! The HTTP surface: run-table endpoints, placeholder write routes, a health
//! check, and the static front end as the router fallback.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::samples::dataset::Dataset;
use crate::service::state::AppState;

/// Build the application router.
///
/// Requests that match no route fall through to the static asset directory,
/// so `index.html`, `app.js` and styling are served from the site root.
pub fn router(state: Arc<AppState>, static_dir: &std::path::Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/brains", get(brains_handler))
        .route("/brains/{id}", get(brain_by_run_handler))
        .route("/create", post(create_handler))
        .route("/edit", put(edit_handler))
        .route("/delete", delete(delete_handler))
        .route("/health", get(health_handler))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .with_state(state)
}

/// GET /brains: the entire dataset, exactly as loaded from its source file.
async fn brains_handler(State(state): State<Arc<AppState>>) -> Json<Dataset> {
    Json(state.dataset().clone())
}

/// GET /brains/{id}: the first record whose `Run` field equals the path id.
async fn brain_by_run_handler(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.dataset().find_by_run(&id) {
        Some(record) => Json(record.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Item not found").into_response(),
    }
}

// The write verbs are documented placeholders: they acknowledge the request
// and touch no state.

async fn create_handler() -> &'static str {
    "This is a POST request at /create"
}

async fn edit_handler() -> &'static str {
    "This is a PUT request at /edit"
}

async fn delete_handler() -> &'static str {
    "This is a DELETE request at /delete"
}

async fn health_handler() -> &'static str {
    "OK"
}
