pub mod diagnostics;
pub mod projects;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Projects
        .route("/api/v1/projects", get(projects::list))
        .route("/api/v1/projects/{id}", get(projects::get))
        // Diagnostics
        .route("/api/v1/connection", get(diagnostics::connection))
        .route("/api/v1/diagnostics", get(diagnostics::status))
        .route("/api/v1/diagnostics/run", post(diagnostics::run))
}
