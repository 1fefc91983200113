use axum::Json;
use axum::extract::State;

use crate::diagnostics::CheckReport;
use crate::repository::ConnectionReport;
use crate::state::SharedState;

pub async fn connection(State(state): State<SharedState>) -> Json<ConnectionReport> {
    Json(state.repository.test_connection().await)
}

pub async fn status(State(state): State<SharedState>) -> Json<CheckReport> {
    Json(state.diagnostics.snapshot())
}

pub async fn run(State(state): State<SharedState>) -> Json<CheckReport> {
    Json(state.diagnostics.run().await)
}
