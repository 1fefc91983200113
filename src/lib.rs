pub mod config;
pub mod error;
pub mod state;
pub mod models;
pub mod fallback;
pub mod store;
pub mod repository;
pub mod diagnostics;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::repository::ProjectRepository;
use crate::state::{AppState, SharedState};
use crate::store::{RestStore, StoreError};

/// Wire the repository to its source. Missing or malformed store settings are
/// not an error here: the repository then serves fallback data only.
pub fn build_repository(config: &Config) -> Result<ProjectRepository, StoreError> {
    let settings = match &config.store {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Project store not configured, serving fallback data: {e}");
            return Ok(ProjectRepository::unconfigured(e.clone()));
        }
    };

    tracing::info!(
        "Project store configured: {} (key {})",
        settings.url,
        settings.key_preview()
    );

    match RestStore::from_settings(settings, config.store_timeout) {
        Ok(store) => Ok(ProjectRepository::live(Arc::new(store))),
        Err(StoreError::Configuration(e)) => {
            tracing::warn!("Project store URL rejected, serving fallback data: {e}");
            Ok(ProjectRepository::unconfigured(e))
        }
        Err(e) => Err(e),
    }
}

pub fn build_app(repository: ProjectRepository) -> Router {
    let state: SharedState = Arc::new(AppState {
        diagnostics: Diagnostics::new(repository.clone()),
        repository,
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
