pub mod appresult;
pub mod config;
pub mod models;
pub mod registry;
pub mod store;
pub mod users;
pub mod whiteboards;

use std::sync::Arc;

use axum::{extract::FromRef, http::HeaderValue, Router};
use tower_http::{cors::{AllowHeaders, AllowMethods, CorsLayer}, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
pub use registry::{Registry, RegistryError};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self { registry: Arc::new(registry) }
    }
}

/// Builds the `/api` router, allowing credentialed requests from `cors_origin`.
pub fn app(state: AppState, cors_origin: &str) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Ok(
        Router::new()
            .nest("/api/users", users::router())
            .nest("/api/whiteboards", whiteboards::router())
            .with_state(state)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    )
}
