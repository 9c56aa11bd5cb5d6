//! Axum app: shared state and router.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use nebula::ProjectStore;

use super::handlers;

/// Path prefix of every project endpoint.
pub const ROUTE_PREFIX: &str = "/nebula_image_manager";

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectStore>,
}

/// Builds the router: `GET {prefix}/list`, `GET {prefix}/load`, `POST {prefix}/save`.
pub fn router(store: Arc<dyn ProjectStore>) -> Router {
    let state = Arc::new(AppState { store });
    let routes = Router::new()
        .route("/list", get(handlers::list))
        .route("/load", get(handlers::load))
        .route("/save", post(handlers::save));
    Router::new().nest(ROUTE_PREFIX, routes).with_state(state)
}
