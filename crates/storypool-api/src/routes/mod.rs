//! API routes.

pub mod health;
pub mod launch;

use crate::AppState;
use axum::Router;

/// Build the main API router: the Launcher ingress plus health/readiness.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(launch::router())
        .merge(health::router())
        .with_state(state)
}
