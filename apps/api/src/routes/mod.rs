pub mod health;

use axum::{routing::get, Router};

use crate::resume::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/parse-resume", get(handlers::handle_parse_resume))
        .with_state(state)
}
