use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::server::handlers;
use crate::server::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/tts", post(handlers::tts))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
