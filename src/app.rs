use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/qualities", get(handlers::get_qualities))
        .route("/api/plot", get(handlers::get_plot))
        .route("/api/records", get(handlers::get_records))
        .with_state(state)
}
