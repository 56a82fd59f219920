pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Compatibility API
        .route(
            "/api/v1/compatibility",
            post(handlers::handle_compatibility),
        )
        .route("/api/v1/vagas", get(handlers::handle_list_jobs))
        .route(
            "/api/v1/vagas/:id/ranking",
            get(handlers::handle_rank_candidates),
        )
        .route(
            "/api/v1/candidatos/:id/vagas",
            get(handlers::handle_rank_jobs),
        )
        .with_state(state)
}
