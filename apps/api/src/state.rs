use std::sync::Arc;

use sqlx::PgPool;

use crate::matching::compatibility::CompatibilityScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable scorer. Default: WeightedCompatibilityScorer over the configured distance table.
    pub scorer: Arc<dyn CompatibilityScorer>,
}
