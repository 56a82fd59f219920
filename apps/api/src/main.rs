mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::create_pool;
use crate::matching::compatibility::{CompatibilityScorer, WeightedCompatibilityScorer};
use crate::matching::distance::NeighborhoodDistanceTable;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Localizei API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Neighborhood distances: built-in table unless a JSON file is configured
    let distances = load_distance_table(&config)?;
    if distances.is_empty() {
        warn!("Distance table is empty; every candidate will fall outside the job radius");
    }

    let scorer = WeightedCompatibilityScorer::new(Arc::new(distances));
    info!("Compatibility scorer initialized (backend: {})", scorer.backend());

    // Build app state
    let state = AppState {
        db,
        scorer: Arc::new(scorer),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the web app origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_distance_table(config: &Config) -> Result<NeighborhoodDistanceTable> {
    match &config.neighborhood_distances_path {
        Some(path) => NeighborhoodDistanceTable::from_json_file(path)
            .with_context(|| format!("Failed to load distance table from {}", path.display())),
        None => {
            let table = NeighborhoodDistanceTable::builtin();
            info!("Using built-in distance table ({} neighborhoods)", table.len());
            Ok(table)
        }
    }
}
