mod config;
mod db;
mod errors;
mod layout;
mod models;
mod routes;
mod seating;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::seating::{MemorySheet, PgSheetRepository, SeatingEngine, TableRepository};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting seating API v{}", env!("CARGO_PKG_VERSION"));

    let repo = build_repository(&config).await?;

    // Load the table set once per session; mutations keep it in sync afterwards.
    let mut engine = SeatingEngine::new(repo);
    let loaded = engine
        .load_all()
        .await
        .context("Failed to load tables from the record store")?
        .len();
    info!("Seating engine ready with {loaded} tables");

    let state = AppState::new(engine, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// PostgreSQL worksheet when `DATABASE_URL` is set, otherwise an in-process sheet.
async fn build_repository(config: &Config) -> Result<Arc<dyn TableRepository>> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.store_timeout).await?;
            let repo = PgSheetRepository::new(pool, &config.sheet_name, config.store_timeout);
            repo.ensure_schema()
                .await
                .context("Failed to prepare the worksheet table")?;
            Ok(Arc::new(repo))
        }
        None => {
            warn!("DATABASE_URL not set; tables are kept in memory and lost on exit");
            Ok(Arc::new(MemorySheet::new()))
        }
    }
}
