use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::seating::SeatingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The session's table set. Locked for the full duration of each operation,
    /// store round trip included, so operations never interleave.
    pub seating: Arc<Mutex<SeatingEngine>>,
    pub config: Config,
}

impl AppState {
    pub fn new(engine: SeatingEngine, config: Config) -> Self {
        Self {
            seating: Arc::new(Mutex::new(engine)),
            config,
        }
    }
}
