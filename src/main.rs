use anyhow::Result;
use std::sync::Arc;

mod config;
mod error;
mod logging;
mod models;
mod routes;
mod services;

use services::{profile::DatasetProfiler, store::DatasetStore};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may carry RUST_LOG, so load it before the subscriber
    dotenvy::dotenv().ok();
    logging::init_logging()?;

    let config = config::load_config()?;
    let addr = config.socket_addr();

    let state = Arc::new(AppState::new(config));
    let app = routes::router(state);

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Application state
pub struct AppState {
    config: config::Config,
    store: DatasetStore,
    profiler: DatasetProfiler,
}

impl AppState {
    fn new(config: config::Config) -> Self {
        let store = DatasetStore::new(config.max_cached_datasets);
        let profiler = DatasetProfiler::new(config.preview_rows);
        Self {
            config,
            store,
            profiler,
        }
    }
}
