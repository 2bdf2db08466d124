mod config;
mod errors;
mod jobs;
mod models;
mod prefs;
mod routes;
mod session;
mod state;
mod store;
mod submission;
mod uploads;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::JobCache;
use crate::prefs::Preferences;
use crate::routes::build_router;
use crate::session::Session;
use crate::state::AppState;
use crate::store::PgStore;
use crate::uploads::FileStorage;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillSync API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the document store
    let store = Arc::new(PgStore::connect(&config.database_url).await?);

    // Initialize the uploads tree
    let files = Arc::new(FileStorage::new(&config.uploads_dir));
    info!("File storage rooted at {}", files.root().display());

    // Restore any persisted session and preferences
    let session = Arc::new(Session::restore(&config.session_file).await);
    let prefs = Arc::new(Preferences::load(&config.prefs_file).await);

    // Build app state
    let state = AppState {
        store,
        files,
        jobs: Arc::new(JobCache::new()),
        session,
        prefs,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
