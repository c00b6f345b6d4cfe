use agency_cms::config::Config;
use agency_cms::http::{router, AppState};
use agency_cms::store::DocumentStore;
use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agency_cms=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting agency content service");

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;

    // Open the document store
    let store = DocumentStore::new(&config.database_path)?;

    let state = AppState::new(config, store)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .context(format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
