use agency_cms::config::Config;
use agency_cms::seo::static_routes;
use agency_cms::sitemap::{build_sitemap, published_post_slugs, team_slugs};
use agency_cms::store::DocumentStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("generate_sitemap=info".parse()?),
        )
        .init();

    info!("Starting sitemap generation");

    // Load config from environment
    let config = Config::from_env()?;
    let store = DocumentStore::new(&config.database_path)?;

    let team = team_slugs(&store)?;
    let posts = published_post_slugs(&store)?;
    let xml = build_sitemap(&config.base_url, static_routes(), &team, &posts);

    if let Some(parent) = Path::new(&config.sitemap_path).parent() {
        fs::create_dir_all(parent).context("Failed to create sitemap directory")?;
    }
    fs::write(&config.sitemap_path, &xml)
        .context(format!("Failed to write {}", config.sitemap_path))?;

    info!(
        "✓ Wrote {} entries to {}",
        xml.matches("<url>").count(),
        config.sitemap_path
    );

    Ok(())
}
