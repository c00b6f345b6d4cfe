use agency_cms::config::Config;
use agency_cms::diagnostics::{repair_order, scan, Severity};
use agency_cms::store::DocumentStore;
use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("diagnose=info".parse()?),
        )
        .init();

    info!("Starting content integrity scan");

    let config = Config::from_env()?;
    let store = DocumentStore::new(&config.database_path)?;

    // `diagnose --repair-order <collection>` reassigns sequential order
    // values before scanning.
    let args: Vec<String> = std::env::args().collect();
    if let Some(position) = args.iter().position(|a| a == "--repair-order") {
        let collection = args
            .get(position + 1)
            .ok_or_else(|| anyhow::anyhow!("--repair-order requires a collection name"))?;
        let repaired = repair_order(&store, collection)?;
        info!("✓ Reassigned order for {} document(s) in {}", repaired, collection);
    }

    let issues = scan(&store)?;
    if issues.is_empty() {
        info!("✓ No issues found");
        return Ok(());
    }

    let critical = issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .count();
    for issue in &issues {
        let marker = match issue.severity {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "warning",
        };
        println!("[{}] {}/{}: {}", marker, issue.collection, issue.doc_id, issue.description);
    }
    info!("Found {} issue(s), {} critical", issues.len(), critical);

    // Critical findings fail the run so CI pipelines notice.
    if critical > 0 {
        std::process::exit(1);
    }

    Ok(())
}
