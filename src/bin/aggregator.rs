//! Aggregator Binary - Full-Population UQ Summary Run
//!
//! Reads every measurement, computes one UQ summary per source id, and
//! upserts the summaries into the results table.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin aggregator
//! ```
//!
//! ## Environment Variables
//!
//! - UQFLOW_DB_PATH - SQLite database path (default: data/uqflow.db)
//! - RUST_LOG - Logging level (optional, default: info)

use std::path::PathBuf;
use uqflow::uq_core::{MeasurementReader, SqliteSummaryWriter, SummarySink, UqAggregator};

#[derive(Debug)]
struct RunConfig {
    db_path: PathBuf,
}

impl RunConfig {
    fn from_env() -> Self {
        Self {
            db_path: std::env::var("UQFLOW_DB_PATH")
                .unwrap_or_else(|_| "data/uqflow.db".to_string())
                .into(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = RunConfig::from_env();

    log::info!("🚀 Starting full-population UQ aggregation");
    log::info!("   Database: {}", config.db_path.display());

    let reader = MeasurementReader::open(&config.db_path)?;
    let measurements = reader.fetch_measurements(None)?;
    let source_ids = reader.fetch_distinct_source_ids()?;
    drop(reader);

    log::info!(
        "📥 Fetched {} measurements across {} sources",
        measurements.len(),
        source_ids.len()
    );

    let summaries = UqAggregator::new().aggregate(&measurements);
    log::info!("📊 Computed {} source summaries", summaries.len());

    let mut writer = SqliteSummaryWriter::open(&config.db_path)?;
    log::info!("📊 Backend: {}", writer.backend_type());

    // Each upsert is its own unit of work; keep going on failure and
    // report at the end so earlier rows stay persisted
    let mut failures = 0;
    for summary in &summaries {
        if let Err(e) = writer.upsert_summary(summary).await {
            log::error!("Failed to upsert summary for {}: {}", summary.source_id, e);
            failures += 1;
        }
    }

    log::info!(
        "✅ Upserted {} summaries ({} failures)",
        summaries.len() - failures,
        failures
    );

    if failures > 0 {
        return Err(format!("{} summary upserts failed", failures).into());
    }
    Ok(())
}
