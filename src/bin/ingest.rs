//! Ingest Binary - CSV to Measurement Store Population
//!
//! Clears the store, then loads source metadata and measurements from CSV.
//! Each run replaces the full data set; measurements are validated here so
//! downstream batch runs can trust every stored row.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin ingest
//! ```
//!
//! ## Environment Variables
//!
//! - UQFLOW_DB_PATH - SQLite database path (default: data/uqflow.db)
//! - SOURCES_CSV_PATH - Source metadata CSV (default: data/sources.csv)
//! - MEASUREMENTS_CSV_PATH - Measurement CSV (default: data/measurements.csv)
//! - RUST_LOG - Logging level (optional, default: info)

use std::path::PathBuf;
use uqflow::ingest::StoreIngestor;

#[derive(Debug)]
struct RunConfig {
    db_path: PathBuf,
    sources_csv: PathBuf,
    measurements_csv: PathBuf,
}

impl RunConfig {
    fn from_env() -> Self {
        Self {
            db_path: std::env::var("UQFLOW_DB_PATH")
                .unwrap_or_else(|_| "data/uqflow.db".to_string())
                .into(),
            sources_csv: std::env::var("SOURCES_CSV_PATH")
                .unwrap_or_else(|_| "data/sources.csv".to_string())
                .into(),
            measurements_csv: std::env::var("MEASUREMENTS_CSV_PATH")
                .unwrap_or_else(|_| "data/measurements.csv".to_string())
                .into(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = RunConfig::from_env();

    log::info!("🚀 Starting CSV ingestion");
    log::info!("   Database: {}", config.db_path.display());
    log::info!("   Sources CSV: {}", config.sources_csv.display());
    log::info!("   Measurements CSV: {}", config.measurements_csv.display());

    let mut ingestor = StoreIngestor::open(&config.db_path)?;
    ingestor.clear()?;

    let source_count = ingestor.load_sources(&config.sources_csv)?;
    let measurement_count = ingestor.load_measurements(&config.measurements_csv)?;

    log::info!(
        "✅ Ingestion complete: {} sources, {} measurements",
        source_count,
        measurement_count
    );
    Ok(())
}
