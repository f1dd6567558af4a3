//! Export Binary - Source Metadata × UQ Summaries as CSV
//!
//! Joins the sources table with the results table and writes one CSV row
//! per summarized source.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin export_csv
//! ```
//!
//! ## Environment Variables
//!
//! - UQFLOW_DB_PATH - SQLite database path (default: data/uqflow.db)
//! - EXPORT_CSV_PATH - Output file (default: data/exported_data_with_uq.csv)
//! - RUST_LOG - Logging level (optional, default: info)

use std::path::PathBuf;
use uqflow::export::export_to_csv;

#[derive(Debug)]
struct RunConfig {
    db_path: PathBuf,
    export_csv: PathBuf,
}

impl RunConfig {
    fn from_env() -> Self {
        Self {
            db_path: std::env::var("UQFLOW_DB_PATH")
                .unwrap_or_else(|_| "data/uqflow.db".to_string())
                .into(),
            export_csv: std::env::var("EXPORT_CSV_PATH")
                .unwrap_or_else(|_| "data/exported_data_with_uq.csv".to_string())
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

    log::info!("🚀 Starting UQ summary export");
    log::info!("   Database: {}", config.db_path.display());
    log::info!("   Output: {}", config.export_csv.display());

    let count = export_to_csv(&config.db_path, &config.export_csv)?;

    log::info!("✅ Export complete: {} rows", count);
    Ok(())
}
