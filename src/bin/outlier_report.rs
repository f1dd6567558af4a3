//! Outlier Report Binary - IQR Detection Over All Measurements
//!
//! Pulls every test value system-wide into one flat distribution, applies
//! Tukey's IQR rule, logs a summary, and prints the report as JSON on
//! stdout for downstream display tooling.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin outlier_report
//! ```
//!
//! ## Environment Variables
//!
//! - UQFLOW_DB_PATH - SQLite database path (default: data/uqflow.db)
//! - IQR_MULTIPLIER - Bound width as a multiple of IQR (default: 1.5)
//! - RUST_LOG - Logging level (optional, default: info)

use std::path::PathBuf;
use uqflow::uq_core::{MeasurementReader, OutlierDetector};

#[derive(Debug)]
struct RunConfig {
    db_path: PathBuf,
    iqr_multiplier: f64,
}

impl RunConfig {
    fn from_env() -> Self {
        Self {
            db_path: std::env::var("UQFLOW_DB_PATH")
                .unwrap_or_else(|_| "data/uqflow.db".to_string())
                .into(),
            iqr_multiplier: std::env::var("IQR_MULTIPLIER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.5),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = RunConfig::from_env();

    log::info!("🚀 Starting outlier detection run");
    log::info!("   Database: {}", config.db_path.display());
    log::info!("   IQR multiplier: {}", config.iqr_multiplier);

    let reader = MeasurementReader::open(&config.db_path)?;
    let measurements = reader.fetch_measurements(None)?;
    drop(reader);

    let values: Vec<f64> = measurements.iter().map(|m| m.test_value).collect();
    log::info!("📥 Fetched {} test values", values.len());

    let detector = OutlierDetector::new(config.iqr_multiplier);
    let report = detector.detect(&values);

    if values.is_empty() {
        log::warn!("No data available to analyze");
    } else {
        log::info!(
            "📊 Bounds: [{:.4}, {:.4}]",
            report.lower_bound,
            report.upper_bound
        );
        if report.outliers.is_empty() {
            log::info!("✅ No outliers found in {} test values", values.len());
        } else {
            log::info!("🎯 Found {} outliers", report.outliers.len());
            for outlier in &report.outliers {
                log::info!(
                    "   {} (source: {}, row index: {})",
                    outlier.value,
                    measurements[outlier.index].source_id,
                    outlier.index
                );
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
