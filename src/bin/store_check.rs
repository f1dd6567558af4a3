//! Store Check Binary - Connection and Sample-Query Verification
//!
//! Ad-hoc operator check: confirms the store is reachable, prints a few
//! sample rows, and cross-checks the whole-population mean computed in SQL
//! against the flat statistics computed in process.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin store_check
//! ```
//!
//! ## Environment Variables
//!
//! - UQFLOW_DB_PATH - SQLite database path (default: data/uqflow.db)
//! - RUST_LOG - Logging level (optional, default: info)

use std::path::PathBuf;
use uqflow::sqlite_pragma::apply_optimized_pragmas;
use uqflow::uq_core::MeasurementReader;

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

/// Flat mean / population std dev / reliability over all values
fn flat_statistics(values: &[f64]) -> (f64, f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let reliability = if std_dev != 0.0 { mean / std_dev } else { 0.0 };
    (mean, std_dev, reliability)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = RunConfig::from_env();

    log::info!("🚀 Checking measurement store");
    log::info!("   Database: {}", config.db_path.display());

    let reader = MeasurementReader::open(&config.db_path)?;
    log::info!("✅ Connection successful");

    let measurements = reader.fetch_measurements(None)?;
    let source_ids = reader.fetch_distinct_source_ids()?;
    drop(reader);

    log::info!(
        "📥 {} measurements across {} sources",
        measurements.len(),
        source_ids.len()
    );
    for m in measurements.iter().take(5) {
        log::info!("   sample: {} = {}", m.source_id, m.test_value);
    }

    if measurements.is_empty() {
        log::warn!("Store is empty; nothing to cross-check");
        return Ok(());
    }

    // SQL-side mean, recomputed outside the aggregation code path
    let conn = rusqlite::Connection::open(&config.db_path)?;
    apply_optimized_pragmas(&conn)?;
    conn.execute("PRAGMA query_only = ON", [])?;
    let sql_mean: f64 =
        conn.query_row("SELECT AVG(test_value) FROM measurements", [], |row| {
            row.get(0)
        })?;

    let values: Vec<f64> = measurements.iter().map(|m| m.test_value).collect();
    let (mean, std_dev, reliability) = flat_statistics(&values);

    log::info!("📊 Whole-population statistics:");
    log::info!("   Mean (SQL):        {}", sql_mean);
    log::info!("   Mean (in-process): {}", mean);
    log::info!("   Std deviation:     {}", std_dev);
    log::info!("   Reliability index: {}", reliability);

    if (sql_mean - mean).abs() > 1e-9 * mean.abs().max(1.0) {
        return Err(format!(
            "mean mismatch between SQL ({}) and in-process ({}) computation",
            sql_mean, mean
        )
        .into());
    }

    log::info!("✅ Store check passed");
    Ok(())
}
