//! SQLite results sink with upsert-on-source-id semantics
//!
//! One `uq_results` row per source id. Re-running aggregation overwrites
//! the statistic fields in place; `created_at` survives overwrites and
//! `updated_at` is refreshed. Rows for source ids that later vanish from
//! the measurement set are retained as last-known summaries.

use super::measurement::SourceSummary;
use super::sink::{PersistenceError, SummarySink};
use crate::sqlite_pragma::apply_optimized_pragmas;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

pub struct SqliteSummaryWriter {
    conn: Connection,
}

impl SqliteSummaryWriter {
    /// Open (or create) the results store and ensure the results schema
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        apply_optimized_pragmas(&conn)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS uq_results (
                source_id           TEXT PRIMARY KEY,
                mean_value          REAL NOT NULL,
                standard_deviation  REAL NOT NULL,
                reliability_index   REAL NOT NULL,
                updated_at          INTEGER NOT NULL,
                created_at          INTEGER NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_uq_results_updated
             ON uq_results(updated_at DESC)",
            [],
        )?;

        log::info!("✅ Results writer initialized");
        Ok(Self { conn })
    }
}

#[async_trait]
impl SummarySink for SqliteSummaryWriter {
    /// One statement per summary, no batch transaction: a failed upsert
    /// leaves rows persisted by earlier calls in place.
    async fn upsert_summary(&mut self, summary: &SourceSummary) -> Result<(), PersistenceError> {
        let now = Utc::now().timestamp();

        self.conn.execute(
            "INSERT INTO uq_results (
                source_id, mean_value, standard_deviation, reliability_index,
                updated_at, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(source_id) DO UPDATE SET
                mean_value = excluded.mean_value,
                standard_deviation = excluded.standard_deviation,
                reliability_index = excluded.reliability_index,
                updated_at = excluded.updated_at",
            params![
                summary.source_id,
                summary.mean_value,
                summary.standard_deviation,
                summary.reliability_index,
                now,
                now,
            ],
        )?;

        log::debug!(
            "✅ Summary upserted: {} (mean: {:.4}, std: {:.4}, reliability: {:.4})",
            summary.source_id,
            summary.mean_value,
            summary.standard_deviation,
            summary.reliability_index
        );

        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}
