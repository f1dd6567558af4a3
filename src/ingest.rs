//! CSV ingestion boundary: clears and repopulates the measurement store
//!
//! Measurement rows are validated here once (finite value, non-empty source
//! id); downstream code trusts stored rows.

use crate::sqlite_pragma::apply_optimized_pragmas;
use crate::uq_core::{Measurement, SourceRecord};
use rusqlite::{params, Connection};
use std::path::Path;

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidValue(String),
    Database(rusqlite::Error),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err)
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Csv(err)
    }
}

impl From<rusqlite::Error> for IngestError {
    fn from(err: rusqlite::Error) -> Self {
        IngestError::Database(err)
    }
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::Io(e) => write!(f, "IO error: {}", e),
            IngestError::Csv(e) => write!(f, "CSV error: {}", e),
            IngestError::InvalidValue(msg) => write!(f, "Invalid measurement: {}", msg),
            IngestError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for IngestError {}

/// Write handle used only by the ingestion entry point
pub struct StoreIngestor {
    conn: Connection,
}

impl StoreIngestor {
    /// Open (or create) the store and ensure the ingestion-side schema
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, IngestError> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        apply_optimized_pragmas(&conn)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS measurements (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                source_id   TEXT NOT NULL,
                test_value  REAL NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_measurements_source
             ON measurements(source_id)",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS sources (
                source_id   TEXT PRIMARY KEY,
                source_name TEXT NOT NULL,
                latitude    REAL NOT NULL,
                longitude   REAL NOT NULL
            )",
            [],
        )?;

        log::info!("✅ Ingestion store initialized");
        Ok(Self { conn })
    }

    /// Delete existing rows; each ingest run replaces the full data set.
    /// Measurements go first, sources last.
    pub fn clear(&self) -> Result<(), IngestError> {
        let removed_measurements = self.conn.execute("DELETE FROM measurements", [])?;
        let removed_sources = self.conn.execute("DELETE FROM sources", [])?;
        log::info!(
            "🧹 Cleared store ({} measurements, {} sources)",
            removed_measurements,
            removed_sources
        );
        Ok(())
    }

    /// Load source metadata from a CSV with headers
    /// `source_id,source_name,latitude,longitude`
    pub fn load_sources(&mut self, csv_path: impl AsRef<Path>) -> Result<usize, IngestError> {
        let mut reader = csv::Reader::from_path(&csv_path)?;

        let tx = self.conn.transaction()?;
        let mut count = 0;
        for result in reader.deserialize() {
            let record: SourceRecord = result?;
            tx.execute(
                "INSERT OR REPLACE INTO sources (source_id, source_name, latitude, longitude)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    record.source_id,
                    record.source_name,
                    record.latitude,
                    record.longitude
                ],
            )?;
            count += 1;
        }
        tx.commit()?;

        log::info!(
            "✅ Loaded {} source records from {}",
            count,
            csv_path.as_ref().display()
        );
        Ok(count)
    }

    /// Load measurements from a CSV with headers `source_id,test_value`.
    ///
    /// Rejects the whole file on the first invalid row; nothing is
    /// committed in that case.
    pub fn load_measurements(&mut self, csv_path: impl AsRef<Path>) -> Result<usize, IngestError> {
        let mut reader = csv::Reader::from_path(&csv_path)?;

        let tx = self.conn.transaction()?;
        let mut count = 0;
        for (row_idx, result) in reader.deserialize().enumerate() {
            let measurement: Measurement = result?;
            if !measurement.is_valid() {
                return Err(IngestError::InvalidValue(format!(
                    "row {}: source '{}' has non-finite or unusable test value {}",
                    row_idx + 1,
                    measurement.source_id,
                    measurement.test_value
                )));
            }
            tx.execute(
                "INSERT INTO measurements (source_id, test_value) VALUES (?1, ?2)",
                params![measurement.source_id, measurement.test_value],
            )?;
            count += 1;
        }
        tx.commit()?;

        log::info!(
            "✅ Loaded {} measurements from {}",
            count,
            csv_path.as_ref().display()
        );
        Ok(count)
    }
}
