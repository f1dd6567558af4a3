//! Read-only SQLite access to the measurement store
//!
//! The core never mutates raw measurements; the reader connection enforces
//! this with `PRAGMA query_only`.

use super::measurement::Measurement;
use crate::sqlite_pragma::apply_optimized_pragmas;
use rusqlite::Connection;
use std::path::Path;

#[derive(Debug)]
pub enum DataUnavailable {
    Database(rusqlite::Error),
    Connection(String),
}

impl From<rusqlite::Error> for DataUnavailable {
    fn from(err: rusqlite::Error) -> Self {
        DataUnavailable::Database(err)
    }
}

impl std::fmt::Display for DataUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataUnavailable::Database(e) => write!(f, "Measurement read failed: {}", e),
            DataUnavailable::Connection(msg) => write!(f, "Measurement store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for DataUnavailable {}

/// Read-only handle on the measurement store
pub struct MeasurementReader {
    conn: Connection,
}

impl MeasurementReader {
    /// Open the store for reading.
    ///
    /// Fails with `DataUnavailable::Connection` when the database file does
    /// not exist, rather than letting SQLite create an empty one.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, DataUnavailable> {
        let path = db_path.as_ref();
        if !path.exists() {
            return Err(DataUnavailable::Connection(format!(
                "database not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)?;
        apply_optimized_pragmas(&conn)?;

        // Read-only mode prevents write locks (must be after PRAGMAs)
        conn.execute("PRAGMA query_only = ON", [])?;

        log::info!("📥 Measurement reader opened: {}", path.display());
        Ok(Self { conn })
    }

    /// Fetch measurements, optionally restricted to one source id.
    ///
    /// Rows come back in insertion order.
    pub fn fetch_measurements(
        &self,
        source_id: Option<&str>,
    ) -> Result<Vec<Measurement>, DataUnavailable> {
        let mut measurements = Vec::new();

        match source_id {
            Some(id) => {
                let mut stmt = self.conn.prepare(
                    "SELECT source_id, test_value FROM measurements
                     WHERE source_id = ?1
                     ORDER BY id ASC",
                )?;
                let rows = stmt.query_map([id], |row| {
                    Ok(Measurement {
                        source_id: row.get(0)?,
                        test_value: row.get(1)?,
                    })
                })?;
                for row in rows {
                    measurements.push(row?);
                }
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT source_id, test_value FROM measurements
                     ORDER BY id ASC",
                )?;
                let rows = stmt.query_map([], |row| {
                    Ok(Measurement {
                        source_id: row.get(0)?,
                        test_value: row.get(1)?,
                    })
                })?;
                for row in rows {
                    measurements.push(row?);
                }
            }
        }

        log::debug!("📥 Fetched {} measurements", measurements.len());
        Ok(measurements)
    }

    /// Distinct source ids currently present in the measurement table
    pub fn fetch_distinct_source_ids(&self) -> Result<Vec<String>, DataUnavailable> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT source_id FROM measurements
             ORDER BY source_id ASC",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        Ok(ids)
    }
}
