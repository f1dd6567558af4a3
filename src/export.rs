//! CSV export of source metadata joined with persisted UQ summaries
//!
//! Mirrors the results table outward: one row per summarized source.
//! Sources without a summary are omitted by the join; summaries whose
//! source metadata was never loaded are omitted as well.

use crate::sqlite_pragma::apply_optimized_pragmas;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Database(rusqlite::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Csv(err)
    }
}

impl From<rusqlite::Error> for ExportError {
    fn from(err: rusqlite::Error) -> Self {
        ExportError::Database(err)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Csv(e) => write!(f, "CSV error: {}", e),
            ExportError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// One exported row: source metadata plus its current summary
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub source_id: String,
    pub source_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mean_value: f64,
    pub standard_deviation: f64,
    pub reliability_index: f64,
}

/// Join `sources` with `uq_results`, ordered by source id
pub fn fetch_export_rows(conn: &Connection) -> Result<Vec<ExportRow>, ExportError> {
    let mut stmt = conn.prepare(
        "SELECT s.source_id, s.source_name, s.latitude, s.longitude,
                u.mean_value, u.standard_deviation, u.reliability_index
         FROM sources s
         JOIN uq_results u ON s.source_id = u.source_id
         ORDER BY s.source_id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ExportRow {
            source_id: row.get(0)?,
            source_name: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            mean_value: row.get(4)?,
            standard_deviation: row.get(5)?,
            reliability_index: row.get(6)?,
        })
    })?;

    let mut export_rows = Vec::new();
    for row in rows {
        export_rows.push(row?);
    }
    Ok(export_rows)
}

/// Export the joined rows to a CSV file. Returns the row count.
pub fn export_to_csv(
    db_path: impl AsRef<Path>,
    csv_path: impl AsRef<Path>,
) -> Result<usize, ExportError> {
    let conn = Connection::open(db_path)?;
    apply_optimized_pragmas(&conn)?;
    conn.execute("PRAGMA query_only = ON", [])?;

    let rows = fetch_export_rows(&conn)?;

    if let Some(parent) = csv_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(&csv_path)?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    log::info!(
        "✅ Exported {} rows to {}",
        rows.len(),
        csv_path.as_ref().display()
    );
    Ok(rows.len())
}
