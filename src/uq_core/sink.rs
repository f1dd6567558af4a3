//! Results upsert sink contract

use super::measurement::SourceSummary;
use async_trait::async_trait;

#[derive(Debug)]
pub enum PersistenceError {
    Database(rusqlite::Error),
    Io(std::io::Error),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        PersistenceError::Database(err)
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err)
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Database(e) => write!(f, "Database error: {}", e),
            PersistenceError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Persists one summary row per source id. The source id is the conflict
/// key: insert when absent, replace the statistic fields in place when
/// present. Each upsert is its own unit of work; there is no cross-record
/// transaction, so a failure on one source id leaves the others untouched.
#[async_trait]
pub trait SummarySink: Send {
    /// Insert or overwrite the summary row for `summary.source_id`
    async fn upsert_summary(&mut self, summary: &SourceSummary) -> Result<(), PersistenceError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}
