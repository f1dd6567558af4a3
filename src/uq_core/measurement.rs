//! Typed records for the measurement store and UQ results

use serde::{Deserialize, Serialize};

/// One raw material-quality measurement. Many measurements map to one
/// source id; rows are immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub source_id: String,
    pub test_value: f64,
}

impl Measurement {
    pub fn new(source_id: impl Into<String>, test_value: f64) -> Self {
        Self {
            source_id: source_id.into(),
            test_value,
        }
    }

    /// Validated once at the ingestion boundary, never at use sites
    pub fn is_valid(&self) -> bool {
        !self.source_id.is_empty() && self.test_value.is_finite()
    }
}

/// Per-source UQ summary produced by one aggregation run.
///
/// `standard_deviation` is the population standard deviation (denominator
/// n). `reliability_index` is mean / std dev, or exactly 0.0 for a
/// zero-variance group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub source_id: String,
    pub mean_value: f64,
    pub standard_deviation: f64,
    pub reliability_index: f64,
}

/// Source metadata loaded from CSV, consumed only by the export join
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRecord {
    pub source_id: String,
    pub source_name: String,
    pub latitude: f64,
    pub longitude: f64,
}
