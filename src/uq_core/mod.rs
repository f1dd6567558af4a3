//! UQ Core - Measurement Aggregation and Outlier Detection Engine
//!
//! This module provides the per-source uncertainty-quantification pipeline:
//! summary statistics over raw material-quality measurements, idempotent
//! persistence keyed by source id, and quartile-based anomaly flagging.
//!
//! # Architecture
//!
//! ```text
//! SQLite Database → MeasurementReader → UqAggregator
//!     ↓
//! SourceSummary (mean, population std dev, reliability index)
//!     ↓
//! SummarySink → SqliteSummaryWriter (upsert on source_id)
//!
//! SQLite Database → MeasurementReader → OutlierDetector → OutlierReport
//! ```
//!
//! The two paths are independent: aggregation never feeds detection and
//! detection never touches the results table.

pub mod aggregator;
pub mod detector;
pub mod measurement;
pub mod sink;
pub mod sqlite_reader;
pub mod sqlite_writer;

pub use aggregator::UqAggregator;
pub use detector::{Outlier, OutlierDetector, OutlierReport};
pub use measurement::{Measurement, SourceRecord, SourceSummary};
pub use sink::{PersistenceError, SummarySink};
pub use sqlite_reader::{DataUnavailable, MeasurementReader};
pub use sqlite_writer::SqliteSummaryWriter;
