//! UQFlow - Material-quality UQ batch tools
//!
//! Ingests per-source material-quality measurements, computes per-source
//! uncertainty-quantification summaries (mean, population standard
//! deviation, reliability index), persists them idempotently into SQLite,
//! and flags anomalous measurements with Tukey's IQR rule. Entry points
//! live in `src/bin/`; each runs one batch operation to completion.

#[cfg(test)]
mod tests;

pub mod export;
pub mod ingest;
pub mod sqlite_pragma;
pub mod uq_core;
