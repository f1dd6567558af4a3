//! Quartile-based outlier detection with configurable IQR multiplier

use serde::Serialize;

/// A flagged value with its position in the original input sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlier {
    pub index: usize,
    pub value: f64,
}

/// Derived per invocation from the full measurement set, never persisted
#[derive(Debug, Clone, Serialize)]
pub struct OutlierReport {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub outliers: Vec<Outlier>,
}

pub struct OutlierDetector {
    iqr_multiplier: f64,
}

impl OutlierDetector {
    pub fn new(iqr_multiplier: f64) -> Self {
        Self { iqr_multiplier }
    }

    pub fn with_defaults() -> Self {
        Self::new(1.5)
    }

    /// Tukey's IQR rule over a flat value sequence.
    ///
    /// Q1 and Q3 use linear interpolation between order statistics (the
    /// default quantile method in pandas, NumPy, and R). A value is flagged
    /// when strictly below `Q1 − k·IQR` or strictly above `Q3 + k·IQR`.
    /// Flagged values keep their original relative order and index.
    ///
    /// Fewer than 2 elements collapse the bounds onto the single value via
    /// the same formula; empty input returns an empty report.
    pub fn detect(&self, values: &[f64]) -> OutlierReport {
        if values.is_empty() {
            return OutlierReport {
                lower_bound: 0.0,
                upper_bound: 0.0,
                outliers: Vec::new(),
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower_bound = q1 - self.iqr_multiplier * iqr;
        let upper_bound = q3 + self.iqr_multiplier * iqr;

        let outliers = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| v < lower_bound || v > upper_bound)
            .map(|(index, &value)| Outlier { index, value })
            .collect();

        OutlierReport {
            lower_bound,
            upper_bound,
            outliers,
        }
    }
}

/// Linear-interpolation quantile on pre-sorted data.
///
/// For sorted x[0..n] and p in [0, 1]: h = (n − 1) × p, j = ⌊h⌋,
/// g = h − j, result = (1 − g) × x[j] + g × x[j+1].
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - j as f64;

    if j + 1 >= n {
        return sorted[n - 1];
    }
    (1.0 - g) * sorted[j] + g * sorted[j + 1]
}
