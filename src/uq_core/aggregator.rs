//! Per-source UQ aggregation: mean, population standard deviation,
//! reliability index

use super::measurement::{Measurement, SourceSummary};
use std::collections::HashMap;

pub struct UqAggregator;

impl UqAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Compute one summary per distinct source id present in the input.
    ///
    /// # Semantics
    /// - mean = Σv / n
    /// - standard deviation uses the population formula (denominator n,
    ///   not n − 1)
    /// - reliability index = mean / std dev, or 0.0 when std dev is 0
    ///
    /// Empty input yields an empty result. Groups are independent; output
    /// is sorted by source id for stable ordering across runs.
    pub fn aggregate(&self, measurements: &[Measurement]) -> Vec<SourceSummary> {
        let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
        for m in measurements {
            groups
                .entry(m.source_id.as_str())
                .or_default()
                .push(m.test_value);
        }

        let mut summaries: Vec<SourceSummary> = groups
            .into_iter()
            .map(|(source_id, values)| summarize(source_id, &values))
            .collect();

        summaries.sort_by(|a, b| a.source_id.cmp(&b.source_id));
        summaries
    }
}

fn summarize(source_id: &str, values: &[f64]) -> SourceSummary {
    let n = values.len() as f64;
    let mean_value = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| (v - mean_value).powi(2))
        .sum::<f64>()
        / n;
    let standard_deviation = variance.sqrt();

    // Zero variance is a defined sentinel, not an error
    let reliability_index = if standard_deviation != 0.0 {
        mean_value / standard_deviation
    } else {
        0.0
    };

    SourceSummary {
        source_id: source_id.to_string(),
        mean_value,
        standard_deviation,
        reliability_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(pairs: &[(&str, f64)]) -> Vec<Measurement> {
        pairs
            .iter()
            .map(|(id, v)| Measurement::new(*id, *v))
            .collect()
    }

    #[test]
    fn test_multi_source_aggregation() {
        let input = measurements(&[
            ("A", 1.0),
            ("B", 10.0),
            ("A", 2.0),
            ("B", 10.0),
            ("A", 3.0),
            ("B", 10.0),
        ]);

        let summaries = UqAggregator::new().aggregate(&input);
        assert_eq!(summaries.len(), 2);

        let a = &summaries[0];
        assert_eq!(a.source_id, "A");
        assert_eq!(a.mean_value, 2.0);
        assert!((a.standard_deviation - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((a.reliability_index - 2.0 / (2.0f64 / 3.0).sqrt()).abs() < 1e-12);

        let b = &summaries[1];
        assert_eq!(b.source_id, "B");
        assert_eq!(b.mean_value, 10.0);
        assert_eq!(b.standard_deviation, 0.0);
        assert_eq!(b.reliability_index, 0.0);
    }

    #[test]
    fn test_zero_variance_group_uses_sentinel() {
        let input = measurements(&[("S", 5.0), ("S", 5.0), ("S", 5.0)]);

        let summaries = UqAggregator::new().aggregate(&input);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].mean_value, 5.0);
        assert_eq!(summaries[0].standard_deviation, 0.0);
        assert_eq!(summaries[0].reliability_index, 0.0);
        assert!(!summaries[0].reliability_index.is_nan());
    }

    #[test]
    fn test_population_not_sample_formula() {
        // [2, 4]: population std = 1.0, sample std would be sqrt(2)
        let input = measurements(&[("S", 2.0), ("S", 4.0)]);

        let summaries = UqAggregator::new().aggregate(&input);
        assert_eq!(summaries[0].standard_deviation, 1.0);
    }

    #[test]
    fn test_single_measurement_group() {
        let input = measurements(&[("S", 7.25)]);

        let summaries = UqAggregator::new().aggregate(&input);
        assert_eq!(summaries[0].mean_value, 7.25);
        assert_eq!(summaries[0].standard_deviation, 0.0);
        assert_eq!(summaries[0].reliability_index, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let summaries = UqAggregator::new().aggregate(&[]);
        assert!(summaries.is_empty());
    }

    #[test]
    fn test_reliability_matches_mean_over_std() {
        let input = measurements(&[("S", 1.0), ("S", 2.0), ("S", 6.0)]);

        let summaries = UqAggregator::new().aggregate(&input);
        let s = &summaries[0];
        assert!(s.standard_deviation > 0.0);
        assert_eq!(s.reliability_index, s.mean_value / s.standard_deviation);
    }
}
