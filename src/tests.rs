#[cfg(test)]
mod tests {
    use crate::uq_core::{Measurement, OutlierDetector, UqAggregator};

    /// Aggregation and detection run over the same measurement set but stay
    /// independent: detection sees the flat cross-source distribution.
    #[test]
    fn test_aggregation_and_detection_are_independent_paths() {
        let mut measurements: Vec<Measurement> = (1..=10)
            .map(|v| Measurement::new("A", v as f64))
            .collect();
        measurements.push(Measurement::new("B", 100.0));

        let summaries = UqAggregator::new().aggregate(&measurements);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].source_id, "A");
        assert_eq!(summaries[0].mean_value, 5.5);
        // Single-measurement group: zero variance sentinel
        assert_eq!(summaries[1].source_id, "B");
        assert_eq!(summaries[1].reliability_index, 0.0);

        let values: Vec<f64> = measurements.iter().map(|m| m.test_value).collect();
        let report = OutlierDetector::with_defaults().detect(&values);

        // B's lone value is an outlier of the flat distribution even though
        // it is perfectly ordinary within its own group
        assert_eq!(report.outliers.len(), 1);
        assert_eq!(report.outliers[0].index, 10);
        assert_eq!(report.outliers[0].value, 100.0);
    }

    /// Detector input order matches reader output order, so indices in the
    /// report can be mapped back to measurement rows by the caller.
    #[test]
    fn test_report_indices_align_with_measurement_order() {
        let measurements = vec![
            Measurement::new("A", -900.0),
            Measurement::new("B", 5.0),
            Measurement::new("A", 5.5),
            Measurement::new("B", 6.0),
            Measurement::new("C", 4.5),
            Measurement::new("C", 5.2),
            Measurement::new("A", 900.0),
        ];

        let values: Vec<f64> = measurements.iter().map(|m| m.test_value).collect();
        let report = OutlierDetector::with_defaults().detect(&values);

        assert_eq!(report.outliers.len(), 2);
        assert_eq!(measurements[report.outliers[0].index].test_value, -900.0);
        assert_eq!(measurements[report.outliers[1].index].test_value, 900.0);
    }
}
