//! End-to-end batch flow over a temporary store
//!
//! Exercises the full operator sequence: CSV ingest → read → aggregate →
//! upsert → re-run → detect → export, asserting the persisted state after
//! each step.

#[cfg(test)]
mod batch_integration_tests {
    use rusqlite::Connection;
    use tempfile::tempdir;
    use uqflow::export::export_to_csv;
    use uqflow::ingest::StoreIngestor;
    use uqflow::uq_core::{
        MeasurementReader, OutlierDetector, SqliteSummaryWriter, SummarySink, UqAggregator,
    };

    const SOURCES_CSV: &str = "\
source_id,source_name,latitude,longitude
A,North Quarry,45.1,-93.2
B,South Pit,44.8,-93.5
C,East Bank,45.3,-92.9
";

    const MEASUREMENTS_CSV: &str = "\
source_id,test_value
A,1.0
A,2.0
A,3.0
B,10.0
B,10.0
B,10.0
C,5.0
C,6.0
C,500.0
";

    fn setup_store(dir: &std::path::Path) -> std::path::PathBuf {
        let db_path = dir.join("uqflow.db");
        let sources_csv = dir.join("sources.csv");
        let measurements_csv = dir.join("measurements.csv");
        std::fs::write(&sources_csv, SOURCES_CSV).unwrap();
        std::fs::write(&measurements_csv, MEASUREMENTS_CSV).unwrap();

        let mut ingestor = StoreIngestor::open(&db_path).unwrap();
        ingestor.clear().unwrap();
        ingestor.load_sources(&sources_csv).unwrap();
        ingestor.load_measurements(&measurements_csv).unwrap();

        db_path
    }

    #[tokio::test]
    async fn test_ingest_aggregate_upsert_flow() {
        let dir = tempdir().unwrap();
        let db_path = setup_store(dir.path());

        let reader = MeasurementReader::open(&db_path).unwrap();
        let measurements = reader.fetch_measurements(None).unwrap();
        assert_eq!(measurements.len(), 9);
        assert_eq!(
            reader.fetch_distinct_source_ids().unwrap(),
            vec!["A", "B", "C"]
        );
        drop(reader);

        let summaries = UqAggregator::new().aggregate(&measurements);
        assert_eq!(summaries.len(), 3);

        let a = &summaries[0];
        assert_eq!(a.mean_value, 2.0);
        assert!((a.standard_deviation - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);

        let b = &summaries[1];
        assert_eq!(b.mean_value, 10.0);
        assert_eq!(b.standard_deviation, 0.0);
        assert_eq!(b.reliability_index, 0.0);

        let mut writer = SqliteSummaryWriter::open(&db_path).unwrap();
        for summary in &summaries {
            writer.upsert_summary(summary).await.unwrap();
        }
        drop(writer);

        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM uq_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = setup_store(dir.path());

        for _ in 0..2 {
            let reader = MeasurementReader::open(&db_path).unwrap();
            let measurements = reader.fetch_measurements(None).unwrap();
            drop(reader);

            let summaries = UqAggregator::new().aggregate(&measurements);
            let mut writer = SqliteSummaryWriter::open(&db_path).unwrap();
            for summary in &summaries {
                writer.upsert_summary(summary).await.unwrap();
            }
        }

        // Two full runs, still exactly one row per source
        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM uq_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let a_mean: f64 = conn
            .query_row(
                "SELECT mean_value FROM uq_results WHERE source_id = 'A'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(a_mean, 2.0);
    }

    #[tokio::test]
    async fn test_vanished_source_keeps_stale_summary() {
        let dir = tempdir().unwrap();
        let db_path = setup_store(dir.path());

        let run = |db_path: std::path::PathBuf| async move {
            let reader = MeasurementReader::open(&db_path).unwrap();
            let measurements = reader.fetch_measurements(None).unwrap();
            drop(reader);
            let summaries = UqAggregator::new().aggregate(&measurements);
            let mut writer = SqliteSummaryWriter::open(&db_path).unwrap();
            for summary in &summaries {
                writer.upsert_summary(summary).await.unwrap();
            }
        };

        run(db_path.clone()).await;

        // Source C disappears from the measurement set between runs
        let conn = Connection::open(&db_path).unwrap();
        conn.execute("DELETE FROM measurements WHERE source_id = 'C'", [])
            .unwrap();
        drop(conn);

        run(db_path.clone()).await;

        // C's last-known summary is retained, not reconciled away
        let conn = Connection::open(&db_path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM uq_results", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 3);

        let c_mean: f64 = conn
            .query_row(
                "SELECT mean_value FROM uq_results WHERE source_id = 'C'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!((c_mean - 511.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_detection_over_stored_values() {
        let dir = tempdir().unwrap();
        let db_path = setup_store(dir.path());

        let reader = MeasurementReader::open(&db_path).unwrap();
        let measurements = reader.fetch_measurements(None).unwrap();
        drop(reader);

        let values: Vec<f64> = measurements.iter().map(|m| m.test_value).collect();
        let report = OutlierDetector::with_defaults().detect(&values);

        assert_eq!(report.outliers.len(), 1);
        assert_eq!(report.outliers[0].value, 500.0);
        assert_eq!(measurements[report.outliers[0].index].source_id, "C");
    }

    #[tokio::test]
    async fn test_export_joins_sources_and_summaries() {
        let dir = tempdir().unwrap();
        let db_path = setup_store(dir.path());
        let export_path = dir.path().join("export.csv");

        let reader = MeasurementReader::open(&db_path).unwrap();
        let measurements = reader.fetch_measurements(None).unwrap();
        drop(reader);

        let summaries = UqAggregator::new().aggregate(&measurements);
        let mut writer = SqliteSummaryWriter::open(&db_path).unwrap();
        for summary in &summaries {
            writer.upsert_summary(summary).await.unwrap();
        }
        drop(writer);

        let count = export_to_csv(&db_path, &export_path).unwrap();
        assert_eq!(count, 3);

        let content = std::fs::read_to_string(&export_path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "source_id,source_name,latitude,longitude,mean_value,standard_deviation,reliability_index"
        );
        let b_line = lines.nth(1).unwrap();
        assert!(b_line.starts_with("B,South Pit,"));
        assert!(b_line.ends_with(",10.0,0.0,0.0"));
    }
}
