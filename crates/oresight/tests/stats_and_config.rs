//! Integration tests for the summary calculator and display configuration.

use chrono::{NaiveDate, NaiveDateTime};

use oresight::config::DisplayConfig;
use oresight::data_handling::{MeasurementRow, MeasurementTable};
use oresight::error::AnalysisError;
use oresight::stats::summarize;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn two_row_table() -> MeasurementTable {
    MeasurementTable::new(
        vec![
            MeasurementRow::new(0.20, 0.01, 0.25, 0.012, 10.0, "20230101D1".to_string(), at(1, 8)),
            MeasurementRow::new(0.40, 0.03, 0.35, 0.028, 20.0, "20230102D1".to_string(), at(2, 16)),
        ],
        7,
    )
}

// ---------------------------------------------------------------------------
// Reference scenario from the original dashboard
// ---------------------------------------------------------------------------

#[test]
fn summary_formats_match_reference_scenario() {
    let summary = summarize(&two_row_table()).unwrap();
    assert_eq!(summary.get("Average Copper Grade"), Some("0.300%"));
    assert_eq!(summary.get("Average Molybdenum Grade"), Some("0.020%"));
    assert_eq!(summary.get("Cu Grade Range"), Some("0.200% - 0.400%"));
    assert_eq!(summary.get("Mo Grade Range"), Some("0.010% - 0.030%"));
    assert_eq!(
        summary.get("Average Distance to Nearest Blasthole"),
        Some("15.00m")
    );
    assert_eq!(summary.get("Total Number of Measurements"), Some("2"));
    assert_eq!(
        summary.get("Date Range"),
        Some("2023-01-01 08:00:00 to 2023-01-02 16:00:00")
    );
}

#[test]
fn summary_preserves_insertion_order() {
    let summary = summarize(&two_row_table()).unwrap();
    let keys: Vec<&str> = summary.entries().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "Average Copper Grade",
            "Average Molybdenum Grade",
            "Cu Grade Range",
            "Mo Grade Range",
            "Average Distance to Nearest Blasthole",
            "Total Number of Measurements",
            "Date Range",
        ]
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn mean_falls_within_column_extremes() {
    let table = two_row_table();
    let cu = table.cu_grades();
    let min = cu.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = cu.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean: f64 = summarize(&table)
        .unwrap()
        .get("Average Copper Grade")
        .unwrap()
        .trim_end_matches('%')
        .parse()
        .unwrap();
    assert!(mean >= min && mean <= max);
}

#[test]
fn count_equals_row_count() {
    let table = two_row_table();
    let summary = summarize(&table).unwrap();
    assert_eq!(
        summary.get("Total Number of Measurements"),
        Some(table.len().to_string().as_str())
    );
}

#[test]
fn summarize_is_idempotent() {
    let table = two_row_table();
    assert_eq!(summarize(&table).unwrap(), summarize(&table).unwrap());
}

#[test]
fn empty_table_is_rejected() {
    let table = MeasurementTable::new(vec![], 7);
    match summarize(&table) {
        Err(AnalysisError::EmptyDataset) => {}
        other => panic!("expected EmptyDataset, got {:?}", other.map(|_| ())),
    }
}

// ---------------------------------------------------------------------------
// DisplayConfig
// ---------------------------------------------------------------------------

#[test]
fn display_config_defaults() {
    let config = DisplayConfig::default();
    assert_eq!(config.histogram_bins, 30);
    assert_eq!(config.shift_stride, 5);
    assert_eq!(config.shift_label_separator, 'D');
    assert_eq!(config.sample_rows, 5);
}

#[test]
fn display_config_round_trips_json() {
    let config = DisplayConfig {
        histogram_bins: 12,
        shift_stride: 2,
        shift_label_separator: '_',
        sample_rows: 3,
    };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: DisplayConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, parsed);
}

#[test]
fn display_config_partial_json_uses_defaults() {
    let parsed: DisplayConfig = serde_json::from_str(r#"{"shift_stride": 3}"#).unwrap();
    assert_eq!(parsed.shift_stride, 3);
    assert_eq!(parsed.histogram_bins, 30);
}
