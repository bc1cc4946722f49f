//! Integration tests for panel construction and report composition.

use chrono::{NaiveDate, NaiveDateTime};

use oresight::config::DisplayConfig;
use oresight::data_handling::{MeasurementRow, MeasurementTable, ShiftStats};
use oresight::error::AnalysisError;
use oresight::report::document::{compose_report, VISUALIZATION_NARRATIVES};
use oresight::report::plots::{
    build_panels, plot_distance_vs_error, plot_grade_distributions, plot_prediction_accuracy,
    plot_shift_averages,
};
use oresight::stats::summarize;

fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, day)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn sample_table() -> MeasurementTable {
    let rows = (1..=10)
        .map(|i| {
            MeasurementRow::new(
                0.1 + 0.02 * i as f64,
                0.01 + 0.001 * i as f64,
                0.12 + 0.02 * i as f64,
                0.011 + 0.001 * i as f64,
                5.0 * i as f64,
                format!("202301{:02}D1", i),
                at(i),
            )
        })
        .collect();
    MeasurementTable::new(rows, 7)
}

// ---------------------------------------------------------------------------
// Panels
// ---------------------------------------------------------------------------

#[test]
fn build_panels_succeeds_on_sample_table() {
    let panels = build_panels(&sample_table(), &DisplayConfig::default()).unwrap();
    // Each panel serializes to a non-trivial plotly figure
    for plot in [
        &panels.grade_distributions,
        &panels.prediction_accuracy,
        &panels.distance_vs_error,
        &panels.shift_averages,
    ] {
        assert!(serde_json::to_string(plot).unwrap().len() > 2);
    }
}

#[test]
fn panel_builders_are_idempotent() {
    let table = sample_table();
    let a = plot_grade_distributions(&table, 30).unwrap();
    let b = plot_grade_distributions(&table, 30).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );

    let a = plot_prediction_accuracy(&table).unwrap();
    let b = plot_prediction_accuracy(&table).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn accuracy_panel_contains_identity_lines() {
    let plot = plot_prediction_accuracy(&sample_table()).unwrap();
    let json = serde_json::to_string(&plot).unwrap();
    assert!(json.contains("Cu y = x"));
    assert!(json.contains("Mo y = x"));
    assert!(json.contains("dash"));
}

#[test]
fn distance_panel_uses_error_column() {
    let table = sample_table();
    let plot = plot_distance_vs_error(&table).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&plot).unwrap()).unwrap();

    let xs = value["data"][0]["x"].as_array().unwrap();
    let ys = value["data"][0]["y"].as_array().unwrap();
    assert_eq!(xs.len(), table.len());
    for (plotted, expected) in ys.iter().zip(table.cu_errors()) {
        assert!((plotted.as_f64().unwrap() - expected).abs() < 1e-12);
    }
}

#[test]
fn shift_panel_labels_and_annotations() {
    let shifts = vec![
        ShiftStats {
            shift_id: "20230101D1".to_string(),
            mean_cu: 0.25,
            mean_mo: 0.02,
        },
        ShiftStats {
            shift_id: "20230102D1".to_string(),
            mean_cu: 0.35,
            mean_mo: 0.03,
        },
    ];
    let plot = plot_shift_averages(&shifts, 'D').unwrap();
    let json = serde_json::to_string(&plot).unwrap();
    assert!(json.contains("20230101"), "label should drop the D suffix");
    assert!(!json.contains("20230101D1"));
    assert!(json.contains("0.25"));
    assert!(json.contains("Copper"));
    assert!(json.contains("Molybdenum"));
}

#[test]
fn panels_fail_on_empty_table() {
    let empty = MeasurementTable::new(vec![], 7);
    assert!(matches!(
        plot_grade_distributions(&empty, 30),
        Err(AnalysisError::Render(_))
    ));
    assert!(matches!(
        plot_prediction_accuracy(&empty),
        Err(AnalysisError::Render(_))
    ));
    assert!(matches!(
        plot_distance_vs_error(&empty),
        Err(AnalysisError::Render(_))
    ));
    assert!(matches!(
        plot_shift_averages(&[], 'D'),
        Err(AnalysisError::Render(_))
    ));
}

// ---------------------------------------------------------------------------
// Report document
// ---------------------------------------------------------------------------

#[test]
fn report_round_trips_summary_entries_and_headings() {
    let summary = summarize(&sample_table()).unwrap();
    let html = compose_report(&summary).render();

    assert!(html.contains("Mining Data Analysis Report"));
    assert!(html.contains("Summary Statistics"));
    assert!(html.contains("Visualization Analysis"));
    for (name, value) in summary.entries() {
        assert!(
            html.contains(&format!("{}: {}", name, value)),
            "missing entry {name}"
        );
    }
    for (heading, narrative) in VISUALIZATION_NARRATIVES {
        assert!(html.contains(heading), "missing heading {heading}");
        assert!(html.contains(narrative), "missing narrative for {heading}");
    }
}

#[test]
fn report_bytes_match_rendered_html() {
    let summary = summarize(&sample_table()).unwrap();
    let report = compose_report(&summary);
    assert_eq!(report.to_bytes(), report.render().into_bytes());
}

#[test]
fn report_save_writes_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.html");
    let summary = summarize(&sample_table()).unwrap();
    compose_report(&summary)
        .save_to_file(path.to_str().unwrap())
        .unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<!DOCTYPE html>"));
}
