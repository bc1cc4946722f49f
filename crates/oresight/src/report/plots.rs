//! The four dashboard panels as pure functions of the measurement table.
use plotly::common::{DashType, Line, Marker, Mode, TextPosition};
use plotly::layout::{Axis, BarMode, GridPattern, Layout, LayoutGrid};
use plotly::{Bar, Histogram, Plot, Scatter};
use statrs::statistics::Statistics;

use crate::config::DisplayConfig;
use crate::data_handling::{shift_date_label, subsample, MeasurementTable, ShiftStats};
use crate::error::AnalysisError;

const CU_COLOR: &str = "#2ecc71";
const MO_COLOR: &str = "#e74c3c";

/// All four panels for one render pass.
#[derive(Clone)]
pub struct PanelSet {
    pub grade_distributions: Plot,
    pub prediction_accuracy: Plot,
    pub distance_vs_error: Plot,
    pub shift_averages: Plot,
}

/// Build every panel for a loaded table.
pub fn build_panels(
    table: &MeasurementTable,
    config: &DisplayConfig,
) -> Result<PanelSet, AnalysisError> {
    let shifts = subsample(&table.shift_stats(), config.shift_stride);
    Ok(PanelSet {
        grade_distributions: plot_grade_distributions(table, config.histogram_bins)?,
        prediction_accuracy: plot_prediction_accuracy(table)?,
        distance_vs_error: plot_distance_vs_error(table)?,
        shift_averages: plot_shift_averages(&shifts, config.shift_label_separator)?,
    })
}

fn require_rows(table: &MeasurementTable, panel: &str) -> Result<(), AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::Render(format!("{}: no rows to plot", panel)));
    }
    Ok(())
}

/// Histograms of the copper and molybdenum grade columns, side by side.
pub fn plot_grade_distributions(
    table: &MeasurementTable,
    bins: usize,
) -> Result<Plot, AnalysisError> {
    require_rows(table, "grade distributions")?;

    let cu_trace = Histogram::new(table.cu_grades())
        .name("Copper")
        .n_bins_x(bins);
    let mo_trace = Histogram::new(table.mo_grades())
        .name("Molybdenum")
        .n_bins_x(bins)
        .x_axis("x2")
        .y_axis("y2");

    let layout = Layout::new()
        .title("Distribution of Grade Predictions")
        .grid(
            LayoutGrid::new()
                .rows(1)
                .columns(2)
                .pattern(GridPattern::Independent),
        )
        .x_axis(Axis::new().title("Copper Grade (%)"))
        .y_axis(Axis::new().title("Count"))
        .x_axis2(Axis::new().title("Molybdenum Grade (%)"))
        .y_axis2(Axis::new().title("Count"));

    let mut plot = Plot::new();
    plot.add_trace(cu_trace);
    plot.add_trace(mo_trace);
    plot.set_layout(layout);
    Ok(plot)
}

/// Sensor-predicted grade vs blasthole assay grade for both metals, each
/// overlaid with the y = x identity line spanning the sensor axis.
///
/// The identity line is the visual reference for perfect prediction, not a
/// fitted regression.
pub fn plot_prediction_accuracy(table: &MeasurementTable) -> Result<Plot, AnalysisError> {
    require_rows(table, "prediction accuracy")?;

    let cu = table.cu_grades();
    let mo = table.mo_grades();
    let (cu_min, cu_max) = ((&cu).min(), (&cu).max());
    let (mo_min, mo_max) = ((&mo).min(), (&mo).max());

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(cu, table.bh_cu_grades())
            .mode(Mode::Markers)
            .name("Cu Sensor vs Assay")
            .marker(Marker::new().opacity(0.5)),
    );
    plot.add_trace(
        Scatter::new(vec![cu_min, cu_max], vec![cu_min, cu_max])
            .mode(Mode::Lines)
            .name("Cu y = x (Perfect prediction)")
            .line(Line::new().color("red").dash(DashType::Dash)),
    );
    plot.add_trace(
        Scatter::new(mo, table.bh_mo_grades())
            .mode(Mode::Markers)
            .name("Mo Sensor vs Assay")
            .marker(Marker::new().opacity(0.5))
            .x_axis("x2")
            .y_axis("y2"),
    );
    plot.add_trace(
        Scatter::new(vec![mo_min, mo_max], vec![mo_min, mo_max])
            .mode(Mode::Lines)
            .name("Mo y = x (Perfect prediction)")
            .line(Line::new().color("red").dash(DashType::Dash))
            .x_axis("x2")
            .y_axis("y2"),
    );

    plot.set_layout(
        Layout::new()
            .title("Sensor Prediction vs Blasthole Grade")
            .grid(
                LayoutGrid::new()
                    .rows(1)
                    .columns(2)
                    .pattern(GridPattern::Independent),
            )
            .x_axis(Axis::new().title("Sensor Predicted Cu Grade (%)"))
            .y_axis(Axis::new().title("Blasthole Cu Grade (%)"))
            .x_axis2(Axis::new().title("Sensor Predicted Mo Grade (%)"))
            .y_axis2(Axis::new().title("Blasthole Mo Grade (%)")),
    );
    Ok(plot)
}

/// Distance to the nearest blasthole vs absolute copper prediction error.
pub fn plot_distance_vs_error(table: &MeasurementTable) -> Result<Plot, AnalysisError> {
    require_rows(table, "distance vs prediction error")?;

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(table.distances(), table.cu_errors())
            .mode(Mode::Markers)
            .name("Cu Prediction Error")
            .marker(Marker::new().opacity(0.5)),
    );
    plot.set_layout(
        Layout::new()
            .title("Distance to Nearest Blasthole vs Cu Prediction Error")
            .x_axis(Axis::new().title("Distance to Nearest Blasthole (m)"))
            .y_axis(Axis::new().title("Absolute Cu Prediction Error (%)")),
    );
    Ok(plot)
}

/// Grouped bars of mean copper and molybdenum grade per displayed shift,
/// labeled by the date portion of the shift id and annotated with the bar
/// values to two decimals.
pub fn plot_shift_averages(
    shifts: &[ShiftStats],
    separator: char,
) -> Result<Plot, AnalysisError> {
    if shifts.is_empty() {
        return Err(AnalysisError::Render(
            "shift analysis: no shifts to plot".to_string(),
        ));
    }

    let labels: Vec<String> = shifts
        .iter()
        .map(|s| shift_date_label(&s.shift_id, separator).to_string())
        .collect();
    let cu_means: Vec<f64> = shifts.iter().map(|s| s.mean_cu).collect();
    let mo_means: Vec<f64> = shifts.iter().map(|s| s.mean_mo).collect();
    let cu_text: Vec<String> = cu_means.iter().map(|v| format!("{:.2}", v)).collect();
    let mo_text: Vec<String> = mo_means.iter().map(|v| format!("{:.2}", v)).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(labels.clone(), cu_means)
            .name("Copper")
            .marker(Marker::new().color(CU_COLOR))
            .text_array(cu_text)
            .text_position(TextPosition::Outside),
    );
    plot.add_trace(
        Bar::new(labels, mo_means)
            .name("Molybdenum")
            .marker(Marker::new().color(MO_COLOR))
            .text_array(mo_text)
            .text_position(TextPosition::Outside),
    );
    plot.set_layout(
        Layout::new()
            .title("Average Grades by Shift Date")
            .bar_mode(BarMode::Group)
            .x_axis(Axis::new().title("Shift Date"))
            .y_axis(Axis::new().title("Grade (%)")),
    );
    Ok(plot)
}
