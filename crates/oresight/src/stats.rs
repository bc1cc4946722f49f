//! Summary statistics over a loaded measurement table.
use statrs::statistics::Statistics;

use crate::data_handling::MeasurementTable;
use crate::error::AnalysisError;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Insertion-ordered mapping of statistic name to formatted value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryRecord {
    entries: Vec<(String, String)>,
}

impl SummaryRecord {
    pub fn push(&mut self, name: &str, value: String) {
        self.entries.push((name.to_string(), value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute the summary statistics for a loaded table.
///
/// Every statistic is recomputed fresh from the table. A zero-row table
/// fails with `EmptyDataset` up front; means and ranges are undefined there
/// and must not leak through as NaN.
pub fn summarize(table: &MeasurementTable) -> Result<SummaryRecord, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let cu = table.cu_grades();
    let mo = table.mo_grades();
    let distances = table.distances();

    let mut summary = SummaryRecord::default();
    summary.push("Average Copper Grade", format!("{:.3}%", (&cu).mean()));
    summary.push("Average Molybdenum Grade", format!("{:.3}%", (&mo).mean()));
    summary.push(
        "Cu Grade Range",
        format!("{:.3}% - {:.3}%", (&cu).min(), (&cu).max()),
    );
    summary.push(
        "Mo Grade Range",
        format!("{:.3}% - {:.3}%", (&mo).min(), (&mo).max()),
    );
    summary.push(
        "Average Distance to Nearest Blasthole",
        format!("{:.2}m", (&distances).mean()),
    );
    summary.push("Total Number of Measurements", table.len().to_string());

    let earliest = table.rows().iter().map(|r| r.run_at).min();
    let latest = table.rows().iter().map(|r| r.run_at).max();
    if let (Some(earliest), Some(latest)) = (earliest, latest) {
        summary.push(
            "Date Range",
            format!(
                "{} to {}",
                earliest.format(DATE_FORMAT),
                latest.format(DATE_FORMAT)
            ),
        );
    }

    Ok(summary)
}
