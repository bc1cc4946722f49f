use serde::{Deserialize, Serialize};

/// Display-level knobs for the dashboard panels.
///
/// The shift subsampling stride and the label separator are presentation
/// heuristics carried over from the original dashboard. They carry no
/// business meaning and stay configurable rather than hard-coded.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of bins in each grade histogram.
    pub histogram_bins: usize,
    /// Keep every Nth shift (in sorted shift-id order, starting from the
    /// first) in the shift analysis panel.
    pub shift_stride: usize,
    /// Shift ids encode a date before this separator; the date part is used
    /// as the bar chart axis label.
    pub shift_label_separator: char,
    /// Number of head rows shown in the dashboard sample table.
    pub sample_rows: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            shift_stride: 5,
            shift_label_separator: 'D',
            sample_rows: 5,
        }
    }
}
