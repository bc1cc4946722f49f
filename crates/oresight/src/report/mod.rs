//! Chart panel construction and report composition.
//!
//! Panels are pure functions from the measurement table to `plotly::Plot`
//! values; the document model wraps maud HTML rendering so the narrative
//! report and the dashboard share one serialization path.
pub mod document;
pub mod plots;

pub use document::{
    compose_report, Report, ReportSection, REPORT_FILE_NAME, REPORT_MIME_TYPE,
    VISUALIZATION_NARRATIVES,
};
pub use plots::{build_panels, PanelSet};
