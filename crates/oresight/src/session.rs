//! Per-session orchestration of the load → summarize → chart pipeline.
use log::info;

use crate::config::DisplayConfig;
use crate::data_handling::MeasurementTable;
use crate::error::AnalysisError;
use crate::io::load_table;
use crate::report::document::compose_report;
use crate::report::plots::{build_panels, PanelSet};
use crate::stats::{summarize, SummaryRecord};

/// Shell states: no dataset loaded, or a fully analyzed dataset on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loaded,
}

/// One rendered pass over an uploaded dataset.
#[derive(Clone)]
pub struct Analysis {
    pub table: MeasurementTable,
    pub summary: SummaryRecord,
    pub panels: PanelSet,
}

/// Session-scoped dashboard state machine.
///
/// All derived state hangs off this object, never off module-level
/// variables; a failed upload leaves the session in `Idle` so the next
/// upload starts from a clean slate.
pub struct DashboardSession {
    config: DisplayConfig,
    analysis: Option<Analysis>,
}

impl DashboardSession {
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            config,
            analysis: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.analysis.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Idle
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    /// Run the full pipeline on an uploaded spreadsheet.
    ///
    /// On success the session transitions to `Loaded`. Any failure (parse,
    /// empty dataset, panel build) reverts the session to `Idle` and
    /// surfaces the error; each upload is an independent attempt.
    pub fn upload(&mut self, name: &str, bytes: &[u8]) -> Result<&Analysis, AnalysisError> {
        self.analysis = None;
        let table = load_table(name, bytes)?;
        let summary = summarize(&table)?;
        let panels = build_panels(&table, &self.config)?;
        info!("loaded {} measurements from '{}'", table.len(), name);
        Ok(self.analysis.insert(Analysis {
            table,
            summary,
            panels,
        }))
    }

    /// Compose the narrative report for download.
    ///
    /// The summary and document are recomputed fresh from the current table
    /// on every call, never cached. Only valid in `Loaded`; the session
    /// state does not change.
    pub fn generate_report(&self) -> Result<Vec<u8>, AnalysisError> {
        let analysis = self.analysis.as_ref().ok_or(AnalysisError::EmptyDataset)?;
        let summary = summarize(&analysis.table)?;
        Ok(compose_report(&summary).to_bytes())
    }
}
