use std::error::Error;
use std::fmt;

/// Custom error type for analysis pipeline failures.
#[derive(Debug)]
pub enum AnalysisError {
    /// A required column is missing, or a value in it failed to parse.
    DataFormat(String),
    /// The upload parsed cleanly but contains zero measurement rows, so
    /// means and ranges are undefined.
    EmptyDataset,
    /// A chart panel could not be built.
    Render(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisError::DataFormat(msg) => write!(f, "Data format error: {}", msg),
            AnalysisError::EmptyDataset => write!(f, "Dataset contains no measurement rows"),
            AnalysisError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl Error for AnalysisError {}
