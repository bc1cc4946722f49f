//! oresight-cli: command-line shell around the oresight analytics library.
pub mod dashboard;
pub mod util;
