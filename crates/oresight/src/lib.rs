//! oresight: single-session analytics for mining ore-grade sensor data.
//!
//! This crate ingests a spreadsheet of sensor grade readings paired with
//! nearest-blasthole assays, computes descriptive summary statistics, builds
//! four fixed chart panels, and composes a narrative analysis report offered
//! as an in-memory byte buffer.
//!
//! The design keeps computation pure and session-scoped: the loader, summary
//! calculator, and chart builder are free functions over an immutable
//! `MeasurementTable`, and `session::DashboardSession` holds all derived
//! state for one user session.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod report;
pub mod session;
pub mod stats;
