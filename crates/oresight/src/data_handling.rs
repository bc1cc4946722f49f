//! Core table types for one analysis session.
//!
//! This module defines `MeasurementRow` and `MeasurementTable` and contains
//! helpers for per-shift aggregation and the display subsampling used by the
//! shift analysis panel. The table is immutable once built; the derived
//! copper error column is computed at row construction.
use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// A single sensor measurement paired with its nearest blasthole assay.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    /// Sensor copper grade (percent).
    pub cu_grade: f64,
    /// Sensor molybdenum grade (percent).
    pub mo_grade: f64,
    /// Nearest-blasthole assay copper grade (percent).
    pub bh_cu_grade: f64,
    /// Nearest-blasthole assay molybdenum grade (percent).
    pub bh_mo_grade: f64,
    /// Distance to the nearest blasthole (meters).
    pub distance_to_bh: f64,
    /// Operational shift identifier (encodes a date before the separator).
    pub shift_id: String,
    /// Measurement timestamp.
    pub run_at: NaiveDateTime,
    /// Absolute copper prediction error, |cu_grade - bh_cu_grade|.
    pub cu_error: f64,
}

impl MeasurementRow {
    /// Build a row and attach the derived copper prediction error.
    pub fn new(
        cu_grade: f64,
        mo_grade: f64,
        bh_cu_grade: f64,
        bh_mo_grade: f64,
        distance_to_bh: f64,
        shift_id: String,
        run_at: NaiveDateTime,
    ) -> Self {
        Self {
            cu_grade,
            mo_grade,
            bh_cu_grade,
            bh_mo_grade,
            distance_to_bh,
            shift_id,
            run_at,
            cu_error: (cu_grade - bh_cu_grade).abs(),
        }
    }
}

/// Ordered, immutable measurement table for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    rows: Vec<MeasurementRow>,
    source_columns: usize,
}

impl MeasurementTable {
    /// Wrap parsed rows, recording the column count of the source sheet for
    /// the dataset overview.
    pub fn new(rows: Vec<MeasurementRow>, source_columns: usize) -> Self {
        Self {
            rows,
            source_columns,
        }
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column count of the source sheet.
    pub fn source_columns(&self) -> usize {
        self.source_columns
    }

    /// First `n` rows, for the sample table.
    pub fn head(&self, n: usize) -> &[MeasurementRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn cu_grades(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.cu_grade).collect()
    }

    pub fn mo_grades(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.mo_grade).collect()
    }

    pub fn bh_cu_grades(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.bh_cu_grade).collect()
    }

    pub fn bh_mo_grades(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.bh_mo_grade).collect()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.distance_to_bh).collect()
    }

    pub fn cu_errors(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.cu_error).collect()
    }

    /// Mean copper and molybdenum grade per distinct shift, ordered by
    /// shift id.
    pub fn shift_stats(&self) -> Vec<ShiftStats> {
        let mut groups: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
        for row in &self.rows {
            let entry = groups.entry(row.shift_id.as_str()).or_insert((0.0, 0.0, 0));
            entry.0 += row.cu_grade;
            entry.1 += row.mo_grade;
            entry.2 += 1;
        }
        groups
            .into_iter()
            .map(|(shift_id, (cu_sum, mo_sum, count))| ShiftStats {
                shift_id: shift_id.to_string(),
                mean_cu: cu_sum / count as f64,
                mean_mo: mo_sum / count as f64,
            })
            .collect()
    }
}

/// Mean grades for one operational shift.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftStats {
    pub shift_id: String,
    pub mean_cu: f64,
    pub mean_mo: f64,
}

/// Keep every `stride`-th item, starting from the first.
///
/// A stride of 0 or 1 keeps everything.
pub fn subsample<T: Clone>(items: &[T], stride: usize) -> Vec<T> {
    if stride <= 1 {
        return items.to_vec();
    }
    items.iter().step_by(stride).cloned().collect()
}

/// Date portion of a shift id: the text before the first separator.
pub fn shift_date_label(shift_id: &str, separator: char) -> &str {
    shift_id.split(separator).next().unwrap_or(shift_id)
}
