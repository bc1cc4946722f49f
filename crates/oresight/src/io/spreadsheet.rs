//! Spreadsheet readers: .xlsx and .csv uploads into a `MeasurementTable`.
use std::io::Cursor;
use std::path::Path;

use calamine::{Data, DataType, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::data_handling::{MeasurementRow, MeasurementTable};
use crate::error::AnalysisError;

/// Column headers the loader requires, matched case-insensitively.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "cugrade",
    "mograde",
    "avg_bh_grade_cu",
    "avg_bh_grade_mo",
    "Dist_to_NN_bh",
    "shift_id",
    "run_date_time",
];

/// Timestamp formats accepted for string-typed `run_date_time` values.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Resolved indices of the required columns in the source header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    cu_grade: usize,
    mo_grade: usize,
    bh_cu_grade: usize,
    bh_mo_grade: usize,
    distance: usize,
    shift_id: usize,
    run_at: usize,
    width: usize,
}

/// Parse an uploaded spreadsheet byte stream, dispatching on the upload
/// name's extension.
pub fn load_table(name: &str, bytes: &[u8]) -> Result<MeasurementTable, AnalysisError> {
    let ext = Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("xlsx") => read_xlsx(bytes),
        Some("csv") => read_csv(bytes),
        _ => Err(AnalysisError::DataFormat(format!(
            "unsupported upload '{}': expected a .xlsx or .csv file",
            name
        ))),
    }
}

/// Read a measurement table from a file on disk.
pub fn load_table_from_path<P: AsRef<Path>>(path: P) -> Result<MeasurementTable, AnalysisError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| AnalysisError::DataFormat(format!("failed to read {}: {}", path.display(), e)))?;
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    load_table(name, &bytes)
}

/// Parse the first worksheet of an .xlsx byte stream.
pub fn read_xlsx(bytes: &[u8]) -> Result<MeasurementTable, AnalysisError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AnalysisError::DataFormat(format!("failed to open workbook: {}", e)))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AnalysisError::DataFormat("workbook has no worksheets".to_string()))?
        .map_err(|e| AnalysisError::DataFormat(format!("failed to read first worksheet: {}", e)))?;

    let mut sheet_rows = range.rows();
    let header = sheet_rows
        .next()
        .ok_or_else(|| AnalysisError::DataFormat("worksheet has no header row".to_string()))?;
    let headers: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
    let columns = resolve_columns(headers.iter().map(|h| h.as_str()))?;

    let mut rows = Vec::new();
    for (idx, sheet_row) in sheet_rows.enumerate() {
        // 1-based row number in the sheet, counting the header
        let line = idx + 2;
        if sheet_row.iter().all(|cell| matches!(cell, Data::Empty)) {
            log::warn!("skipping empty worksheet row {}", line);
            continue;
        }
        rows.push(MeasurementRow::new(
            numeric_cell(sheet_row, columns.cu_grade, "cugrade", line)?,
            numeric_cell(sheet_row, columns.mo_grade, "mograde", line)?,
            numeric_cell(sheet_row, columns.bh_cu_grade, "avg_bh_grade_cu", line)?,
            numeric_cell(sheet_row, columns.bh_mo_grade, "avg_bh_grade_mo", line)?,
            numeric_cell(sheet_row, columns.distance, "Dist_to_NN_bh", line)?,
            string_cell(sheet_row, columns.shift_id, "shift_id", line)?,
            datetime_cell(sheet_row, columns.run_at, "run_date_time", line)?,
        ));
    }

    Ok(MeasurementTable::new(rows, columns.width))
}

/// Parse a .csv byte stream with a single header row.
pub fn read_csv(bytes: &[u8]) -> Result<MeasurementTable, AnalysisError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| AnalysisError::DataFormat(format!("failed to read header row: {}", e)))?
        .clone();
    let columns = resolve_columns(headers.iter())?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record =
            result.map_err(|e| AnalysisError::DataFormat(format!("failed to read row {}: {}", line, e)))?;
        rows.push(MeasurementRow::new(
            numeric_field(&record, columns.cu_grade, "cugrade", line)?,
            numeric_field(&record, columns.mo_grade, "mograde", line)?,
            numeric_field(&record, columns.bh_cu_grade, "avg_bh_grade_cu", line)?,
            numeric_field(&record, columns.bh_mo_grade, "avg_bh_grade_mo", line)?,
            numeric_field(&record, columns.distance, "Dist_to_NN_bh", line)?,
            string_field(&record, columns.shift_id, "shift_id", line)?.to_string(),
            datetime_field(&record, columns.run_at, "run_date_time", line)?,
        ));
    }

    Ok(MeasurementTable::new(rows, columns.width))
}

fn resolve_columns<'a, I>(headers: I) -> Result<ColumnMap, AnalysisError>
where
    I: Iterator<Item = &'a str>,
{
    let headers: Vec<&str> = headers.collect();
    let find = |name: &str| -> Result<usize, AnalysisError> {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| AnalysisError::DataFormat(format!("missing required column '{}'", name)))
    };

    let [cu_grade, mo_grade, bh_cu_grade, bh_mo_grade, distance, shift_id, run_at] =
        REQUIRED_COLUMNS;
    Ok(ColumnMap {
        cu_grade: find(cu_grade)?,
        mo_grade: find(mo_grade)?,
        bh_cu_grade: find(bh_cu_grade)?,
        bh_mo_grade: find(bh_mo_grade)?,
        distance: find(distance)?,
        shift_id: find(shift_id)?,
        run_at: find(run_at)?,
        width: headers.len(),
    })
}

fn bad_cell(column: &str, line: usize, expected: &str) -> AnalysisError {
    AnalysisError::DataFormat(format!(
        "column '{}' has a non-{} value at row {}",
        column, expected, line
    ))
}

fn empty_cell(column: &str, line: usize) -> AnalysisError {
    AnalysisError::DataFormat(format!("column '{}' is empty at row {}", column, line))
}

fn numeric_cell(row: &[Data], idx: usize, column: &str, line: usize) -> Result<f64, AnalysisError> {
    match row.get(idx) {
        Some(Data::Float(v)) => Ok(*v),
        Some(Data::Int(v)) => Ok(*v as f64),
        Some(Data::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| bad_cell(column, line, "numeric")),
        _ => Err(bad_cell(column, line, "numeric")),
    }
}

fn string_cell(row: &[Data], idx: usize, column: &str, line: usize) -> Result<String, AnalysisError> {
    match row.get(idx) {
        Some(Data::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(cell @ (Data::Float(_) | Data::Int(_))) => Ok(cell.to_string()),
        _ => Err(empty_cell(column, line)),
    }
}

fn datetime_cell(
    row: &[Data],
    idx: usize,
    column: &str,
    line: usize,
) -> Result<NaiveDateTime, AnalysisError> {
    let cell = row
        .get(idx)
        .ok_or_else(|| bad_cell(column, line, "timestamp"))?;
    if let Some(timestamp) = cell.as_datetime() {
        return Ok(timestamp);
    }
    match cell {
        Data::String(s) => {
            parse_timestamp(s.trim()).ok_or_else(|| bad_cell(column, line, "timestamp"))
        }
        _ => Err(bad_cell(column, line, "timestamp")),
    }
}

fn numeric_field(
    record: &StringRecord,
    idx: usize,
    column: &str,
    line: usize,
) -> Result<f64, AnalysisError> {
    string_field(record, idx, column, line)?
        .parse::<f64>()
        .map_err(|_| bad_cell(column, line, "numeric"))
}

fn string_field<'a>(
    record: &'a StringRecord,
    idx: usize,
    column: &str,
    line: usize,
) -> Result<&'a str, AnalysisError> {
    match record.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(empty_cell(column, line)),
    }
}

fn datetime_field(
    record: &StringRecord,
    idx: usize,
    column: &str,
    line: usize,
) -> Result<NaiveDateTime, AnalysisError> {
    let value = string_field(record, idx, column, line)?;
    parse_timestamp(value).ok_or_else(|| bad_cell(column, line, "timestamp"))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
