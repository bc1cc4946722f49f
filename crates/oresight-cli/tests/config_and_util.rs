//! Integration tests for CLI util helpers and config loading.

use oresight_cli::util::{load_display_config, validate_spreadsheet_file, write_bytes_to_file};

// ---------------------------------------------------------------------------
// validate_spreadsheet_file
// ---------------------------------------------------------------------------

#[test]
fn validate_csv_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::File::create(&path).unwrap();
    assert!(validate_spreadsheet_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_xlsx_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.xlsx");
    std::fs::File::create(&path).unwrap();
    assert!(validate_spreadsheet_file(path.to_str().unwrap()).is_ok());
}

#[test]
fn validate_wrong_extension_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::File::create(&path).unwrap();
    assert!(validate_spreadsheet_file(path.to_str().unwrap()).is_err());
}

#[test]
fn validate_nonexistent_file_errors() {
    assert!(validate_spreadsheet_file("/nonexistent/path/data.csv").is_err());
}

// ---------------------------------------------------------------------------
// write_bytes_to_file
// ---------------------------------------------------------------------------

#[test]
fn write_bytes_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bin");
    write_bytes_to_file(path.to_str().unwrap(), b"report body").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"report body");
}

// ---------------------------------------------------------------------------
// load_display_config
// ---------------------------------------------------------------------------

#[test]
fn config_loads_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("display.json");
    std::fs::write(&path, r#"{"histogram_bins": 12, "shift_stride": 2}"#).unwrap();

    let config = load_display_config(path.to_str().unwrap()).unwrap();
    assert_eq!(config.histogram_bins, 12);
    assert_eq!(config.shift_stride, 2);
    // Unspecified fields fall back to defaults
    assert_eq!(config.shift_label_separator, 'D');
}

#[test]
fn config_missing_file_errors() {
    assert!(load_display_config("/nonexistent/display.json").is_err());
}

#[test]
fn config_invalid_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("display.json");
    std::fs::write(&path, "not json").unwrap();
    assert!(load_display_config(path.to_str().unwrap()).is_err());
}
