use anyhow::{Context, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use oresight::config::DisplayConfig;

pub fn validate_spreadsheet_file(path: &str) -> Result<()> {
    let pb = PathBuf::from(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("xlsx") | Some("csv") => {}
        _ => anyhow::bail!("File must have a .xlsx or .csv extension: {}", path),
    }

    if !pb.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }

    Ok(())
}

pub fn write_bytes_to_file(path: &str, bytes: &[u8]) -> std::io::Result<()> {
    let path = Path::new(path);
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}

/// Load a display configuration override from a JSON file.
pub fn load_display_config(path: &str) -> Result<DisplayConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path))?;
    let config: DisplayConfig =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse config: {}", path))?;
    Ok(config)
}
