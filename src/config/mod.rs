//! JSON configuration for the command-line tools.
pub mod court;
pub mod tracking;

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
