//! Export options.
//!
//! Options can be read from a JSON file; every field is optional and falls
//! back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::arinc424::database::TOO_FAR_KM;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse options file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory or zip archive holding the CSV tables
    pub input: PathBuf,
    /// Directory the artifact tree is written to; recreated on every run
    pub output_dir: PathBuf,
    /// Zip archive to pack the artifact tree into
    pub archive: Option<PathBuf>,
    /// Text file copied at the root of the artifact tree
    pub installation_notes: Option<PathBuf>,
    /// Diagnostics report
    pub report: PathBuf,
    /// Speed restriction below the speed transition altitude, in knots
    pub speed_limit: u32,
    /// Transition altitude used when the airport does not publish one, in feet
    pub default_transition_altitude: i64,
    /// Transition level used when the airport does not publish one, in feet
    pub default_transition_level: i64,
    /// Distance from the airport above which a resolved fix is reported
    pub too_far_km: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            input: PathBuf::from("FSL"),
            output_dir: PathBuf::from("iFly"),
            archive: None,
            installation_notes: None,
            report: PathBuf::from("debug.txt"),
            speed_limit: 250,
            default_transition_altitude: 9800,
            default_transition_level: 11800,
            too_far_km: TOO_FAR_KM,
        }
    }
}

impl ExportOptions {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_keep_defaults() {
        let options: ExportOptions =
            serde_json::from_str(r#"{"input": "FSL-2313.zip", "archive": "iFly-2313.zip", "speed_limit": 230}"#)
                .unwrap();
        assert_eq!(options.input, PathBuf::from("FSL-2313.zip"));
        assert_eq!(options.archive, Some(PathBuf::from("iFly-2313.zip")));
        assert_eq!(options.speed_limit, 230);
        assert_eq!(options.default_transition_altitude, 9800);
        assert_eq!(options.default_transition_level, 11800);
        assert_eq!(options.report, PathBuf::from("debug.txt"));
    }

    #[test]
    fn unreadable_options_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        assert!(matches!(ExportOptions::from_json_file(&path), Err(ConfigError::Io(_))));
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ExportOptions::from_json_file(&path), Err(ConfigError::Json(_))));
    }
}
