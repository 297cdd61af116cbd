//! User settings for the decryptor
//!
//! Manages page size, export naming, the agreed ciphertext encoding and the
//! default log filter.

use serde::{Deserialize, Serialize};

use super::paths::DecryptorPaths;
use crate::crypto::CiphertextEncoding;
use crate::error::DecryptorError;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Rows shown per page in the display projection
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: usize,

    /// Base name of the exported file and its archive
    #[serde(default = "default_export_basename")]
    pub export_basename: String,

    /// Text encoding of ciphertext cells
    #[serde(default)]
    pub ciphertext_encoding: CiphertextEncoding,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_rows_per_page() -> usize {
    10
}

fn default_export_basename() -> String {
    "exported-data".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            rows_per_page: default_rows_per_page(),
            export_basename: default_export_basename(),
            ciphertext_encoding: CiphertextEncoding::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &DecryptorPaths) -> Result<Self, DecryptorError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                DecryptorError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                DecryptorError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DecryptorPaths) -> Result<(), DecryptorError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            DecryptorError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            DecryptorError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject values the pipelines cannot work with
    pub fn validate(&self) -> Result<(), DecryptorError> {
        if self.rows_per_page == 0 {
            return Err(DecryptorError::Config(
                "rows_per_page must be at least 1".into(),
            ));
        }
        if self.export_basename.trim().is_empty()
            || self.export_basename.contains(['/', '\\'])
        {
            return Err(DecryptorError::Config(format!(
                "Invalid export basename: '{}'",
                self.export_basename
            )));
        }
        Ok(())
    }
}
