//! Path management for the decryptor
//!
//! Only the settings file lives on disk; loaded tables, flags and keys are
//! never persisted.
//!
//! ## Path Resolution Order
//!
//! 1. `DECRYPTOR_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/pii-decryptor` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::DecryptorError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "DECRYPTOR_CONFIG_DIR";

/// Manages the paths used by the decryptor
#[derive(Debug, Clone)]
pub struct DecryptorPaths {
    /// Base directory for the settings file
    base_dir: PathBuf,
}

impl DecryptorPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, DecryptorError> {
        Self::resolve(std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from))
    }

    /// Resolve paths from an explicit override, falling back to the platform default
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self, DecryptorError> {
        let base_dir = match override_dir {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "pii-decryptor")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    DecryptorError::Config("Could not determine a config directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), DecryptorError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DecryptorError::Io(format!("Failed to create config directory: {}", e)))
    }
}
