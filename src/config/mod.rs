//! Configuration module for the decryptor
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - Settings persistence

pub mod paths;
pub mod settings;

pub use paths::DecryptorPaths;
pub use settings::Settings;
