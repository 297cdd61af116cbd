//! Decryptor - column-level decryption for tabular data files
//!
//! This library loads a CSV or spreadsheet table, lets the user flag columns
//! whose values are ciphertext, and decrypts those columns with a single
//! caller-supplied key for display and export. Cells that cannot be decrypted
//! are shown as they are, so a table stays browsable without the right key.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `crypto`: AES-256-CBC cell cipher and key handling
//! - `models`: Table, column flags, key and pagination state
//! - `import`: Building a table from file bytes
//! - `services`: Cell codec and paginated display projection
//! - `export`: Export pipeline, file writers and zip packaging
//! - `session`: The application state controller
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use decryptor::{config::Settings, import::TableFormat, session::Session};
//!
//! let mut session = Session::new(Settings::default());
//! session.load(&bytes, TableFormat::Csv)?;
//! session.toggle_encryption("ssn")?;
//! session.edit_key(key)?;
//! session.set_key();
//! let page = session.current_page().await?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod services;
pub mod session;

pub use error::{DecryptorError, DecryptorResult};
pub use session::Session;
