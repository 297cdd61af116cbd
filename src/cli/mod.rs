//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the session and its pipelines. It stands in for
//! an interactive view: every command loads the file, applies the requested
//! toggles and key, and renders or exports once.

pub mod args;
pub mod table;

pub use args::{ColumnRef, KeyArgs, SessionArgs};
pub use table::{handle_columns, handle_export, handle_seal, handle_view};
