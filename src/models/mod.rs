//! Core data models for the decryptor
//!
//! This module contains the state a session works on: the loaded table, the
//! per-column encryption flags, the key, and pagination.

pub mod cell;
pub mod encryption_state;
pub mod key;
pub mod pagination;
pub mod table;

pub use cell::CellValue;
pub use encryption_state::ColumnEncryptionState;
pub use key::EncryptionKey;
pub use pagination::{page_window, PageMarker, PaginationState};
pub use table::TableModel;
