//! Display formatting for terminal output
//!
//! Provides utilities for rendering projected pages and column listings.

pub mod columns;
pub mod page;

pub use columns::format_column_list;
pub use page::{format_page, format_pagination};
