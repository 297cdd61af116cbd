//! Column encryption flags
//!
//! One boolean per column marking its values as ciphertext that must be
//! decrypted before display or export. Flags are keyed by column position so
//! duplicate header names stay independent; name-addressed toggles flip every
//! column carrying that name.

use crate::error::{DecryptorError, DecryptorResult};

use super::table::TableModel;

/// Per-column "is ciphertext" flags
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnEncryptionState {
    flags: Vec<bool>,
}

impl ColumnEncryptionState {
    /// All-false flags, one per header
    pub fn for_headers(headers: &[String]) -> Self {
        Self {
            flags: vec![false; headers.len()],
        }
    }

    /// All-false flags for a table's columns
    pub fn for_table(table: &TableModel) -> Self {
        Self::for_headers(table.headers())
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether a column is flagged; columns past the header count never are
    pub fn is_encrypted(&self, column: usize) -> bool {
        self.flags.get(column).copied().unwrap_or(false)
    }

    /// Flip one column's flag, returning the new value
    pub fn toggle(&mut self, column: usize) -> DecryptorResult<bool> {
        let flag = self
            .flags
            .get_mut(column)
            .ok_or_else(|| DecryptorError::column_not_found(format!("#{}", column)))?;
        *flag = !*flag;
        Ok(*flag)
    }

    /// Flip every column named `name`, returning the indices touched
    pub fn toggle_by_name(&mut self, table: &TableModel, name: &str) -> DecryptorResult<Vec<usize>> {
        let columns: Vec<usize> = table.columns_named(name).collect();
        if columns.is_empty() {
            return Err(DecryptorError::column_not_found(name));
        }
        for &column in &columns {
            self.toggle(column)?;
        }
        Ok(columns)
    }

    /// Indices of all flagged columns
    pub fn encrypted_columns(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag)
            .map(|(index, _)| index)
            .collect()
    }
}
