//! Cell codec
//!
//! Turns a raw cell into the string shown on screen or written to an export.
//! Decryption failures never surface: the cell falls back to its raw
//! (ciphertext) text so a missing or wrong key never blocks the table.

use tracing::debug;

use crate::crypto::CellCipher;
use crate::models::CellValue;

/// Resolves cells against the current key
#[derive(Debug, Clone, Copy)]
pub struct CellCodec<'a> {
    cipher: Option<&'a CellCipher>,
}

impl<'a> CellCodec<'a> {
    /// Create a codec; `None` means no key is set
    pub fn new(cipher: Option<&'a CellCipher>) -> Self {
        Self { cipher }
    }

    /// Resolve one cell to its display/export string
    ///
    /// Absent cells are always `""`, whatever the column flag. Unflagged
    /// columns pass their canonical string through untouched.
    ///
    /// The work is CPU-bound and completes on first poll; callers that
    /// `join_all` many cells get ordering, not parallel decryption.
    pub async fn resolve(&self, raw: &CellValue, is_encrypted: bool) -> String {
        self.resolve_now(raw, is_encrypted)
    }

    /// Synchronous form of [`CellCodec::resolve`]
    pub fn resolve_now(&self, raw: &CellValue, is_encrypted: bool) -> String {
        if raw.is_absent() {
            return String::new();
        }

        let text = raw.stringify();
        if !is_encrypted {
            return text;
        }

        let Some(cipher) = self.cipher else {
            debug!("No active key, showing ciphertext");
            return text;
        };

        match cipher.decrypt(&text) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                debug!(error = %e, "Decrypt fallback, showing ciphertext");
                text
            }
        }
    }
}
