//! Session encryption key
//!
//! The key is freely editable until it is set. Setting latches it; unsetting
//! re-enables editing but keeps the typed value. Only a set key is used to
//! decrypt.

use crate::crypto::{CellCipher, CiphertextEncoding, SecureString};
use crate::error::{DecryptorError, DecryptorResult};

/// The single caller-supplied key string and its set/unset latch
#[derive(Debug, Clone, Default)]
pub struct EncryptionKey {
    value: SecureString,
    is_set: bool,
}

impl EncryptionKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the key text; rejected while the key is set
    pub fn edit(&mut self, value: impl Into<String>) -> DecryptorResult<()> {
        if self.is_set {
            return Err(DecryptorError::Validation(
                "Unset the encryption key before editing it".into(),
            ));
        }
        self.value.replace(value);
        Ok(())
    }

    /// Latch the current value as the active key
    pub fn set(&mut self) {
        self.is_set = true;
    }

    /// Release the latch; the value is kept for further editing
    pub fn unset(&mut self) {
        self.is_set = false;
    }

    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// The key text as typed (set or not)
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// The key to decrypt with, only while set
    pub fn active(&self) -> Option<&str> {
        self.is_set.then(|| self.value.as_str())
    }

    /// Cipher for the active key, if any
    pub fn cipher(&self, encoding: CiphertextEncoding) -> Option<CellCipher> {
        self.active()
            .map(|key| CellCipher::new(SecureString::new(key), encoding))
    }
}
