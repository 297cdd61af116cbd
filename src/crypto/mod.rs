//! Cryptographic functions for the decryptor
//!
//! Provides AES-256-CBC cell decryption (and the matching producer side)
//! keyed directly by the caller-supplied key string.

pub mod cipher;
pub mod secure_memory;

pub use cipher::{decrypt_cell, encrypt_cell, CellCipher, CiphertextEncoding, IV_SIZE, KEY_SIZE};
pub use secure_memory::SecureString;
