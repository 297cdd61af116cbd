//! AES-256-CBC cell encryption/decryption
//!
//! Cell ciphertext is `IV || AES-256-CBC(PKCS#7(plaintext))` rendered as text
//! (hex by default, base64 optionally). The key string's UTF-8 bytes are the
//! raw 32-byte AES key; no derivation happens here.

use std::fmt;
use std::str::FromStr;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{DecryptorError, DecryptorResult};

use super::SecureString;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Required key length in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

const BLOCK_SIZE: usize = 16;

/// Text encoding of ciphertext cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiphertextEncoding {
    #[default]
    Hex,
    Base64,
}

impl CiphertextEncoding {
    fn encode(self, bytes: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(bytes),
            Self::Base64 => STANDARD.encode(bytes),
        }
    }

    fn decode(self, text: &str) -> DecryptorResult<Vec<u8>> {
        match self {
            Self::Hex => hex::decode(text).map_err(|e| {
                DecryptorError::Encryption(format!("Invalid hex ciphertext: {}", e))
            }),
            Self::Base64 => STANDARD.decode(text).map_err(|e| {
                DecryptorError::Encryption(format!("Invalid base64 ciphertext: {}", e))
            }),
        }
    }
}

impl fmt::Display for CiphertextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

impl FromStr for CiphertextEncoding {
    type Err = DecryptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            other => Err(DecryptorError::Config(format!(
                "Unknown ciphertext encoding: {}",
                other
            ))),
        }
    }
}

fn key_bytes(key: &str) -> DecryptorResult<&[u8]> {
    let bytes = key.as_bytes();
    if bytes.len() != KEY_SIZE {
        return Err(DecryptorError::Encryption(format!(
            "Invalid key size: expected {} bytes, got {}",
            KEY_SIZE,
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Encrypt a cell value with a fresh random IV
pub fn encrypt_cell(
    plaintext: &str,
    key: &str,
    encoding: CiphertextEncoding,
) -> DecryptorResult<String> {
    let key = key_bytes(key)?;

    let mut iv = [0u8; IV_SIZE];
    OsRng.fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|e| DecryptorError::Encryption(format!("Failed to create cipher: {}", e)))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut payload = Vec::with_capacity(IV_SIZE + ciphertext.len());
    payload.extend_from_slice(&iv);
    payload.extend_from_slice(&ciphertext);

    Ok(encoding.encode(&payload))
}

/// Decrypt a cell value produced by [`encrypt_cell`]
pub fn decrypt_cell(
    ciphertext: &str,
    key: &str,
    encoding: CiphertextEncoding,
) -> DecryptorResult<String> {
    let key = key_bytes(key)?;
    let payload = encoding.decode(ciphertext)?;

    if payload.len() < IV_SIZE + BLOCK_SIZE || (payload.len() - IV_SIZE) % BLOCK_SIZE != 0 {
        return Err(DecryptorError::Encryption(format!(
            "Invalid ciphertext length: {}",
            payload.len()
        )));
    }

    let (iv, body) = payload.split_at(IV_SIZE);
    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| DecryptorError::Encryption(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher.decrypt_padded_vec_mut::<Pkcs7>(body).map_err(|_| {
        DecryptorError::Encryption("Decryption failed: invalid key or corrupted data".to_string())
    })?;

    String::from_utf8(plaintext)
        .map_err(|e| DecryptorError::Encryption(format!("Invalid UTF-8 in decrypted data: {}", e)))
}

/// A key paired with the agreed ciphertext encoding
#[derive(Debug, Clone)]
pub struct CellCipher {
    key: SecureString,
    encoding: CiphertextEncoding,
}

impl CellCipher {
    pub fn new(key: impl Into<SecureString>, encoding: CiphertextEncoding) -> Self {
        Self {
            key: key.into(),
            encoding,
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> DecryptorResult<String> {
        encrypt_cell(plaintext, &self.key, self.encoding)
    }

    pub fn decrypt(&self, ciphertext: &str) -> DecryptorResult<String> {
        decrypt_cell(ciphertext, &self.key, self.encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "abcdefghijklmnopqrstuvwxyz012345";
    const OTHER_KEY: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ012345";

    #[test]
    fn test_encrypt_decrypt_hex() {
        let encrypted = encrypt_cell("111-22-3333", KEY, CiphertextEncoding::Hex).unwrap();
        assert!(encrypted.chars().all(|c| c.is_ascii_hexdigit()));

        let decrypted = decrypt_cell(&encrypted, KEY, CiphertextEncoding::Hex).unwrap();
        assert_eq!(decrypted, "111-22-3333");
    }

    #[test]
    fn test_encrypt_decrypt_base64() {
        let encrypted = encrypt_cell("jane@example.com", KEY, CiphertextEncoding::Base64).unwrap();
        let decrypted = decrypt_cell(&encrypted, KEY, CiphertextEncoding::Base64).unwrap();
        assert_eq!(decrypted, "jane@example.com");
    }

    #[test]
    fn test_layout_is_iv_plus_blocks() {
        let encrypted = encrypt_cell("short", KEY, CiphertextEncoding::Hex).unwrap();
        let raw = hex::decode(encrypted).unwrap();
        assert_eq!(raw.len(), IV_SIZE + BLOCK_SIZE);
    }

    #[test]
    fn test_different_ivs() {
        let a = encrypt_cell("same", KEY, CiphertextEncoding::Hex).unwrap();
        let b = encrypt_cell("same", KEY, CiphertextEncoding::Hex).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let encrypted = encrypt_cell("444-55-6666", KEY, CiphertextEncoding::Hex).unwrap();
        assert!(decrypt_cell(&encrypted, OTHER_KEY, CiphertextEncoding::Hex).is_err());
    }

    #[test]
    fn test_short_key_rejected() {
        assert!(encrypt_cell("x", "secret", CiphertextEncoding::Hex).is_err());
        assert!(decrypt_cell("00", "", CiphertextEncoding::Hex).is_err());
    }

    #[test]
    fn test_malformed_ciphertext_fails() {
        assert!(decrypt_cell("not hex at all", KEY, CiphertextEncoding::Hex).is_err());
        assert!(decrypt_cell("abcd", KEY, CiphertextEncoding::Hex).is_err());
        assert!(decrypt_cell("Xy9==", KEY, CiphertextEncoding::Base64).is_err());
    }

    #[test]
    fn test_empty_plaintext() {
        let encrypted = encrypt_cell("", KEY, CiphertextEncoding::Hex).unwrap();
        assert_eq!(decrypt_cell(&encrypted, KEY, CiphertextEncoding::Hex).unwrap(), "");
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("HEX".parse::<CiphertextEncoding>().unwrap(), CiphertextEncoding::Hex);
        assert_eq!(
            "base64".parse::<CiphertextEncoding>().unwrap(),
            CiphertextEncoding::Base64
        );
        assert!("rot13".parse::<CiphertextEncoding>().is_err());
    }

    #[test]
    fn test_cell_cipher_round_trip() {
        let cipher = CellCipher::new(KEY, CiphertextEncoding::Base64);
        let sealed = cipher.encrypt("ünïcödé").unwrap();
        assert_eq!(cipher.decrypt(&sealed).unwrap(), "ünïcödé");
    }
}
