//! Shared CLI arguments
//!
//! Key entry and column selection options used by several commands, and
//! the code that applies them to a session.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Args;

use crate::crypto::CiphertextEncoding;
use crate::error::{DecryptorError, DecryptorResult};
use crate::session::Session;

/// A column named on the command line: `#3` by position, otherwise by header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRef {
    Index(usize),
    Name(String),
}

impl FromStr for ColumnRef {
    type Err = DecryptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(index) = s.strip_prefix('#') {
            let index = index
                .parse()
                .map_err(|_| DecryptorError::Validation(format!("Invalid column index: {}", s)))?;
            return Ok(Self::Index(index));
        }
        if s.is_empty() {
            return Err(DecryptorError::Validation("Column name cannot be empty".into()));
        }
        Ok(Self::Name(s.to_string()))
    }
}

/// Key entry options
#[derive(Args, Debug, Clone, Default)]
pub struct KeyArgs {
    /// Encryption key (32 bytes for AES-256)
    #[arg(short, long, env = "DECRYPTOR_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Prompt for the key without echoing it
    #[arg(long, conflicts_with = "key")]
    pub key_prompt: bool,

    /// Ciphertext text encoding (overrides settings)
    #[arg(long)]
    pub encoding: Option<CiphertextEncoding>,
}

impl KeyArgs {
    /// Resolve the key from the flag, environment, or an interactive prompt
    pub fn read_key(&self) -> DecryptorResult<Option<String>> {
        if self.key_prompt {
            return prompt_key("Encryption key: ").map(Some);
        }
        Ok(self.key.clone())
    }
}

/// Options that set up a session over one input file
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Input file (csv, tsv, xlsx, xls, ods)
    pub file: PathBuf,

    /// Mark a column as encrypted (`#index` or header name); repeatable
    #[arg(short, long = "encrypt", value_name = "COLUMN")]
    pub encrypted: Vec<ColumnRef>,

    #[command(flatten)]
    pub key: KeyArgs,
}

impl SessionArgs {
    /// Load the file and apply column flags and key
    pub fn apply(&self, session: &mut Session) -> DecryptorResult<()> {
        session.load_path(&self.file)?;

        for column in &self.encrypted {
            match column {
                ColumnRef::Index(index) => {
                    session.toggle_column(*index)?;
                }
                ColumnRef::Name(name) => {
                    session.toggle_encryption(name)?;
                }
            }
        }

        if let Some(key) = self.key.read_key()? {
            session.edit_key(key)?;
            session.set_key();
        }

        Ok(())
    }
}

/// Prompt for a key (hidden input)
fn prompt_key(prompt: &str) -> DecryptorResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| DecryptorError::Encryption(format!("Failed to read key: {}", e)))
}
