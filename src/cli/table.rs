//! Table CLI commands
//!
//! Implements viewing a page, listing columns, exporting, and sealing a
//! single value.

use std::path::Path;

use crate::config::Settings;
use crate::crypto::CellCipher;
use crate::display::{format_column_list, format_page};
use crate::error::{DecryptorError, DecryptorResult};
use crate::export::ExportFormat;
use crate::session::Session;

use super::args::{KeyArgs, SessionArgs};

fn open_session(settings: &Settings, args: &SessionArgs) -> DecryptorResult<Session> {
    let mut settings = settings.clone();
    if let Some(encoding) = args.key.encoding {
        settings.ciphertext_encoding = encoding;
    }

    let mut session = Session::new(settings);
    args.apply(&mut session)?;
    Ok(session)
}

/// Render one page of the table
pub async fn handle_view(settings: &Settings, args: &SessionArgs, page: usize) -> DecryptorResult<()> {
    let mut session = open_session(settings, args)?;
    session.go_to_page(page);

    let projected = session.current_page().await?;
    println!("{}", format_page(&projected));
    Ok(())
}

/// List the columns of a file
pub fn handle_columns(settings: &Settings, args: &SessionArgs) -> DecryptorResult<()> {
    let session = open_session(settings, args)?;
    let table = session
        .table()
        .ok_or_else(|| DecryptorError::Validation("No table loaded".into()))?;

    println!("{}", format_column_list(table, session.encryption()));
    Ok(())
}

/// Export the table and write the archive into `out_dir`
pub async fn handle_export(
    settings: &Settings,
    args: &SessionArgs,
    format: ExportFormat,
    out_dir: &Path,
) -> DecryptorResult<()> {
    let session = open_session(settings, args)?;
    let artifact = session.export(format).await?;
    let path = artifact.write_to(out_dir)?;

    println!(
        "Exported {} rows as {} to: {}",
        session.table().map_or(0, |t| t.row_count()),
        artifact.entry_name,
        path.display()
    );
    Ok(())
}

/// Encrypt a single value with the given key
pub fn handle_seal(settings: &Settings, key_args: &KeyArgs, value: &str) -> DecryptorResult<()> {
    let key = key_args
        .read_key()?
        .ok_or_else(|| DecryptorError::Validation("A key is required (--key or --key-prompt)".into()))?;
    let encoding = key_args.encoding.unwrap_or(settings.ciphertext_encoding);

    println!("{}", CellCipher::new(key, encoding).encrypt(value)?);
    Ok(())
}
