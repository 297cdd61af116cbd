//! Zip packaging for exports
//!
//! Every export is delivered as a zip archive holding exactly one file.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{DecryptorError, DecryptorResult};

/// Wrap `contents` as the single entry `entry_name` of a new archive
pub fn archive_single(entry_name: &str, contents: &[u8]) -> DecryptorResult<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(entry_name, options)?;
    zip.write_all(contents)
        .map_err(|e| DecryptorError::Export(format!("Failed to write archive entry: {}", e)))?;

    Ok(zip.finish()?.into_inner())
}
