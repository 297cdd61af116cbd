//! Table import
//!
//! Builds a [`TableModel`] from a file's raw bytes. Only the first sheet of a
//! workbook is read. The first row becomes the headers and every later row is
//! data. Any failure is a [`DecryptorError::Parse`](crate::error::DecryptorError::Parse)
//! and produces no table at all.

pub mod delimited;
pub mod workbook;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{DecryptorError, DecryptorResult};
use crate::models::{CellValue, TableModel};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Xlsx,
    Xls,
    Ods,
}

impl TableFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        extension.parse().ok()
    }

    /// Guess a format from leading magic bytes; anything unrecognized is delimited text
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) {
            Self::Xlsx
        } else if bytes.starts_with(OLE_MAGIC) {
            Self::Xls
        } else {
            Self::Csv
        }
    }

    /// Extension first, then content sniffing
    pub fn detect(path: Option<&Path>, bytes: &[u8]) -> Self {
        path.and_then(Self::from_path)
            .unwrap_or_else(|| Self::sniff(bytes))
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Ods => "ods",
        };
        f.write_str(name)
    }
}

impl FromStr for TableFormat {
    type Err = DecryptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "tsv" | "tab" => Ok(Self::Tsv),
            "xlsx" | "xlsm" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            "ods" => Ok(Self::Ods),
            other => Err(DecryptorError::Parse(format!("Unsupported file format: {}", other))),
        }
    }
}

/// Parse raw file bytes into a table
pub fn load_table(bytes: &[u8], format: TableFormat) -> DecryptorResult<TableModel> {
    let grid = match format {
        TableFormat::Csv => delimited::read_grid(bytes, b',')?,
        TableFormat::Tsv => delimited::read_grid(bytes, b'\t')?,
        TableFormat::Xlsx | TableFormat::Xls | TableFormat::Ods => workbook::read_first_sheet(bytes)?,
    };

    let table = grid_to_table(grid)?;
    info!(
        format = %format,
        columns = table.width(),
        rows = table.row_count(),
        "Loaded table"
    );
    Ok(table)
}

/// Read a file from disk, detecting its format
pub fn load_table_from_path(path: &Path) -> DecryptorResult<TableModel> {
    let bytes = std::fs::read(path)
        .map_err(|e| DecryptorError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    load_table(&bytes, TableFormat::detect(Some(path), &bytes))
}

fn grid_to_table(mut grid: Vec<Vec<CellValue>>) -> DecryptorResult<TableModel> {
    while grid
        .last()
        .is_some_and(|row| row.iter().all(CellValue::is_absent))
    {
        grid.pop();
    }

    let mut rows = grid.into_iter();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| DecryptorError::Parse("File contains no header row".into()))?
        .iter()
        .map(CellValue::stringify)
        .collect();

    Ok(TableModel::new(headers, rows.collect()))
}
