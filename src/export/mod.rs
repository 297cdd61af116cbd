//! Export module for the decryptor
//!
//! Materializes the whole table, passed through the cell codec with the
//! current flags and key, into one of:
//! - XLSX: single-sheet spreadsheet workbook
//! - CSV: comma-separated text
//!
//! The file is always delivered inside a single-entry zip archive. Each
//! export builds its own grid from scratch; nothing is shared between runs.

pub mod archive;
pub mod csv;
pub mod guard;
pub mod xlsx;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use futures::future::join_all;
use tracing::{error, info};

use crate::crypto::CellCipher;
use crate::error::{DecryptorError, DecryptorResult};
use crate::models::{ColumnEncryptionState, TableModel};
use crate::services::CellCodec;

pub use archive::archive_single;
pub use self::csv::write_csv;
pub use guard::{ExportGuards, ExportState, ExportTicket};
pub use xlsx::write_xlsx;

/// Target format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DecryptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            other => Err(DecryptorError::Validation(format!(
                "Unsupported export format: {}",
                other
            ))),
        }
    }
}

/// A finished, downloadable export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Archive file name, e.g. `exported-data.zip`
    pub archive_name: String,
    /// Name of the single file inside the archive, e.g. `exported-data.csv`
    pub entry_name: String,
    /// Zip archive bytes
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the archive into `dir`, returning its path
    pub fn write_to(&self, dir: &Path) -> DecryptorResult<PathBuf> {
        let path = dir.join(&self.archive_name);
        std::fs::write(&path, &self.bytes).map_err(|e| {
            DecryptorError::Export(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }
}

/// Builds export artifacts from a table snapshot
pub struct ExportPipeline<'a> {
    table: &'a TableModel,
    state: &'a ColumnEncryptionState,
    codec: CellCodec<'a>,
    basename: &'a str,
}

impl<'a> ExportPipeline<'a> {
    pub fn new(
        table: &'a TableModel,
        state: &'a ColumnEncryptionState,
        cipher: Option<&'a CellCipher>,
        basename: &'a str,
    ) -> Self {
        Self {
            table,
            state,
            codec: CellCodec::new(cipher),
            basename,
        }
    }

    /// Header row followed by every data row, each cell resolved
    ///
    /// Short rows are padded to the header count; cells past the last
    /// header are kept and treated as unflagged.
    pub async fn build_grid(&self) -> Vec<Vec<String>> {
        let width = self.table.width();
        let rows = join_all(self.table.rows().iter().enumerate().map(|(row, cells)| async move {
            join_all((0..width.max(cells.len())).map(|column| {
                self.codec
                    .resolve(self.table.cell(row, column), self.state.is_encrypted(column))
            }))
            .await
        }))
        .await;

        let mut grid = Vec::with_capacity(rows.len() + 1);
        grid.push(self.table.headers().to_vec());
        grid.extend(rows);
        grid
    }

    /// Run a full export; nothing is produced unless every step succeeds
    ///
    /// Serialization runs on Tokio's blocking pool when a runtime is
    /// available, and inline otherwise.
    pub async fn export(&self, format: ExportFormat) -> DecryptorResult<ExportArtifact> {
        let entry_name = format!("{}.{}", self.basename, format.extension());
        let archive_name = format!("{}.zip", self.basename);

        let grid = self.build_grid().await;
        let rows = grid.len() - 1;

        let name = entry_name.clone();
        let result = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle
                .spawn_blocking(move || serialize(&grid, format, &name))
                .await
                .map_err(|e| DecryptorError::Export(format!("Export worker failed: {}", e)))
                .and_then(|inner| inner),
            Err(_) => serialize(&grid, format, &name),
        };

        match result {
            Ok(bytes) => {
                info!(format = %format, rows, size = bytes.len(), "Export complete");
                Ok(ExportArtifact {
                    archive_name,
                    entry_name,
                    bytes,
                })
            }
            Err(e) => {
                error!(format = %format, error = %e, "Export failed");
                Err(e)
            }
        }
    }
}

/// Serialize the grid and wrap it in an archive
pub fn serialize(grid: &[Vec<String>], format: ExportFormat, entry_name: &str) -> DecryptorResult<Vec<u8>> {
    let file = match format {
        ExportFormat::Xlsx => write_xlsx(grid)?,
        ExportFormat::Csv => write_csv(grid)?,
    };
    archive_single(entry_name, &file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CiphertextEncoding;
    use crate::import::{load_table, TableFormat};
    use crate::models::CellValue;
    use std::io::{Cursor, Read};
    use tempfile::TempDir;
    use zip::ZipArchive;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn unzip(artifact: &ExportArtifact) -> Vec<u8> {
        let mut archive = ZipArchive::new(Cursor::new(artifact.bytes.clone())).unwrap();
        assert_eq!(archive.len(), 1);
        let mut entry = archive.by_name(&artifact.entry_name).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        bytes
    }

    fn people() -> TableModel {
        TableModel::new(
            vec!["id".into(), "name".into(), "score".into()],
            vec![
                vec![CellValue::from("1"), CellValue::from("Ada, L."), CellValue::Float(9.5)],
                vec![CellValue::from("2"), CellValue::from("Grace"), CellValue::Empty],
                vec![CellValue::from("3")],
            ],
        )
    }

    fn as_strings(table: &TableModel) -> Vec<Vec<String>> {
        (0..table.row_count())
            .map(|r| (0..table.width()).map(|c| table.cell(r, c).stringify()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_round_trip_through_both_formats() {
        let table = people();
        let state = ColumnEncryptionState::for_table(&table);
        let pipeline = ExportPipeline::new(&table, &state, None, "exported-data");

        for (format, reread) in [
            (ExportFormat::Csv, TableFormat::Csv),
            (ExportFormat::Xlsx, TableFormat::Xlsx),
        ] {
            let artifact = pipeline.export(format).await.unwrap();
            assert_eq!(artifact.archive_name, "exported-data.zip");
            assert_eq!(artifact.entry_name, format!("exported-data.{}", format.extension()));

            let reloaded = load_table(&unzip(&artifact), reread).unwrap();
            assert_eq!(reloaded.headers(), table.headers());
            assert_eq!(as_strings(&reloaded), as_strings(&table));
        }
    }

    #[tokio::test]
    async fn test_encrypted_column_exports_plaintext() {
        let cipher = CellCipher::new(KEY, CiphertextEncoding::Hex);
        let table = TableModel::new(
            vec!["id".into(), "ssn".into()],
            vec![
                vec![CellValue::from("1"), CellValue::from(cipher.encrypt("111-22-3333").unwrap())],
                vec![CellValue::from("2"), CellValue::from(cipher.encrypt("444-55-6666").unwrap())],
            ],
        );
        let mut state = ColumnEncryptionState::for_table(&table);
        state.toggle(1).unwrap();

        let artifact = ExportPipeline::new(&table, &state, Some(&cipher), "exported-data")
            .export(ExportFormat::Csv)
            .await
            .unwrap();

        let text = String::from_utf8(unzip(&artifact)).unwrap();
        assert_eq!(text, "id,ssn\n1,111-22-3333\n2,444-55-6666\n");
    }

    #[tokio::test]
    async fn test_serialization_failure_produces_nothing() {
        let table = TableModel::new(
            vec!["blob".into()],
            vec![vec![CellValue::Text("x".repeat(40_000))]],
        );
        let state = ColumnEncryptionState::for_table(&table);

        let err = ExportPipeline::new(&table, &state, None, "exported-data")
            .export(ExportFormat::Xlsx)
            .await
            .unwrap_err();
        assert!(matches!(err, DecryptorError::Export(_)));
    }

    #[tokio::test]
    async fn test_write_to_directory() {
        let table = people();
        let state = ColumnEncryptionState::for_table(&table);
        let artifact = ExportPipeline::new(&table, &state, None, "report")
            .export(ExportFormat::Csv)
            .await
            .unwrap();

        let dir = TempDir::new().unwrap();
        let path = artifact.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("report.zip"));
        assert_eq!(std::fs::read(path).unwrap(), artifact.bytes);
    }

    #[tokio::test]
    async fn test_cells_past_last_header_are_exported() {
        let table = load_table(b"a,b\n1,2,EXTRA\n", TableFormat::Csv).unwrap();
        assert_eq!(table.cell(0, 2), &CellValue::from("EXTRA"));

        let mut state = ColumnEncryptionState::for_table(&table);
        state.toggle(1).unwrap();
        let cipher = CellCipher::new(KEY, CiphertextEncoding::Hex);

        let artifact = ExportPipeline::new(&table, &state, Some(&cipher), "exported-data")
            .export(ExportFormat::Csv)
            .await
            .unwrap();

        let text = String::from_utf8(unzip(&artifact)).unwrap();
        assert_eq!(text, "a,b\n1,2,EXTRA\n");
    }

    #[test]
    fn test_export_without_tokio_runtime() {
        let table = people();
        let state = ColumnEncryptionState::for_table(&table);
        let pipeline = ExportPipeline::new(&table, &state, None, "exported-data");

        let artifact = futures::executor::block_on(pipeline.export(ExportFormat::Csv)).unwrap();
        let text = String::from_utf8(unzip(&artifact)).unwrap();
        assert!(text.starts_with("id,name,score\n1,"));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
