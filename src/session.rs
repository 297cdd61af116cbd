//! Application session
//!
//! One `Session` owns everything a user works on: the loaded table, column
//! flags, the key, pagination and the export busy flags. Views read through
//! accessors and change state only through the operations below.
//!
//! Projections and exports run on snapshots. Every state change bumps a
//! generation counter so a projection requested before the change can be
//! recognized as stale and dropped (last request wins).

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Settings;
use crate::crypto::CellCipher;
use crate::error::{DecryptorError, DecryptorResult};
use crate::export::{ExportArtifact, ExportFormat, ExportGuards, ExportPipeline, ExportState, ExportTicket};
use crate::import::{self, TableFormat};
use crate::models::{ColumnEncryptionState, EncryptionKey, PaginationState, TableModel};
use crate::services::{DisplayProjection, ProjectedPage};

/// State of one user session
#[derive(Debug)]
pub struct Session {
    settings: Settings,
    table: Option<Arc<TableModel>>,
    encryption: ColumnEncryptionState,
    key: EncryptionKey,
    pagination: PaginationState,
    exports: Arc<ExportGuards>,
    generation: u64,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let pagination = PaginationState::new(settings.rows_per_page);
        Self {
            settings,
            table: None,
            encryption: ColumnEncryptionState::default(),
            key: EncryptionKey::new(),
            pagination,
            exports: ExportGuards::new(),
            generation: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn table(&self) -> Option<&TableModel> {
        self.table.as_deref()
    }

    pub fn encryption(&self) -> &ColumnEncryptionState {
        &self.encryption
    }

    pub fn key(&self) -> &EncryptionKey {
        &self.key
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn total_pages(&self) -> usize {
        self.table
            .as_ref()
            .map_or(0, |t| t.total_pages(self.pagination.rows_per_page()))
    }

    fn bump(&mut self) {
        self.generation += 1;
    }

    fn require_table(&self) -> DecryptorResult<&Arc<TableModel>> {
        self.table
            .as_ref()
            .ok_or_else(|| DecryptorError::Validation("No table loaded".into()))
    }

    fn cipher(&self) -> Option<CellCipher> {
        self.key.cipher(self.settings.ciphertext_encoding)
    }

    // ---- loading ----

    /// Replace the table with a freshly parsed one
    ///
    /// On failure the previous table, flags and page are left as they were.
    pub fn load(&mut self, bytes: &[u8], format: TableFormat) -> DecryptorResult<()> {
        self.install(import::load_table(bytes, format))
    }

    /// Read and load a file, detecting its format
    pub fn load_path(&mut self, path: &Path) -> DecryptorResult<()> {
        self.install(import::load_table_from_path(path))
    }

    fn install(&mut self, loaded: DecryptorResult<TableModel>) -> DecryptorResult<()> {
        let table = loaded.inspect_err(|e| {
            warn!(error = %e, "Load failed, keeping previous table");
        })?;

        self.encryption = ColumnEncryptionState::for_table(&table);
        self.pagination.reset();
        self.table = Some(Arc::new(table));
        self.bump();
        Ok(())
    }

    // ---- column flags ----

    /// Flip one column's flag by position
    pub fn toggle_column(&mut self, column: usize) -> DecryptorResult<bool> {
        let flag = self.encryption.toggle(column)?;
        self.bump();
        Ok(flag)
    }

    /// Flip the flag of every column named `header`
    pub fn toggle_encryption(&mut self, header: &str) -> DecryptorResult<Vec<usize>> {
        let table = Arc::clone(self.require_table()?);
        let columns = self.encryption.toggle_by_name(&table, header)?;
        self.bump();
        Ok(columns)
    }

    // ---- key ----

    pub fn edit_key(&mut self, value: impl Into<String>) -> DecryptorResult<()> {
        self.key.edit(value)?;
        self.bump();
        Ok(())
    }

    pub fn set_key(&mut self) {
        self.key.set();
        self.bump();
    }

    pub fn unset_key(&mut self) {
        self.key.unset();
        self.bump();
    }

    // ---- pagination ----

    pub fn go_to_page(&mut self, page: usize) -> usize {
        let total = self.total_pages();
        let page = self.pagination.go_to(page, total);
        self.bump();
        page
    }

    pub fn next_page(&mut self) -> usize {
        let total = self.total_pages();
        let page = self.pagination.next(total);
        self.bump();
        page
    }

    pub fn previous_page(&mut self) -> usize {
        let total = self.total_pages();
        let page = self.pagination.previous(total);
        self.bump();
        page
    }

    // ---- projection ----

    /// Snapshot the current page for projection
    ///
    /// Starting a request supersedes any earlier one.
    pub fn request_projection(&mut self) -> DecryptorResult<ProjectionRequest> {
        let table = Arc::clone(self.require_table()?);
        self.bump();
        Ok(ProjectionRequest {
            generation: self.generation,
            table,
            encryption: self.encryption.clone(),
            cipher: self.cipher(),
            page: self.pagination.current_page(),
            rows_per_page: self.pagination.rows_per_page(),
        })
    }

    /// Keep a finished projection only if nothing newer has started since
    pub fn accept(&self, projection: Projection) -> Option<ProjectedPage> {
        if projection.generation == self.generation {
            Some(projection.page)
        } else {
            warn!(
                stale = projection.generation,
                current = self.generation,
                "Dropping stale projection"
            );
            None
        }
    }

    /// Request, run and accept the current page in one go
    pub async fn current_page(&mut self) -> DecryptorResult<ProjectedPage> {
        let projection = self.request_projection()?.run().await;
        self.accept(projection)
            .ok_or_else(|| DecryptorError::Validation("Projection superseded".into()))
    }

    // ---- export ----

    pub fn export_state(&self, format: ExportFormat) -> ExportState {
        self.exports.state(format)
    }

    /// Move `format` to `Exporting` and snapshot everything the export needs
    pub fn begin_export(&self, format: ExportFormat) -> DecryptorResult<ExportJob> {
        let table = Arc::clone(self.require_table()?);
        let ticket = self.exports.try_begin(format)?;
        info!(format = %format, rows = table.row_count(), "Export started");
        Ok(ExportJob {
            ticket,
            table,
            encryption: self.encryption.clone(),
            cipher: self.cipher(),
            basename: self.settings.export_basename.clone(),
        })
    }

    /// Export the whole table in `format`
    pub async fn export(&self, format: ExportFormat) -> DecryptorResult<ExportArtifact> {
        self.begin_export(format)?.run().await
    }
}

/// A page projection detached from the session
#[derive(Debug, Clone)]
pub struct ProjectionRequest {
    generation: u64,
    table: Arc<TableModel>,
    encryption: ColumnEncryptionState,
    cipher: Option<CellCipher>,
    page: usize,
    rows_per_page: usize,
}

impl ProjectionRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn run(self) -> Projection {
        let page = DisplayProjection::new(&self.table, &self.encryption, self.cipher.as_ref())
            .project(self.page, self.rows_per_page)
            .await;
        Projection {
            generation: self.generation,
            page,
        }
    }
}

/// A finished projection tagged with the request generation
#[derive(Debug, Clone)]
pub struct Projection {
    generation: u64,
    page: ProjectedPage,
}

impl Projection {
    pub fn page(&self) -> &ProjectedPage {
        &self.page
    }
}

/// An export holding its format's busy flag until it finishes
#[derive(Debug)]
pub struct ExportJob {
    ticket: ExportTicket,
    table: Arc<TableModel>,
    encryption: ColumnEncryptionState,
    cipher: Option<CellCipher>,
    basename: String,
}

impl ExportJob {
    pub async fn run(self) -> DecryptorResult<ExportArtifact> {
        let format = self.ticket.format();
        ExportPipeline::new(&self.table, &self.encryption, self.cipher.as_ref(), &self.basename)
            .export(format)
            .await
        // ticket drops here, returning the format to Idle
    }
}
