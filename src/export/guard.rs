//! Per-format export state machine
//!
//! Each format moves `Idle → Exporting → Idle`. Starting an export while the
//! same format is already exporting is refused; the busy flag is released
//! when the ticket drops, whether the export succeeded or failed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::error::{DecryptorError, DecryptorResult};

use super::ExportFormat;

/// State of one format's export button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Exporting,
}

/// Busy flags for every export format
#[derive(Debug, Default)]
pub struct ExportGuards {
    xlsx: AtomicBool,
    csv: AtomicBool,
}

impl ExportGuards {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn flag(&self, format: ExportFormat) -> &AtomicBool {
        match format {
            ExportFormat::Xlsx => &self.xlsx,
            ExportFormat::Csv => &self.csv,
        }
    }

    pub fn state(&self, format: ExportFormat) -> ExportState {
        if self.flag(format).load(Ordering::Acquire) {
            ExportState::Exporting
        } else {
            ExportState::Idle
        }
    }

    /// Move `format` to `Exporting`, or fail if it already is
    pub fn try_begin(self: &Arc<Self>, format: ExportFormat) -> DecryptorResult<ExportTicket> {
        self.flag(format)
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                warn!(format = %format, "Export already in progress");
                DecryptorError::ExportBusy(format.to_string())
            })?;

        Ok(ExportTicket {
            guards: Arc::clone(self),
            format,
        })
    }
}

/// Held for the duration of one export; returns the format to `Idle` on drop
#[derive(Debug)]
pub struct ExportTicket {
    guards: Arc<ExportGuards>,
    format: ExportFormat,
}

impl ExportTicket {
    pub fn format(&self) -> ExportFormat {
        self.format
    }
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.guards.flag(self.format).store(false, Ordering::Release);
    }
}
