//! Spreadsheet export
//!
//! Writes the resolved export grid into a single-sheet xlsx workbook. Every
//! non-empty cell is written as a string; empty strings leave the cell blank.

use rust_xlsxwriter::Workbook;

use crate::error::{DecryptorError, DecryptorResult};

const SHEET_NAME: &str = "Sheet1";

/// Serialize a grid of strings to xlsx bytes
pub fn write_xlsx(grid: &[Vec<String>]) -> DecryptorResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row_index, row) in grid.iter().enumerate() {
        let row_num = u32::try_from(row_index)
            .map_err(|_| DecryptorError::Export(format!("Row {} out of range", row_index)))?;

        for (col_index, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col_num = u16::try_from(col_index).map_err(|_| {
                DecryptorError::Export(format!("Column {} out of range", col_index))
            })?;
            worksheet.write_string(row_num, col_num, value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
