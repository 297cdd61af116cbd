//! Spreadsheet workbook reader
//!
//! Reads the first sheet of an xlsx/xlsm, legacy xls, or ods workbook through
//! calamine, keeping each cell's native type. Dates keep their serial number.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{DecryptorError, DecryptorResult};
use crate::models::CellValue;

/// Read the first sheet as a grid of cells
pub fn read_first_sheet(bytes: &[u8]) -> DecryptorResult<Vec<Vec<CellValue>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DecryptorError::Parse("Workbook contains no sheets".into()))??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect())
}

fn cell_value(data: &Data) -> CellValue {
    #[allow(unreachable_patterns)]
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(n) => CellValue::Int(*n),
        Data::Float(n) => CellValue::Float(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
