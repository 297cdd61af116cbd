//! Delimited text reader
//!
//! Delimited text carries no types, so every non-empty field is text. Row
//! widths may differ.

use csv::ReaderBuilder;

use crate::error::DecryptorResult;
use crate::models::CellValue;

/// Read every record (header included) as a grid of cells
pub fn read_grid(bytes: &[u8], delimiter: u8) -> DecryptorResult<Vec<Vec<CellValue>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_fields() {
        let grid = read_grid(b"name,note\n\"Doe, Jane\",\"say \"\"hi\"\"\"\n", b',').unwrap();
        assert_eq!(grid[1][0], CellValue::from("Doe, Jane"));
        assert_eq!(grid[1][1], CellValue::from("say \"hi\""));
    }

    #[test]
    fn test_numbers_stay_text() {
        let grid = read_grid(b"id\n0042\n", b',').unwrap();
        assert_eq!(grid[1][0], CellValue::from("0042"));
    }

    #[test]
    fn test_ragged_rows_tolerated() {
        let grid = read_grid(b"a,b,c\n1\n1,2,3,4\n", b',').unwrap();
        assert_eq!(grid[1].len(), 1);
        assert_eq!(grid[2].len(), 4);
    }

    #[test]
    fn test_empty_fields_are_absent() {
        let grid = read_grid(b"a,b\n,x\n", b',').unwrap();
        assert_eq!(grid[1][0], CellValue::Empty);
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let err = read_grid(b"a,b\n\xff\xfe,1\n", b',').unwrap_err();
        assert!(err.is_parse());
    }
}
