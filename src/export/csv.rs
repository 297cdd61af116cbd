//! CSV export
//!
//! Writes the resolved export grid as comma-separated text.

use csv::WriterBuilder;

use crate::error::{DecryptorError, DecryptorResult};

/// Serialize a grid of strings to CSV bytes
pub fn write_csv(grid: &[Vec<String>]) -> DecryptorResult<Vec<u8>> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

    for row in grid {
        writer
            .write_record(row)
            .map_err(|e| DecryptorError::Export(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| DecryptorError::Export(format!("Failed to flush CSV: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_write_csv() {
        let bytes = write_csv(&grid(&[&["id", "ssn"], &["1", "111-22-3333"]])).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "id,ssn\n1,111-22-3333\n");
    }

    #[test]
    fn test_special_characters_quoted() {
        let bytes = write_csv(&grid(&[&["name"], &["Doe, \"JJ\"\nJr"]])).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Doe, \"\"JJ\"\"\nJr\""));
    }
}
