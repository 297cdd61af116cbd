//! Table model
//!
//! Header row plus data rows of one loaded file. A table is built once per
//! successful load and never mutated afterwards; a new load replaces it.

use super::cell::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A loaded rectangular (or ragged) table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableModel {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TableModel {
    /// Create a table from headers and data rows
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Column headers in file order; duplicates are distinct columns
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of columns (header count)
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell, treating cells past a ragged row's end as empty
    pub fn cell(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Indices of every column whose header equals `name`
    pub fn columns_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.headers
            .iter()
            .enumerate()
            .filter(move |(_, header)| header.as_str() == name)
            .map(|(index, _)| index)
    }

    /// Number of pages needed to show every row
    pub fn total_pages(&self, rows_per_page: usize) -> usize {
        if rows_per_page == 0 {
            return 0;
        }
        self.rows.len().div_ceil(rows_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> TableModel {
        TableModel::new(
            vec!["id".into(), "name".into()],
            (0..rows)
                .map(|i| vec![CellValue::Int(i as i64), CellValue::from("x")])
                .collect(),
        )
    }

    #[test]
    fn test_ragged_cells_read_as_empty() {
        let table = TableModel::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![CellValue::from("1")]],
        );
        assert_eq!(table.cell(0, 0), &CellValue::from("1"));
        assert_eq!(table.cell(0, 2), &CellValue::Empty);
        assert_eq!(table.cell(5, 0), &CellValue::Empty);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(table(0).total_pages(10), 0);
        assert_eq!(table(10).total_pages(10), 1);
        assert_eq!(table(25).total_pages(10), 3);
        assert_eq!(table(25).total_pages(0), 0);
    }

    #[test]
    fn test_columns_named_finds_duplicates() {
        let table = TableModel::new(
            vec!["email".into(), "id".into(), "email".into()],
            Vec::new(),
        );
        assert_eq!(table.columns_named("email").collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(table.columns_named("phone").count(), 0);
    }
}
