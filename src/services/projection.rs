//! Display projection
//!
//! Computes the decrypted slice of the table for one page. Every visible cell
//! is resolved concurrently and the page is returned only once all of them
//! are done, assembled in the table's own row and column order.

use futures::future::join_all;

use crate::crypto::CellCipher;
use crate::models::{ColumnEncryptionState, TableModel};

use super::codec::CellCodec;

/// One rendered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPage {
    /// Requested page (1-indexed)
    pub page: usize,
    /// Total pages for the table at this page size
    pub total_pages: usize,
    /// Zero-based index of the first row on this page
    pub first_row: usize,
    /// Total data rows in the table
    pub total_rows: usize,
    pub headers: Vec<String>,
    /// Encryption flag per header
    pub encrypted: Vec<bool>,
    /// Resolved cells, one entry per header
    pub rows: Vec<Vec<String>>,
}

impl ProjectedPage {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Projects pages of a table through the cell codec
pub struct DisplayProjection<'a> {
    table: &'a TableModel,
    state: &'a ColumnEncryptionState,
    codec: CellCodec<'a>,
}

impl<'a> DisplayProjection<'a> {
    pub fn new(
        table: &'a TableModel,
        state: &'a ColumnEncryptionState,
        cipher: Option<&'a CellCipher>,
    ) -> Self {
        Self {
            table,
            state,
            codec: CellCodec::new(cipher),
        }
    }

    /// Resolve the rows of `page`; pages past the end are empty
    pub async fn project(&self, page: usize, rows_per_page: usize) -> ProjectedPage {
        let page = page.max(1);
        let rows_per_page = rows_per_page.max(1);
        let total_rows = self.table.row_count();

        let start = (page - 1).saturating_mul(rows_per_page).min(total_rows);
        let end = start.saturating_add(rows_per_page).min(total_rows);

        let rows = join_all((start..end).map(|row| self.resolve_row(row))).await;

        ProjectedPage {
            page,
            total_pages: self.table.total_pages(rows_per_page),
            first_row: start,
            total_rows,
            headers: self.table.headers().to_vec(),
            encrypted: (0..self.table.width())
                .map(|column| self.state.is_encrypted(column))
                .collect(),
            rows,
        }
    }

    async fn resolve_row(&self, row: usize) -> Vec<String> {
        join_all((0..self.table.width()).map(|column| {
            self.codec
                .resolve(self.table.cell(row, column), self.state.is_encrypted(column))
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CiphertextEncoding;
    use crate::models::CellValue;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn numbered_table(rows: usize) -> TableModel {
        TableModel::new(
            vec!["n".into()],
            (1..=rows).map(|i| vec![CellValue::Int(i as i64)]).collect(),
        )
    }

    fn first_column(page: &ProjectedPage) -> Vec<String> {
        page.rows.iter().map(|r| r[0].clone()).collect()
    }

    #[tokio::test]
    async fn test_pages_of_a_25_row_table() {
        let table = numbered_table(25);
        let state = ColumnEncryptionState::for_table(&table);
        let projection = DisplayProjection::new(&table, &state, None);

        let page1 = projection.project(1, 10).await;
        assert_eq!(page1.total_pages, 3);
        assert_eq!(first_column(&page1), (1..=10).map(|i| i.to_string()).collect::<Vec<_>>());

        let page3 = projection.project(3, 10).await;
        assert_eq!(page3.first_row, 20);
        assert_eq!(first_column(&page3), (21..=25).map(|i| i.to_string()).collect::<Vec<_>>());

        let page4 = projection.project(4, 10).await;
        assert!(page4.is_empty());
        assert_eq!(page4.total_pages, 3);
    }

    #[tokio::test]
    async fn test_ragged_rows_padded() {
        let table = TableModel::new(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::from("only")]],
        );
        let state = ColumnEncryptionState::for_table(&table);
        let page = DisplayProjection::new(&table, &state, None).project(1, 10).await;
        assert_eq!(page.rows, vec![vec!["only".to_string(), String::new()]]);
    }

    #[tokio::test]
    async fn test_decrypts_flagged_columns_in_order() {
        let cipher = CellCipher::new(KEY, CiphertextEncoding::Hex);
        let plaintexts: Vec<String> = (0..12).map(|i| format!("secret-{}", i)).collect();
        let table = TableModel::new(
            vec!["id".into(), "secret".into()],
            plaintexts
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    vec![
                        CellValue::Int(i as i64),
                        CellValue::from(cipher.encrypt(p).unwrap()),
                    ]
                })
                .collect(),
        );
        let mut state = ColumnEncryptionState::for_table(&table);
        state.toggle(1).unwrap();

        let page = DisplayProjection::new(&table, &state, Some(&cipher))
            .project(2, 10)
            .await;

        assert_eq!(page.encrypted, vec![false, true]);
        assert_eq!(
            page.rows,
            vec![
                vec!["10".to_string(), "secret-10".to_string()],
                vec!["11".to_string(), "secret-11".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_page_zero_treated_as_first() {
        let table = numbered_table(3);
        let state = ColumnEncryptionState::for_table(&table);
        let page = DisplayProjection::new(&table, &state, None).project(0, 2).await;
        assert_eq!(page.page, 1);
        assert_eq!(first_column(&page), vec!["1", "2"]);
    }
}
