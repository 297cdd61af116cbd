//! Column list formatting

use crate::models::{ColumnEncryptionState, TableModel};

/// Format the columns of a table with their positions and flags
pub fn format_column_list(table: &TableModel, state: &ColumnEncryptionState) -> String {
    if table.headers().is_empty() {
        return "No columns found.".to_string();
    }

    let name_width = table
        .headers()
        .iter()
        .map(|h| h.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:<name_width$}  {}\n",
        "#",
        "Name",
        "Encrypted",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->4}  {:-<name_width$}  {:-<9}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (index, header) in table.headers().iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {:<name_width$}  {}\n",
            index,
            header,
            if state.is_encrypted(index) { "yes" } else { "" },
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\n{} rows", table.row_count()));
    output
}
