//! Page display formatting
//!
//! Formats a projected page as a terminal table with a page-number strip.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{page_window, PageMarker};
use crate::services::ProjectedPage;

/// Marker appended to headers of encrypted columns
pub const ENCRYPTED_MARKER: &str = " [enc]";

/// Format a page as a table followed by a pagination line
pub fn format_page(page: &ProjectedPage) -> String {
    if page.headers.is_empty() {
        return "Table has no columns.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(page.headers.iter().zip(&page.encrypted).map(|(header, encrypted)| {
        if *encrypted {
            format!("{}{}", header, ENCRYPTED_MARKER)
        } else {
            header.clone()
        }
    }));
    for row in &page.rows {
        builder.push_record(row.iter().cloned());
    }

    let mut table = builder.build();
    table.with(Style::modern());

    let mut output = table.to_string();
    output.push('\n');
    output.push_str(&format_pagination(page));
    output
}

/// "Rows 11-20 of 25 | Page 2 of 3: 1 [2] 3"
pub fn format_pagination(page: &ProjectedPage) -> String {
    let rows = if page.rows.is_empty() {
        format!("No rows on this page ({} total)", page.total_rows)
    } else {
        format!(
            "Rows {}-{} of {}",
            page.first_row + 1,
            page.first_row + page.rows.len(),
            page.total_rows
        )
    };

    let strip: Vec<String> = page_window(page.page, page.total_pages)
        .into_iter()
        .map(|marker| match marker {
            PageMarker::Page(n) if n == page.page => format!("[{}]", n),
            other => other.to_string(),
        })
        .collect();

    format!(
        "{} | Page {} of {}: {}",
        rows,
        page.page,
        page.total_pages.max(1),
        strip.join(" ")
    )
}
