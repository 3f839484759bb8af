//! CSV output format for projected views
//!
//! Header row from the view's heading keys, one line per display row.
//! Values are written raw (no unit suffixes) for spreadsheet analysis and
//! machine parsing.

use crate::view::{Cell, ViewState};

/// Escape a CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_cell(cell: &Cell<'_>) -> String {
    match cell {
        Cell::Text(text) => escape_field(text),
        Cell::Ms(value) => format!("{value}"),
        Cell::Bytes(value) => value.to_string(),
    }
}

/// Render the view as CSV
pub fn render(state: &ViewState) -> String {
    let mut output = String::new();

    let header: Vec<&str> = state.headings.iter().map(|h| h.key).collect();
    output.push_str(&header.join(","));
    output.push('\n');

    for index in 0..state.len() {
        if let Some(cells) = state.cells(index) {
            let fields: Vec<String> = cells.iter().map(format_cell).collect();
            output.push_str(&fields.join(","));
            output.push('\n');
        }
    }

    output
}
