//! Text table output
//!
//! Renders a projected view as an aligned console table: heading texts,
//! a dashed separator, then one line per row. Millisecond columns print
//! with one decimal, byte columns as raw counts; numeric columns are
//! right-aligned.

use crate::view::{Cell, ItemType, ViewState};

fn format_cell(cell: &Cell<'_>) -> String {
    match cell {
        Cell::Text(text) => (*text).to_string(),
        Cell::Ms(value) => format!("{value:.1}"),
        Cell::Bytes(value) => value.to_string(),
    }
}

/// Render the view as an aligned text table
pub fn render(state: &ViewState) -> String {
    let formatted: Vec<Vec<String>> = (0..state.len())
        .filter_map(|index| state.cells(index))
        .map(|cells| cells.iter().map(format_cell).collect())
        .collect();

    // Column width: widest of heading text and any cell in the column
    let widths: Vec<usize> = state
        .headings
        .iter()
        .enumerate()
        .map(|(column, heading)| {
            formatted
                .iter()
                .map(|row| row[column].len())
                .chain(std::iter::once(heading.text.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut output = String::new();

    let header: Vec<String> = state
        .headings
        .iter()
        .zip(&widths)
        .map(|(heading, &width)| format!("{:<width$}", heading.text))
        .collect();
    output.push_str(header.join("  ").trim_end());
    output.push('\n');

    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    output.push_str(&separator.join("  "));
    output.push('\n');

    for row in &formatted {
        let line: Vec<String> = state
            .headings
            .iter()
            .zip(row)
            .zip(&widths)
            .map(|((heading, cell), &width)| match heading.item_type {
                ItemType::Text | ItemType::Link => format!("{cell:<width$}"),
                ItemType::Ms | ItemType::Bytes => format!("{cell:>width$}"),
            })
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }

    output
}
