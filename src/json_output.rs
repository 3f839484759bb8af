//! JSON output format for projected views
//!
//! Versioned envelope carrying the view's headings and items together with
//! per-metric totals over the displayed rows, for machine consumers.

use crate::view::{Heading, Rows, ViewMode, ViewState};
use serde::Serialize;

/// Per-metric totals across the displayed rows
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JsonSummary {
    /// Number of displayed rows
    pub rows: usize,
    /// Total main-thread time (ms)
    pub main_thread_time: f64,
    /// Total blocking time (ms)
    pub blocking_time: f64,
    /// Total decoded size (bytes)
    pub resource_size: u64,
    /// Total transfer size (bytes)
    pub transfer_size: u64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// View mode the items were projected for
    pub mode: ViewMode,
    /// Whether the consumer should paginate these rows
    pub paginate: bool,
    /// Ordered column descriptors
    pub headings: &'a [Heading],
    /// Ordered display rows
    pub items: &'a Rows,
    /// Totals over the displayed rows
    pub summary: JsonSummary,
}

impl<'a> JsonOutput<'a> {
    /// Build the output envelope from a projected view
    pub fn from_state(state: &'a ViewState) -> Self {
        let mut summary = JsonSummary {
            rows: state.len(),
            ..JsonSummary::default()
        };

        match &state.items {
            Rows::Entity(rows) => {
                for row in rows {
                    summary.main_thread_time += row.main_thread_time;
                    summary.blocking_time += row.blocking_time;
                    summary.resource_size += row.resource_size;
                    summary.transfer_size += row.transfer_size;
                }
            }
            Rows::Script(rows) => {
                for row in rows {
                    summary.main_thread_time += row.main_thread_time;
                    summary.blocking_time += row.blocking_time;
                    summary.resource_size += row.resource_size;
                    summary.transfer_size += row.transfer_size;
                }
            }
        }

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "ajeno-json-v1".to_string(),
            mode: state.mode,
            paginate: state.paginate(),
            headings: &state.headings,
            items: &state.items,
            summary,
        }
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
