//! View projection state machine (entity view vs. script view)
//!
//! Both views are full, synchronous recomputations over the same raw
//! inputs: headings and items are produced together as one unit, never
//! updated independently. Every transition also publishes the third-party
//! summary to an injected [`SummarySink`] so unrelated downstream
//! visualizations can consume the underlying dataset.

use crate::aggregate::EntityAggregator;
use crate::record::{MappingEntry, ResourceRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Record-type tag under which the summary is published
pub const SUMMARY_RECORD_TYPE: &str = "thirdPartySummary";

/// Active table view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Resources grouped by owning third party, ranked by main-thread time
    #[default]
    Entity,
    /// One row per resource, in raw input order
    Script,
}

/// How a column's values are rendered by the table collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Text,
    Link,
    Ms,
    Bytes,
}

/// One column descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub key: &'static str,
    pub text: &'static str,
    #[serde(rename = "itemType")]
    pub item_type: ItemType,
}

/// Entity-view column set. Transfer size deliberately precedes resource
/// size here; the script view uses the opposite order.
pub const ENTITY_HEADINGS: [Heading; 5] = [
    Heading {
        key: "entity",
        text: "Third-Party",
        item_type: ItemType::Link,
    },
    Heading {
        key: "mainThreadTime",
        text: "Main Thread Time",
        item_type: ItemType::Ms,
    },
    Heading {
        key: "blockingTime",
        text: "Render Blocking Time",
        item_type: ItemType::Ms,
    },
    Heading {
        key: "transferSize",
        text: "Transfer Size",
        item_type: ItemType::Bytes,
    },
    Heading {
        key: "resourceSize",
        text: "Resource Size",
        item_type: ItemType::Bytes,
    },
];

/// Script-view column set
pub const SCRIPT_HEADINGS: [Heading; 5] = [
    Heading {
        key: "url",
        text: "URL",
        item_type: ItemType::Text,
    },
    Heading {
        key: "mainThreadTime",
        text: "Main Thread Time",
        item_type: ItemType::Ms,
    },
    Heading {
        key: "blockingTime",
        text: "Main Thread Blocking Time",
        item_type: ItemType::Ms,
    },
    Heading {
        key: "resourceSize",
        text: "Resource Size",
        item_type: ItemType::Bytes,
    },
    Heading {
        key: "transferSize",
        text: "Transfer Size",
        item_type: ItemType::Bytes,
    },
];

/// One ranked entity row. Field order mirrors [`ENTITY_HEADINGS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRow {
    pub entity: String,
    pub main_thread_time: f64,
    pub blocking_time: f64,
    pub transfer_size: u64,
    pub resource_size: u64,
}

/// One per-resource row. Field order mirrors [`SCRIPT_HEADINGS`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRow {
    pub url: String,
    pub main_thread_time: f64,
    pub blocking_time: f64,
    pub resource_size: u64,
    pub transfer_size: u64,
}

impl From<&ResourceRecord> for ScriptRow {
    fn from(record: &ResourceRecord) -> Self {
        Self {
            url: record.url.clone(),
            main_thread_time: record.main_thread_time,
            blocking_time: record.blocking_time,
            resource_size: record.resource_size,
            transfer_size: record.transfer_size,
        }
    }
}

/// Items of a view; the variant always agrees with [`ViewState::mode`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rows {
    Entity(Vec<EntityRow>),
    Script(Vec<ScriptRow>),
}

impl Rows {
    pub fn len(&self) -> usize {
        match self {
            Rows::Entity(rows) => rows.len(),
            Rows::Script(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrowed row handed to renderers and to the row-activation callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowRef<'a> {
    Entity(&'a EntityRow),
    Script(&'a ScriptRow),
}

/// One rendered cell value, aligned index-for-index with the view's
/// headings
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Ms(f64),
    Bytes(u64),
}

impl EntityRow {
    /// Cells in [`ENTITY_HEADINGS`] order
    pub fn cells(&self) -> [Cell<'_>; 5] {
        [
            Cell::Text(&self.entity),
            Cell::Ms(self.main_thread_time),
            Cell::Ms(self.blocking_time),
            Cell::Bytes(self.transfer_size),
            Cell::Bytes(self.resource_size),
        ]
    }
}

impl ScriptRow {
    /// Cells in [`SCRIPT_HEADINGS`] order
    pub fn cells(&self) -> [Cell<'_>; 5] {
        [
            Cell::Text(&self.url),
            Cell::Ms(self.main_thread_time),
            Cell::Ms(self.blocking_time),
            Cell::Bytes(self.resource_size),
            Cell::Bytes(self.transfer_size),
        ]
    }
}

/// Atomically computed headings + items for one view mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub headings: Vec<Heading>,
    pub items: Rows,
}

impl ViewState {
    /// Whether the external table collaborator should paginate: the script
    /// view asks for pagination, the entity view does not.
    pub fn paginate(&self) -> bool {
        self.mode != ViewMode::Entity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow one row by display index
    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        match &self.items {
            Rows::Entity(rows) => rows.get(index).map(RowRef::Entity),
            Rows::Script(rows) => rows.get(index).map(RowRef::Script),
        }
    }

    /// Forward a row's data, unmodified, to an external renderer callback
    /// (chart/graph drill-down). Returns false for an out-of-range index.
    pub fn activate_row<F>(&self, index: usize, mut pass: F) -> bool
    where
        F: FnMut(RowRef<'_>),
    {
        match self.row(index) {
            Some(row) => {
                pass(row);
                true
            }
            None => false,
        }
    }

    /// Cells of one row, aligned with `headings`
    pub fn cells(&self, index: usize) -> Option<[Cell<'_>; 5]> {
        self.row(index).map(|row| match row {
            RowRef::Entity(row) => row.cells(),
            RowRef::Script(row) => row.cells(),
        })
    }
}

/// Summary payload forwarded to the shared-store collaborator on every
/// view transition, regardless of which view was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartySummary {
    pub third_party_scripts: Vec<ResourceRecord>,
    pub user_input: Vec<MappingEntry>,
    /// Dropdown candidate list, forwarded untouched
    pub domain_wise_scripts: Vec<serde_json::Value>,
}

/// Destination for summary publications, injected by the caller
pub trait SummarySink {
    fn publish(&mut self, record_type: &str, summary: &ThirdPartySummary);
}

/// Sink that drops publications; for callers with no downstream consumers
#[derive(Debug, Default)]
pub struct NullSink;

impl SummarySink for NullSink {
    fn publish(&mut self, _record_type: &str, _summary: &ThirdPartySummary) {}
}

/// In-process sink that retains the latest publication per record type
#[derive(Debug, Default)]
pub struct MemorySink {
    records: HashMap<String, ThirdPartySummary>,
    publications: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest summary published under `record_type`, if any
    pub fn get(&self, record_type: &str) -> Option<&ThirdPartySummary> {
        self.records.get(record_type)
    }

    /// Total number of publications received
    pub fn publications(&self) -> usize {
        self.publications
    }
}

impl SummarySink for MemorySink {
    fn publish(&mut self, record_type: &str, summary: &ThirdPartySummary) {
        self.publications += 1;
        self.records.insert(record_type.to_string(), summary.clone());
    }
}

/// Pure projection of `(records, mapping, mode)` to a view state.
///
/// The script view maps the raw list 1:1, unfiltered and unaggregated, in
/// input order. The entity view runs a fresh aggregation pass and ranks
/// the result.
pub fn project(records: &[ResourceRecord], mapping: &[MappingEntry], mode: ViewMode) -> ViewState {
    match mode {
        ViewMode::Script => ViewState {
            mode,
            headings: SCRIPT_HEADINGS.to_vec(),
            items: Rows::Script(records.iter().map(ScriptRow::from).collect()),
        },
        ViewMode::Entity => {
            let ranked = EntityAggregator::aggregate(records, mapping).ranked();
            ViewState {
                mode,
                headings: ENTITY_HEADINGS.to_vec(),
                items: Rows::Entity(
                    ranked
                        .into_iter()
                        .map(|(entity, totals)| EntityRow {
                            entity,
                            main_thread_time: totals.main_thread_time,
                            blocking_time: totals.blocking_time,
                            transfer_size: totals.transfer_size,
                            resource_size: totals.resource_size,
                        })
                        .collect(),
                ),
            }
        }
    }
}

/// Stateful controller pairing the current raw inputs with the active
/// view. Starts in the entity view.
#[derive(Debug)]
pub struct ThirdPartyView {
    records: Vec<ResourceRecord>,
    mapping: Vec<MappingEntry>,
    domain_wise: Vec<serde_json::Value>,
    mode: ViewMode,
}

impl ThirdPartyView {
    pub fn new(
        records: Vec<ResourceRecord>,
        mapping: Vec<MappingEntry>,
        domain_wise: Vec<serde_json::Value>,
    ) -> Self {
        Self {
            records,
            mapping,
            domain_wise,
            mode: ViewMode::Entity,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch views and recompute headings + items as one unit. The
    /// summary side channel is published on every transition, in both
    /// directions.
    pub fn set_view(&mut self, mode: ViewMode, sink: &mut dyn SummarySink) -> ViewState {
        self.mode = mode;
        self.publish(sink);
        tracing::debug!(?mode, records = self.records.len(), "projecting view");
        project(&self.records, &self.mapping, mode)
    }

    /// Replace the raw inputs (a new audit selection) and fall back to the
    /// entity view; projections computed against stale input must not
    /// survive an input change.
    pub fn on_input_changed(
        &mut self,
        records: Vec<ResourceRecord>,
        mapping: Vec<MappingEntry>,
        domain_wise: Vec<serde_json::Value>,
        sink: &mut dyn SummarySink,
    ) -> ViewState {
        self.records = records;
        self.mapping = mapping;
        self.domain_wise = domain_wise;
        self.set_view(ViewMode::Entity, sink)
    }

    fn publish(&self, sink: &mut dyn SummarySink) {
        sink.publish(
            SUMMARY_RECORD_TYPE,
            &ThirdPartySummary {
                third_party_scripts: self.records.clone(),
                user_input: self.mapping.clone(),
                domain_wise_scripts: self.domain_wise.clone(),
            },
        );
    }
}
