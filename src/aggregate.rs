//! Per-entity metric accumulation and ranking
//!
//! One aggregation pass builds a fresh accumulator map from the raw record
//! list, adding each resolved resource's four metrics into its entity's
//! totals. Nothing persists across passes.

use crate::record::{MappingEntry, ResourceRecord};
use crate::resolver::resolve_entity;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Aggregated metrics for a single entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTotals {
    /// Summed main-thread blocking time (ms)
    pub blocking_time: f64,
    /// Summed main-thread execution time (ms)
    pub main_thread_time: f64,
    /// Summed decoded size (bytes)
    pub resource_size: u64,
    /// Summed network transfer size (bytes)
    pub transfer_size: u64,
}

/// Accumulates per-entity totals for one aggregation pass.
///
/// Entities are kept in first-resolution order, so a stable ranking sort
/// reproduces equal-time ties identically across runs on identical input.
#[derive(Debug, Default)]
pub struct EntityAggregator {
    totals: IndexMap<String, EntityTotals>,
}

/// Clamp a time metric so ranking can never observe NaN. JSON input is
/// already sanitized at deserialization; this covers records constructed
/// in code.
fn metric(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        0.0
    }
}

impl EntityAggregator {
    /// Create an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a full pass over `records`, resolving each against `mapping`.
    /// Unresolved records contribute nothing.
    pub fn aggregate(records: &[ResourceRecord], mapping: &[MappingEntry]) -> Self {
        let mut aggregator = Self::new();
        for record in records {
            if let Some(entity) = resolve_entity(record, mapping) {
                aggregator.record(&entity, record);
            }
        }
        aggregator
    }

    /// Add one resolved resource into its entity's accumulator
    pub fn record(&mut self, entity: &str, resource: &ResourceRecord) {
        let entry = self.totals.entry(entity.to_string()).or_default();
        entry.blocking_time += metric(resource.blocking_time);
        entry.main_thread_time += metric(resource.main_thread_time);
        entry.resource_size += resource.resource_size;
        entry.transfer_size += resource.transfer_size;
    }

    /// Number of distinct entities seen this pass
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True when no record resolved to any entity
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Access the accumulator map in first-resolution order
    pub fn totals_map(&self) -> &IndexMap<String, EntityTotals> {
        &self.totals
    }

    /// Consume the pass and return `(entity, totals)` rows in descending
    /// main-thread-time order. `sort_by` is stable, so equal-time entities
    /// keep their first-resolution order.
    pub fn ranked(self) -> Vec<(String, EntityTotals)> {
        let mut rows: Vec<_> = self.totals.into_iter().collect();
        rows.sort_by(|a, b| {
            b.1.main_thread_time
                .partial_cmp(&a.1.main_thread_time)
                .unwrap_or(Ordering::Equal)
        });
        rows
    }
}
