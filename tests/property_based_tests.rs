//! Property-based tests for aggregation and view projection
//!
//! Core invariants checked over generated audit data:
//! 1. Conservation: entity aggregates sum to the resolved-resource totals
//!    for each of the four metrics independently
//! 2. Ranking: entity rows are monotonically non-increasing in
//!    main-thread time
//! 3. Order preservation: script-view rows match input order 1:1
//! 4. Idempotence: projecting the same inputs twice is identical

use ajeno::record::{EntityOrigin, MappingEntry, ResourceRecord};
use ajeno::resolver::resolve_entity;
use ajeno::view::{project, Rows, ViewMode};
use proptest::prelude::*;

/// Small label pool so generated records collide on entities
fn entity_pool() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => prop::sample::select(vec!["Acme", "Beta", "Gamma", "Delta"])
            .prop_map(|name| Some(name.to_string())),
        1 => Just(None),
    ]
}

/// Origin pool; only some hosts appear in the generated mapping
fn origin_pool() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        2 => prop::sample::select(vec![
            "https://mapped-a.cdn",
            "https://mapped-b.cdn/path?q=1",
            "https://unmapped.example",
        ])
        .prop_map(|origin| Some(origin.to_string())),
        1 => Just(None),
    ]
}

prop_compose! {
    fn arb_record()(
        index in 0u32..1000,
        main_thread_time in 0.0f64..10_000.0,
        blocking_time in 0.0f64..1_000.0,
        resource_size in 0u64..100_000_000,
        transfer_size in 0u64..100_000_000,
        entity_name in entity_pool(),
        origin in origin_pool(),
    ) -> ResourceRecord {
        ResourceRecord {
            url: format!("https://cdn.example/script-{index}.js"),
            main_thread_time,
            blocking_time,
            resource_size,
            transfer_size,
            entity_name,
            entity: origin.map(|url| EntityOrigin { url: Some(url) }),
        }
    }
}

fn mapping() -> Vec<MappingEntry> {
    vec![
        MappingEntry {
            key: "https://mapped-a.cdn/whatever".to_string(),
            value: "Mapped Alpha".to_string(),
        },
        MappingEntry {
            key: "mapped-b.cdn".to_string(),
            value: "Mapped Beta".to_string(),
        },
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_conservation_per_metric(records in prop::collection::vec(arb_record(), 0..40)) {
        let mapping = mapping();

        let resolved: Vec<&ResourceRecord> = records
            .iter()
            .filter(|record| resolve_entity(record, &mapping).is_some())
            .collect();

        let state = project(&records, &mapping, ViewMode::Entity);
        let rows = match &state.items {
            Rows::Entity(rows) => rows,
            Rows::Script(_) => unreachable!(),
        };

        let row_main: f64 = rows.iter().map(|r| r.main_thread_time).sum();
        let row_blocking: f64 = rows.iter().map(|r| r.blocking_time).sum();
        let row_resource: u64 = rows.iter().map(|r| r.resource_size).sum();
        let row_transfer: u64 = rows.iter().map(|r| r.transfer_size).sum();

        let resolved_main: f64 = resolved.iter().map(|r| r.main_thread_time).sum();
        let resolved_blocking: f64 = resolved.iter().map(|r| r.blocking_time).sum();
        let resolved_resource: u64 = resolved.iter().map(|r| r.resource_size).sum();
        let resolved_transfer: u64 = resolved.iter().map(|r| r.transfer_size).sum();

        // Grouping changes float addition order; allow rounding slack only
        prop_assert!((row_main - resolved_main).abs() < 1e-6);
        prop_assert!((row_blocking - resolved_blocking).abs() < 1e-6);
        prop_assert_eq!(row_resource, resolved_resource);
        prop_assert_eq!(row_transfer, resolved_transfer);
    }

    #[test]
    fn prop_entity_rows_ranked_non_increasing(records in prop::collection::vec(arb_record(), 0..40)) {
        let state = project(&records, &mapping(), ViewMode::Entity);
        let rows = match &state.items {
            Rows::Entity(rows) => rows,
            Rows::Script(_) => unreachable!(),
        };

        for pair in rows.windows(2) {
            prop_assert!(
                pair[0].main_thread_time >= pair[1].main_thread_time,
                "rows out of order: {} < {}",
                pair[0].main_thread_time,
                pair[1].main_thread_time
            );
        }
    }

    #[test]
    fn prop_script_view_preserves_input_order(records in prop::collection::vec(arb_record(), 0..40)) {
        let state = project(&records, &mapping(), ViewMode::Script);
        let rows = match &state.items {
            Rows::Script(rows) => rows,
            Rows::Entity(_) => unreachable!(),
        };

        prop_assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            prop_assert_eq!(&row.url, &record.url);
            prop_assert_eq!(row.main_thread_time, record.main_thread_time);
        }
    }

    #[test]
    fn prop_projection_is_idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
        let mapping = mapping();

        let entity_first = project(&records, &mapping, ViewMode::Entity);
        let entity_second = project(&records, &mapping, ViewMode::Entity);
        prop_assert_eq!(entity_first, entity_second);

        let script_first = project(&records, &mapping, ViewMode::Script);
        let script_second = project(&records, &mapping, ViewMode::Script);
        prop_assert_eq!(script_first, script_second);
    }

    #[test]
    fn prop_unresolved_records_never_produce_rows(
        records in prop::collection::vec(arb_record(), 0..40),
    ) {
        // Entity view row count never exceeds the number of resolved records
        let mapping = mapping();
        let resolved = records
            .iter()
            .filter(|record| resolve_entity(record, &mapping).is_some())
            .count();

        let state = project(&records, &mapping, ViewMode::Entity);
        prop_assert!(state.len() <= resolved);
        if resolved == 0 {
            prop_assert!(state.is_empty());
        }
    }
}
