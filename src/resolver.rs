//! Entity resolution for third-party resources
//!
//! Attribution prefers the label the audit pipeline already attached to a
//! record; otherwise the record's origin hostname is looked up in the
//! user-supplied mapping. Records that resolve to neither are excluded from
//! entity aggregation without raising an error: "uncategorized" is an
//! expected state, not a malformed one.

use crate::record::{MappingEntry, ResourceRecord};
use url::Url;

/// Extract a normalized hostname from a URL or a bare `host/path` origin
/// string. Scheme, path, query, port, and case are all stripped, so two
/// origins with equal hostnames compare equal regardless of form.
pub fn hostname(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Scheme-less origins ("b.cdn", "b.cdn/path") would otherwise parse
    // their hostname as a scheme.
    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed).ok()?
    } else {
        Url::parse(&format!("https://{trimmed}")).ok()?
    };
    parsed.host_str().map(str::to_ascii_lowercase)
}

/// Resolve the entity label for a single record.
///
/// Returns `None` when the record carries no label and no mapping entry
/// matches its origin hostname; such records contribute nothing to entity
/// aggregation and produce no row.
pub fn resolve_entity(record: &ResourceRecord, mapping: &[MappingEntry]) -> Option<String> {
    if let Some(name) = &record.entity_name {
        return Some(name.clone());
    }

    let origin = record.entity.as_ref()?.url.as_deref()?;
    let host = hostname(origin)?;
    let resolved = mapping
        .iter()
        .find(|entry| hostname(&entry.key).as_deref() == Some(host.as_str()))
        .map(|entry| entry.value.clone());

    if resolved.is_none() {
        tracing::debug!(url = %record.url, origin = %origin, "no entity attribution; excluded from entity view");
    }
    resolved
}
