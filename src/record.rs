//! Audit data model for third-party resources
//!
//! Serde contract matching the upstream audit JSON (camelCase field names).
//! Metric fields tolerate missing or non-numeric values by deserializing to
//! zero, so a partially populated record degrades to a zero-valued row
//! instead of corrupting downstream ranking.

use serde::{Deserialize, Deserializer, Serialize};

/// Origin information attached to a resource when the audit pipeline could
/// not name the owning entity directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityOrigin {
    /// Origin URL (or bare hostname) of the serving third party
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One measured third-party resource.
///
/// At most one resolution path applies per record: a pre-known
/// `entity_name` always takes precedence over host-based lookup against
/// `entity.url`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    /// Resource URL
    pub url: String,
    /// Main-thread execution time in milliseconds
    #[serde(default, deserialize_with = "time_or_zero")]
    pub main_thread_time: f64,
    /// Main-thread blocking time in milliseconds
    #[serde(default, deserialize_with = "time_or_zero")]
    pub blocking_time: f64,
    /// Decoded (uncompressed) size in bytes
    #[serde(default, deserialize_with = "bytes_or_zero")]
    pub resource_size: u64,
    /// Bytes actually transferred over the network (possibly compressed)
    #[serde(default, deserialize_with = "bytes_or_zero")]
    pub transfer_size: u64,
    /// Pre-known entity label
    #[serde(
        default,
        deserialize_with = "entity_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub entity_name: Option<String>,
    /// Origin used for host-based matching when `entity_name` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityOrigin>,
}

/// One user-supplied origin-to-label mapping entry.
///
/// Entries are matched in supplied order; the first entry whose key's
/// hostname equals the record's origin hostname wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappingEntry {
    /// URL (or bare hostname) whose hostname identifies the origin
    pub key: String,
    /// Entity label to attribute matching resources to
    pub value: String,
}

/// Deserialize a millisecond metric, treating missing, non-numeric,
/// non-finite, or negative values as zero.
fn time_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|time| time.is_finite() && *time >= 0.0)
        .unwrap_or(0.0))
}

/// Deserialize a byte-count metric, treating missing or non-numeric values
/// as zero. Counts stay integral end to end; no float truncation.
fn bytes_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0))
}

/// Upstream emits the entity label either as a bare string or as an object
/// carrying a `name` field; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityLabel {
    Name(String),
    Tagged { name: String },
}

fn entity_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<EntityLabel>::deserialize(deserializer)?;
    Ok(value.map(|label| match label {
        EntityLabel::Name(name) | EntityLabel::Tagged { name } => name,
    }))
}
