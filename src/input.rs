//! Audit input loading for the CLI boundary
//!
//! The audit file is either the envelope object produced by the audit
//! pipeline (`{"thirdParty": [...], "domainWiseScripts": [...]}`) or a bare
//! top-level array of resource records. The mapping file is an array of
//! `{key, value}` pairs in user-selection order.

use crate::record::{MappingEntry, ResourceRecord};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading audit inputs
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for input loading operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Parsed audit input: the raw resource list plus the opaque dropdown
/// candidate list forwarded to the summary consumer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInput {
    /// Third-party resource measurements, in audit order
    #[serde(default, alias = "scripts")]
    pub third_party: Vec<ResourceRecord>,
    /// Dropdown candidate list; not interpreted here
    #[serde(default)]
    pub domain_wise_scripts: Vec<serde_json::Value>,
}

fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn json_error(path: &Path, source: serde_json::Error) -> InputError {
    InputError::Json {
        path: path.display().to_string(),
        source,
    }
}

/// Load an audit file, accepting either the envelope object or a bare
/// array of records.
pub fn load_audit(path: &Path) -> Result<AuditInput> {
    let text = read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| json_error(path, e))?;

    if value.is_array() {
        let third_party: Vec<ResourceRecord> =
            serde_json::from_value(value).map_err(|e| json_error(path, e))?;
        return Ok(AuditInput {
            third_party,
            domain_wise_scripts: Vec::new(),
        });
    }
    serde_json::from_value(value).map_err(|e| json_error(path, e))
}

/// Load a user origin-mapping file: an array of `{key, value}` pairs.
pub fn load_mapping(path: &Path) -> Result<Vec<MappingEntry>> {
    let text = read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| json_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_audit_envelope() {
        let file = write_temp(
            r#"{
                "thirdParty": [{"url": "https://a.cdn/x.js", "mainThreadTime": 10}],
                "domainWiseScripts": ["https://a.cdn/x.js"]
            }"#,
        );

        let audit = load_audit(file.path()).unwrap();
        assert_eq!(audit.third_party.len(), 1);
        assert_eq!(audit.domain_wise_scripts.len(), 1);
    }

    #[test]
    fn test_load_audit_bare_array() {
        let file = write_temp(r#"[{"url": "https://a.cdn/x.js"}]"#);

        let audit = load_audit(file.path()).unwrap();
        assert_eq!(audit.third_party.len(), 1);
        assert!(audit.domain_wise_scripts.is_empty());
    }

    #[test]
    fn test_load_audit_scripts_alias() {
        let file = write_temp(r#"{"scripts": [{"url": "https://a.cdn/x.js"}]}"#);

        let audit = load_audit(file.path()).unwrap();
        assert_eq!(audit.third_party.len(), 1);
    }

    #[test]
    fn test_load_audit_missing_file() {
        let err = load_audit(Path::new("/nonexistent/audit.json")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/audit.json"));
    }

    #[test]
    fn test_load_audit_invalid_json() {
        let file = write_temp("{not json");
        let err = load_audit(file.path()).unwrap_err();
        assert!(matches!(err, InputError::Json { .. }));
    }

    #[test]
    fn test_load_mapping() {
        let file = write_temp(r#"[{"key": "https://b.cdn/anything", "value": "Beta"}]"#);

        let mapping = load_mapping(file.path()).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping[0].value, "Beta");
    }

    #[test]
    fn test_load_mapping_preserves_order() {
        let file = write_temp(
            r#"[
                {"key": "https://b.cdn/1", "value": "First"},
                {"key": "https://b.cdn/2", "value": "Second"}
            ]"#,
        );

        let mapping = load_mapping(file.path()).unwrap();
        assert_eq!(mapping[0].value, "First");
        assert_eq!(mapping[1].value, "Second");
    }
}
