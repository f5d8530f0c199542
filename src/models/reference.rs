use serde::{Deserialize, Serialize};

/// A reference-data field as it arrives from callers. The same logical
/// entity may show up as a fully or partially resolved record, or as a
/// plain display string, depending on which collaborator produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Record(RefRecord),
    Text(String),
}

/// Display fields copied through from a resolved record. Unknown fields
/// are dropped during deserialization rather than carried along.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
}

/// Canonical comparison key plus clean display data for one reference.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRef {
    pub key: String,
    pub display: RefRecord,
}

impl ResolvedRef {
    /// Human-readable label for matched/missing lists.
    pub fn label(&self) -> String {
        self.display
            .name
            .clone()
            .or_else(|| self.display.code.clone())
            .or_else(|| self.display.id.clone())
            .unwrap_or_else(|| self.key.clone())
    }
}

impl EntityRef {
    pub fn named(name: &str) -> Self {
        EntityRef::Record(RefRecord {
            name: Some(name.to_string()),
            ..RefRecord::default()
        })
    }

    pub fn text(value: &str) -> Self {
        EntityRef::Text(value.to_string())
    }
}

/// Normalize one heterogeneous reference into a canonical key and clean
/// display record. Never fails: a missing input resolves to an empty key,
/// which no comparison will match.
pub fn resolve(input: Option<&EntityRef>) -> ResolvedRef {
    match input {
        None => ResolvedRef::default(),
        Some(EntityRef::Text(raw)) => ResolvedRef {
            key: canonical_key(raw),
            display: RefRecord {
                name: Some(raw.trim().to_string()),
                ..RefRecord::default()
            },
        },
        Some(EntityRef::Record(record)) => {
            let source = record
                .name
                .as_deref()
                .or(record.code.as_deref())
                .or(record.id.as_deref())
                .unwrap_or("");
            ResolvedRef {
                key: canonical_key(source),
                display: record.clone(),
            }
        }
    }
}

/// Lowercase, trimmed, alphanumeric-only key used for equality and
/// containment comparisons across differently shaped references.
pub fn canonical_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strips_punctuation_and_case() {
        assert_eq!(canonical_key("  Node.js "), "nodejs");
        assert_eq!(canonical_key("C++"), "c");
        assert_eq!(canonical_key("Café au Lait"), "caféaulait");
    }

    #[test]
    fn missing_input_resolves_to_empty_key() {
        let resolved = resolve(None);
        assert!(resolved.key.is_empty());
        assert!(resolved.display.name.is_none());
    }

    #[test]
    fn record_prefers_name_over_code_and_id() {
        let full = EntityRef::Record(RefRecord {
            id: Some("abc-1".into()),
            name: Some("Software Development".into()),
            code: Some("SW".into()),
            category: None,
        });
        assert_eq!(resolve(Some(&full)).key, "softwaredevelopment");

        let code_only = EntityRef::Record(RefRecord {
            id: Some("abc-1".into()),
            code: Some("SW".into()),
            ..RefRecord::default()
        });
        assert_eq!(resolve(Some(&code_only)).key, "sw");
    }

    #[test]
    fn plain_string_and_record_converge_on_one_key() {
        let as_text = EntityRef::text("Node.js");
        let as_record = EntityRef::named("node js");
        assert_eq!(resolve(Some(&as_text)).key, resolve(Some(&as_record)).key);
    }

    #[test]
    fn untagged_deserialization_accepts_both_shapes() {
        let from_text: EntityRef = serde_json::from_str("\"German\"").unwrap();
        let from_record: EntityRef =
            serde_json::from_str(r#"{"id":"de","name":"German"}"#).unwrap();
        assert_eq!(resolve(Some(&from_text)).key, "german");
        assert_eq!(resolve(Some(&from_record)).key, "german");
    }
}
