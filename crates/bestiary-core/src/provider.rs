//! External creature catalog provider abstraction.
//!
//! The provider is a remote collaborator: fetches are slow and fallible, and
//! callers must complete them before opening any storage transaction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::Result;

/// Record shape returned by the external catalog for one creature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCreature {
    pub name: String,
    #[serde(default)]
    pub types: Vec<ProviderTypeSlot>,
}

/// One entry of the provider's type list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTypeSlot {
    #[serde(rename = "type")]
    pub type_ref: ProviderTypeRef,
}

/// Named reference inside a type slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTypeRef {
    pub name: String,
}

impl ProviderCreature {
    /// Type names carried by the record, trimmed and lower-cased.
    ///
    /// Falls back to a single `"unknown"` placeholder when the provider
    /// supplies no usable types, so imported creatures always carry at
    /// least one category.
    pub fn type_names(&self) -> Vec<String> {
        let names: Vec<String> = self
            .types
            .iter()
            .map(|slot| slot.type_ref.name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            vec![defaults::UNKNOWN_CATEGORY.to_string()]
        } else {
            names
        }
    }
}

/// Backend that fetches creature records from an external catalog.
#[async_trait]
pub trait CreatureProvider: Send + Sync {
    /// Fetch a record by its numeric id in the external catalog.
    ///
    /// Errors: `NotFound` when the catalog has no such id, `Upstream` for
    /// network failures, non-success statuses, and malformed payloads.
    async fn fetch_by_id(&self, id: i64) -> Result<ProviderCreature>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(name: &str) -> ProviderTypeSlot {
        ProviderTypeSlot {
            type_ref: ProviderTypeRef {
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_type_names_lowercased() {
        let record = ProviderCreature {
            name: "bulbasaur".to_string(),
            types: vec![slot("Grass"), slot("POISON")],
        };
        assert_eq!(record.type_names(), vec!["grass", "poison"]);
    }

    #[test]
    fn test_type_names_unknown_fallback() {
        let record = ProviderCreature {
            name: "missingno".to_string(),
            types: vec![],
        };
        assert_eq!(record.type_names(), vec!["unknown"]);
    }

    #[test]
    fn test_type_names_blank_entries_dropped() {
        let record = ProviderCreature {
            name: "ditto".to_string(),
            types: vec![slot("  "), slot("normal")],
        };
        assert_eq!(record.type_names(), vec!["normal"]);
    }

    #[test]
    fn test_payload_shape_deserializes() {
        let payload = serde_json::json!({
            "name": "bulbasaur",
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://example.test/type/12"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://example.test/type/4"}}
            ],
            "weight": 69
        });
        let record: ProviderCreature = serde_json::from_value(payload).unwrap();
        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.type_names(), vec!["grass", "poison"]);
    }

    #[test]
    fn test_payload_missing_types_defaults_empty() {
        let payload = serde_json::json!({"name": "mew"});
        let record: ProviderCreature = serde_json::from_value(payload).unwrap();
        assert_eq!(record.type_names(), vec!["unknown"]);
    }
}
