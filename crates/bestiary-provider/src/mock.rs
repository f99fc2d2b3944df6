//! In-memory mock provider for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use bestiary_core::{
    CreatureProvider, Error, ProviderCreature, ProviderTypeRef, ProviderTypeSlot, Result,
};

/// Mock [`CreatureProvider`] serving records from memory.
///
/// Ids without a registered record resolve to `NotFound`, matching the HTTP
/// backend's 404 mapping.
#[derive(Debug, Default)]
pub struct MockCreatureProvider {
    records: HashMap<i64, ProviderCreature>,
}

impl MockCreatureProvider {
    /// Create an empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under an external id.
    pub fn with_record(mut self, id: i64, name: &str, types: &[&str]) -> Self {
        self.records.insert(
            id,
            ProviderCreature {
                name: name.to_string(),
                types: types
                    .iter()
                    .map(|t| ProviderTypeSlot {
                        type_ref: ProviderTypeRef {
                            name: t.to_string(),
                        },
                    })
                    .collect(),
            },
        );
        self
    }
}

#[async_trait]
impl CreatureProvider for MockCreatureProvider {
    async fn fetch_by_id(&self, id: i64) -> Result<ProviderCreature> {
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("External catalog has no record {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_registered_record() {
        let provider = MockCreatureProvider::new().with_record(1, "bulbasaur", &["Grass", "Poison"]);

        let record = provider.fetch_by_id(1).await.unwrap();
        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.type_names(), vec!["grass", "poison"]);
    }

    #[tokio::test]
    async fn test_mock_unknown_id_is_not_found() {
        let provider = MockCreatureProvider::new();
        match provider.fetch_by_id(99).await {
            Err(Error::NotFound(_)) => {}
            other => panic!("Expected NotFound, got {:?}", other.map(|r| r.name)),
        }
    }
}
