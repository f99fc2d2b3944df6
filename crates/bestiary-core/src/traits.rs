//! Core traits for bestiary abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::Result;
use crate::models::*;

// =============================================================================
// REQUEST / RESPONSE TYPES
// =============================================================================

/// Request for creating a creature.
///
/// When `id` is given the operation is an upsert: update-if-exists, else
/// create under that id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCreatureRequest {
    pub id: Option<i64>,
    pub name: String,
    /// Raw category names; normalized before storage. `None` (or a list
    /// that normalizes to nothing) leaves categories untouched.
    pub categories: Option<Vec<String>>,
}

/// Request for partially updating a creature.
///
/// Only provided fields change; a provided category list fully replaces the
/// existing set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCreatureRequest {
    pub name: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Request for listing creatures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCreaturesRequest {
    /// Substring match on creature name.
    pub name: Option<String>,
    /// Exact match on a canonical category name.
    pub category: Option<String>,
    /// 1-based page number; values below 1 are clamped to 1.
    pub page: Option<i64>,
    /// Rows per page; clamped into 1..=100.
    pub page_size: Option<i64>,
    pub sort_by: Option<SortBy>,
    pub order: Option<SortOrder>,
}

impl ListCreaturesRequest {
    /// Resolve pagination defaults and silently clamp out-of-range values.
    pub fn page_bounds(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(defaults::PAGE).max(1);
        let page_size = self
            .page_size
            .unwrap_or(defaults::PAGE_SIZE)
            .clamp(1, defaults::PAGE_SIZE_MAX);
        (page, page_size)
    }
}

/// Echo of the filters a listing was produced with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureFilters {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Page envelope for creature listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCreaturesResponse {
    pub items: Vec<Creature>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    /// `ceil(total / page_size)`; `0` when `total` is `0`.
    pub total_pages: i64,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub filters: CreatureFilters,
}

/// Result of a delete operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

// =============================================================================
// REPOSITORY TRAITS
// =============================================================================

/// Repository for creature row CRUD and listings.
#[async_trait]
pub trait CreatureRepository: Send + Sync {
    /// Insert a new creature with a generated id.
    async fn insert(&self, name: &str) -> Result<i64>;

    /// Insert-or-update a creature under a caller-supplied id. The creation
    /// timestamp is untouched when the row already exists.
    async fn upsert(&self, id: i64, name: &str) -> Result<i64>;

    /// Fetch a creature with its resolved category set.
    async fn fetch(&self, id: i64) -> Result<Creature>;

    /// List creatures with filtering, sorting, and pagination. The row
    /// selection and the total count observe the same snapshot.
    async fn list(&self, req: ListCreaturesRequest) -> Result<ListCreaturesResponse>;

    /// Delete a creature and its category links. `NotFound` when the row
    /// does not exist.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Check whether a creature exists.
    async fn exists(&self, id: i64) -> Result<bool>;
}

/// Repository for category rows and creature↔category links.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Use the existing category with this canonical name, or create it.
    /// Concurrent callers for the same name resolve to one row.
    async fn connect_or_create(&self, name: &str) -> Result<i64>;

    /// Replace a creature's link set with the given canonical names: all
    /// existing links are deleted, then one link per name is created in
    /// input order.
    async fn replace_for_creature(&self, creature_id: i64, names: &[String]) -> Result<()>;

    /// Resolved categories for one creature.
    async fn get_for_creature(&self, creature_id: i64) -> Result<Vec<Category>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_defaults() {
        let req = ListCreaturesRequest::default();
        assert_eq!(req.page_bounds(), (1, 10));
    }

    #[test]
    fn test_page_bounds_clamps_page_below_one() {
        let req = ListCreaturesRequest {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(req.page_bounds().0, 1);

        let req = ListCreaturesRequest {
            page: Some(-3),
            ..Default::default()
        };
        assert_eq!(req.page_bounds().0, 1);
    }

    #[test]
    fn test_page_bounds_clamps_page_size() {
        let req = ListCreaturesRequest {
            page_size: Some(500),
            ..Default::default()
        };
        assert_eq!(req.page_bounds().1, 100);

        let req = ListCreaturesRequest {
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(req.page_bounds().1, 1);
    }

    #[test]
    fn test_page_bounds_in_range_passthrough() {
        let req = ListCreaturesRequest {
            page: Some(4),
            page_size: Some(25),
            ..Default::default()
        };
        assert_eq!(req.page_bounds(), (4, 25));
    }
}
