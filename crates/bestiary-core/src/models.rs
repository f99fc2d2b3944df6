//! Data models for the bestiary catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A category a creature can belong to.
///
/// Names are stored in canonical form (trimmed, lower-cased) and are unique
/// across the whole catalog: two creatures tagged "grass" reference the same
/// row. Category rows are created implicitly on first use and are never
/// deleted by creature operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at_utc: DateTime<Utc>,
}

/// A creature with its resolved category set.
///
/// `created_at_utc` is set on first insert and never modified, including by
/// the upsert paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: i64,
    pub name: String,
    pub created_at_utc: DateTime<Utc>,
    pub categories: Vec<Category>,
}

/// Sort field for creature listings.
///
/// The set is closed so raw caller input never reaches SQL: each variant maps
/// to a known column via [`SortBy::column`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Name,
    CreatedAt,
}

impl SortBy {
    /// Qualified column the sort field maps to.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name => "cr.name",
            Self::CreatedAt => "cr.created_at_utc",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::CreatedAt => write!(f, "created_at"),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "created_at" => Ok(Self::CreatedAt),
            _ => Err(format!("Invalid sort field: {}", s)),
        }
    }
}

/// Sort direction for creature listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL keyword for the direction.
    pub fn sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Number of pages needed for `total` rows at `page_size` rows per page.
///
/// Returns `0` when `total` is `0`.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    (total + page_size - 1) / page_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_sort_by_roundtrip() {
        assert_eq!(SortBy::from_str("name").unwrap(), SortBy::Name);
        assert_eq!(SortBy::from_str("created_at").unwrap(), SortBy::CreatedAt);
        assert_eq!(SortBy::CreatedAt.to_string(), "created_at");
        assert!(SortBy::from_str("height").is_err());
    }

    #[test]
    fn test_sort_by_column_whitelist() {
        assert_eq!(SortBy::Name.column(), "cr.name");
        assert_eq!(SortBy::CreatedAt.column(), "cr.created_at_utc");
    }

    #[test]
    fn test_sort_order_roundtrip() {
        assert_eq!(SortOrder::from_str("ASC").unwrap(), SortOrder::Asc);
        assert_eq!(SortOrder::from_str("desc").unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.sql(), "DESC");
        assert!(SortOrder::from_str("sideways").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SortBy::default(), SortBy::Name);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
    }

    #[test]
    fn test_total_pages_zero_total() {
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_total_pages_exact_multiple() {
        assert_eq!(total_pages(20, 10), 2);
    }

    #[test]
    fn test_total_pages_partial_last_page() {
        assert_eq!(total_pages(21, 10), 3);
        assert_eq!(total_pages(1, 100), 1);
    }
}
