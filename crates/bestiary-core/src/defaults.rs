//! Centralized default constants for the bestiary catalog.
//!
//! **This module is the single source of truth** for shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// PAGINATION
// =============================================================================

/// Default 1-based page number for listings.
pub const PAGE: i64 = 1;

/// Default page size for creature listings.
pub const PAGE_SIZE: i64 = 10;

/// Maximum page size; larger requests are clamped, not rejected.
pub const PAGE_SIZE_MAX: i64 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Minimum creature name length in characters.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum creature name length in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Maximum number of categories a single creature may carry.
pub const MAX_CATEGORIES: usize = 3;

// =============================================================================
// EXTERNAL PROVIDER
// =============================================================================

/// Default base URL of the external creature catalog.
pub const PROVIDER_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Timeout for provider fetches (seconds).
pub const PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Placeholder category assigned when the provider supplies no types.
pub const UNKNOWN_CATEGORY: &str = "unknown";
