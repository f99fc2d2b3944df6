//! # bestiary-core
//!
//! Core types, traits, and abstractions for the bestiary catalog.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other bestiary crates depend on: the creature/category data
//! model, the error taxonomy, input validation, category-name normalization,
//! and the repository/provider trait seams.

pub mod categories;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod provider;
pub mod traits;
pub mod validate;

// Re-export commonly used types at crate root
pub use categories::normalize_category_names;
pub use error::{Error, Result};
pub use models::*;
pub use provider::{CreatureProvider, ProviderCreature, ProviderTypeRef, ProviderTypeSlot};
pub use traits::*;
pub use validate::{validate_category_count, validate_creature_name, validate_id};
