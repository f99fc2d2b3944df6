//! # bestiary-provider
//!
//! External catalog provider client for the bestiary catalog.
//!
//! Implements [`bestiary_core::CreatureProvider`] over HTTP, plus an
//! in-memory mock backend (feature `mock`) for exercising import flows
//! without a network.

pub mod http;

#[cfg(feature = "mock")]
pub mod mock;

pub use http::{HttpCreatureProvider, DEFAULT_PROVIDER_URL};

#[cfg(feature = "mock")]
pub use mock::MockCreatureProvider;
