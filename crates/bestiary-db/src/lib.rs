//! # bestiary-db
//!
//! PostgreSQL database layer for the bestiary catalog.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for creatures and categories
//! - The dynamic filter builder behind the list operation
//!
//! ## Example
//!
//! ```rust,ignore
//! use bestiary_db::{Database, CreatureRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/bestiary").await?;
//!     let id = db.creatures.insert("bulbasaur").await?;
//!     println!("Created creature: {}", id);
//!     Ok(())
//! }
//! ```

pub mod categories;
pub mod creatures;
pub mod pool;
pub mod query;

// Re-export core types
pub use bestiary_core::*;

// Re-export repository implementations
pub use categories::PgCategoryRepository;
pub use creatures::PgCreatureRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use query::{CreatureFilterQueryBuilder, QueryParam};

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Creature repository for CRUD and listings.
    pub creatures: PgCreatureRepository,
    /// Category repository for link reconciliation.
    pub categories: PgCategoryRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            creatures: PgCreatureRepository::new(pool.clone()),
            categories: PgCategoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            creatures: PgCreatureRepository::new(self.pool.clone()),
            categories: PgCategoryRepository::new(self.pool.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
