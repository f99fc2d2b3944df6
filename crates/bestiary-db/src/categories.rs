//! Category repository implementation.
//!
//! Reconciles creature↔category links: categories are connected-or-created
//! by canonical name, and a creature's link set is always rewritten as a
//! whole (delete everything, reinsert in input order) rather than diffed.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row, Transaction};

use bestiary_core::{Category, CategoryRepository, Error, Result};

/// PostgreSQL implementation of CategoryRepository.
pub struct PgCategoryRepository {
    pool: Pool<Postgres>,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Connect-or-create a category within an existing transaction.
    ///
    /// Try-create first; when the name already exists (or a concurrent
    /// writer just created it) the insert returns no row and we fall back to
    /// reading the existing one. The unique constraint on `name` guarantees
    /// a single row per canonical name either way.
    pub async fn connect_or_create_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<i64> {
        let inserted: Option<i64> = sqlx::query_scalar(
            "INSERT INTO category (name) VALUES ($1) ON CONFLICT (name) DO NOTHING RETURNING id",
        )
        .bind(name)
        .fetch_optional(&mut **tx)
        .await
        .map_err(Error::Database)?;

        if let Some(id) = inserted {
            return Ok(id);
        }

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM category WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?;

        // Creature operations never delete category rows, so the fallback
        // read can only miss under interference this system does not issue.
        existing.ok_or_else(|| {
            Error::Conflict(format!(
                "Category {} vanished during connect-or-create",
                name
            ))
        })
    }

    /// Delete every link owned by a creature within an existing transaction.
    pub async fn unlink_all_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        creature_id: i64,
    ) -> Result<()> {
        sqlx::query("DELETE FROM creature_category WHERE creature_id = $1")
            .bind(creature_id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }

    /// Replace a creature's link set within an existing transaction.
    ///
    /// Full overwrite: all existing links are deleted, then one link per
    /// name is created in input order. Names must already be canonical.
    pub async fn replace_for_creature_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        creature_id: i64,
        names: &[String],
    ) -> Result<()> {
        self.unlink_all_tx(tx, creature_id).await?;

        for name in names {
            let category_id = self.connect_or_create_tx(tx, name).await?;

            sqlx::query(
                "INSERT INTO creature_category (creature_id, category_id) VALUES ($1, $2)",
            )
            .bind(creature_id)
            .bind(category_id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;
        }

        Ok(())
    }

    /// Resolved categories for one creature within an existing transaction.
    pub async fn get_for_creature_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        creature_id: i64,
    ) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT c.id, c.name, c.created_at_utc
             FROM creature_category cc
             JOIN category c ON c.id = cc.category_id
             WHERE cc.creature_id = $1
             ORDER BY c.name",
        )
        .bind(creature_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(Error::Database)?;

        let categories = rows
            .into_iter()
            .map(|row| Category {
                id: row.get("id"),
                name: row.get("name"),
                created_at_utc: row.get("created_at_utc"),
            })
            .collect();

        Ok(categories)
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn connect_or_create(&self, name: &str) -> Result<i64> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let id = self.connect_or_create_tx(&mut tx, name).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(id)
    }

    async fn replace_for_creature(&self, creature_id: i64, names: &[String]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        self.replace_for_creature_tx(&mut tx, creature_id, names)
            .await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    async fn get_for_creature(&self, creature_id: i64) -> Result<Vec<Category>> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let categories = self.get_for_creature_tx(&mut tx, creature_id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(categories)
    }
}
