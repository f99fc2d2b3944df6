//! Creature repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row, Transaction};
use tracing::debug;

use bestiary_core::{
    total_pages, Category, Creature, CreatureFilters, CreatureRepository, Error,
    ListCreaturesRequest, ListCreaturesResponse, Result,
};

use crate::query::{bind_query_params, CreatureFilterQueryBuilder};

/// PostgreSQL implementation of CreatureRepository.
pub struct PgCreatureRepository {
    pool: Pool<Postgres>,
}

impl PgCreatureRepository {
    /// Create a new PgCreatureRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreatureRepository for PgCreatureRepository {
    async fn insert(&self, name: &str) -> Result<i64> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let id = self.insert_tx(&mut tx, name).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(id)
    }

    async fn upsert(&self, id: i64, name: &str) -> Result<i64> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let id = self.upsert_tx(&mut tx, id, name).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(id)
    }

    async fn fetch(&self, id: i64) -> Result<Creature> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let creature = self.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(creature)
    }

    async fn list(&self, req: ListCreaturesRequest) -> Result<ListCreaturesResponse> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        let response = self.list_tx(&mut tx, req).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(response)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;
        self.delete_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM creature WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}

// =============================================================================
// TRANSACTION-AWARE VARIANTS
// =============================================================================

/// Transaction-aware variants for composition by the catalog service.
///
/// These methods accept an existing transaction, allowing a creature write
/// and its link reconciliation to commit or roll back as one unit.
impl PgCreatureRepository {
    /// Insert a creature with a generated id within an existing transaction.
    pub async fn insert_tx(&self, tx: &mut Transaction<'_, Postgres>, name: &str) -> Result<i64> {
        let id: i64 = sqlx::query_scalar("INSERT INTO creature (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&mut **tx)
            .await
            .map_err(Error::Database)?;
        Ok(id)
    }

    /// Insert-or-update under a caller-supplied id within an existing
    /// transaction. `created_at_utc` keeps its original value on update.
    pub async fn upsert_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        name: &str,
    ) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO creature (id, name) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(id)
        .bind(name)
        .fetch_one(&mut **tx)
        .await
        .map_err(Error::Database)?;
        Ok(id)
    }

    /// Rename a creature within an existing transaction.
    ///
    /// Storage reports "never existed" and "vanished mid-update" the same
    /// way: zero rows affected. Both surface as NotFound.
    pub async fn update_name_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        name: &str,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE creature SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Creature {} not found", id)));
        }
        Ok(())
    }

    /// Check whether a creature exists within an existing transaction.
    pub async fn exists_tx(&self, tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM creature WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut **tx)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }

    /// Fetch a creature with its resolved categories within an existing
    /// transaction.
    pub async fn fetch_tx(&self, tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<Creature> {
        let row = sqlx::query("SELECT id, name, created_at_utc FROM creature WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(Error::Database)?
            .ok_or_else(|| Error::NotFound(format!("Creature {} not found", id)))?;

        let mut category_sets = fetch_category_sets_tx(tx, &[id]).await?;

        Ok(Creature {
            id: row.get("id"),
            name: row.get("name"),
            created_at_utc: row.get("created_at_utc"),
            categories: category_sets.remove(&id).unwrap_or_default(),
        })
    }

    /// Delete a creature within an existing transaction.
    ///
    /// Links go first: the schema has no cascading delete, and join rows are
    /// owned by the creature.
    pub async fn delete_tx(&self, tx: &mut Transaction<'_, Postgres>, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM creature_category WHERE creature_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;

        let result = sqlx::query("DELETE FROM creature WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Creature {} not found", id)));
        }
        Ok(())
    }

    /// List creatures within an existing transaction.
    ///
    /// The count and the page select share one predicate and one
    /// transaction, so `total` and `items` observe the same snapshot even
    /// under concurrent writes.
    pub async fn list_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        req: ListCreaturesRequest,
    ) -> Result<ListCreaturesResponse> {
        let (page, page_size) = req.page_bounds();
        let sort_by = req.sort_by.unwrap_or_default();
        let order = req.order.unwrap_or_default();
        let filters = CreatureFilters {
            name: req.name,
            category: req.category,
        };

        let (predicate, params) = CreatureFilterQueryBuilder::new(filters.clone(), 0).build();

        let count_sql = format!("SELECT COUNT(*) FROM creature cr WHERE {}", predicate);
        let total: i64 = {
            let q = sqlx::query_scalar(&count_sql);
            let q = bind_query_params!(q, params);
            q.fetch_one(&mut **tx).await.map_err(Error::Database)?
        };

        let select_sql = format!(
            "SELECT cr.id, cr.name, cr.created_at_utc FROM creature cr
             WHERE {} ORDER BY {} {} LIMIT ${} OFFSET ${}",
            predicate,
            sort_by.column(),
            order.sql(),
            params.len() + 1,
            params.len() + 2,
        );
        let rows = {
            let q = sqlx::query(&select_sql);
            let q = bind_query_params!(q, params);
            q.bind(page_size)
                .bind((page - 1) * page_size)
                .fetch_all(&mut **tx)
                .await
                .map_err(Error::Database)?
        };

        let ids: Vec<i64> = rows.iter().map(|row| row.get("id")).collect();
        let mut category_sets = fetch_category_sets_tx(tx, &ids).await?;

        let items: Vec<Creature> = rows
            .into_iter()
            .map(|row| {
                let id: i64 = row.get("id");
                Creature {
                    id,
                    name: row.get("name"),
                    created_at_utc: row.get("created_at_utc"),
                    categories: category_sets.remove(&id).unwrap_or_default(),
                }
            })
            .collect();

        debug!(
            subsystem = "db",
            component = "creatures",
            op = "list",
            result_count = items.len(),
            total,
            "Listed creatures"
        );

        Ok(ListCreaturesResponse {
            items,
            page,
            page_size,
            total,
            total_pages: total_pages(total, page_size),
            sort_by,
            order,
            filters,
        })
    }
}

/// Resolve category sets for a batch of creatures in one query.
async fn fetch_category_sets_tx(
    tx: &mut Transaction<'_, Postgres>,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<Category>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query(
        "SELECT cc.creature_id, c.id, c.name, c.created_at_utc
         FROM creature_category cc
         JOIN category c ON c.id = cc.category_id
         WHERE cc.creature_id = ANY($1)
         ORDER BY cc.creature_id, c.name",
    )
    .bind(ids)
    .fetch_all(&mut **tx)
    .await
    .map_err(Error::Database)?;

    let mut sets: HashMap<i64, Vec<Category>> = HashMap::new();
    for row in rows {
        sets.entry(row.get("creature_id"))
            .or_default()
            .push(Category {
                id: row.get("id"),
                name: row.get("name"),
                created_at_utc: row.get("created_at_utc"),
            });
    }
    Ok(sets)
}
