//! Catalog service implementation.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use bestiary_core::{
    normalize_category_names, validate_category_count, validate_creature_name, validate_id,
    CreateCreatureRequest, Creature, CreatureProvider, DeleteResponse, Error,
    ListCreaturesRequest, ListCreaturesResponse, Result, UpdateCreatureRequest,
};
use bestiary_db::Database;
use bestiary_provider::HttpCreatureProvider;

/// Orchestrates creature operations over the repositories and the external
/// provider.
///
/// The service owns every transaction boundary: a creature write and its
/// link reconciliation always commit or roll back as one unit, so no reader
/// ever observes a creature stripped of its categories by a half-applied
/// replace. Input validation runs before any storage access.
pub struct CatalogService {
    db: Database,
    provider: Arc<dyn CreatureProvider>,
}

impl CatalogService {
    /// Create a new service over a database context and a provider backend.
    pub fn new(db: Database, provider: Arc<dyn CreatureProvider>) -> Self {
        Self { db, provider }
    }

    /// Create a service over the HTTP catalog provider, configured from the
    /// environment.
    pub fn with_default_provider(db: Database) -> Result<Self> {
        let provider = HttpCreatureProvider::from_env()?;
        Ok(Self::new(db, Arc::new(provider)))
    }

    /// Create a creature.
    ///
    /// With `id` supplied the operation is an upsert: update-if-exists
    /// (replacing the category set when one is given), else create under
    /// that id. Returns the creature with its resolved categories.
    pub async fn create(&self, req: CreateCreatureRequest) -> Result<Creature> {
        if let Some(id) = req.id {
            validate_id(id).map_err(Error::InvalidInput)?;
        }
        validate_creature_name(&req.name).map_err(Error::InvalidInput)?;
        if let Some(categories) = &req.categories {
            validate_category_count(categories).map_err(Error::InvalidInput)?;
        }

        let names = normalize_category_names(req.categories.as_deref());

        let creature = match req.id {
            Some(id) => {
                self.upsert_with_categories(id, &req.name, names.as_deref())
                    .await?
            }
            None => {
                let mut tx = self.db.pool().begin().await.map_err(Error::Database)?;
                let id = self.db.creatures.insert_tx(&mut tx, &req.name).await?;
                if let Some(names) = &names {
                    self.db
                        .categories
                        .replace_for_creature_tx(&mut tx, id, names)
                        .await?;
                }
                let creature = self.db.creatures.fetch_tx(&mut tx, id).await?;
                tx.commit().await.map_err(Error::Database)?;
                creature
            }
        };

        info!(
            subsystem = "catalog",
            component = "service",
            op = "create",
            creature_id = creature.id,
            "Created creature"
        );
        Ok(creature)
    }

    /// Partially update a creature.
    ///
    /// Only provided fields change; a provided category list fully replaces
    /// the existing set. `NotFound` when no row with `id` exists — storage
    /// reports "never existed" and "vanished mid-update" identically.
    pub async fn update(&self, id: i64, req: UpdateCreatureRequest) -> Result<Creature> {
        validate_id(id).map_err(Error::InvalidInput)?;
        if let Some(name) = &req.name {
            validate_creature_name(name).map_err(Error::InvalidInput)?;
        }
        if let Some(categories) = &req.categories {
            validate_category_count(categories).map_err(Error::InvalidInput)?;
        }

        let names = normalize_category_names(req.categories.as_deref());

        let mut tx = self.db.pool().begin().await.map_err(Error::Database)?;

        if !self.db.creatures.exists_tx(&mut tx, id).await? {
            return Err(Error::NotFound(format!("Creature {} not found", id)));
        }

        if let Some(name) = &req.name {
            self.db.creatures.update_name_tx(&mut tx, id, name).await?;
        }
        if let Some(names) = &names {
            self.db
                .categories
                .replace_for_creature_tx(&mut tx, id, names)
                .await?;
        }

        let creature = self.db.creatures.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "catalog",
            component = "service",
            op = "update",
            creature_id = id,
            "Updated creature"
        );
        Ok(creature)
    }

    /// Delete a creature and its category links.
    ///
    /// Links are removed before the creature row. `NotFound` when the row
    /// is absent at delete time; category rows are left in place.
    pub async fn delete(&self, id: i64) -> Result<DeleteResponse> {
        validate_id(id).map_err(Error::InvalidInput)?;

        let mut tx = self.db.pool().begin().await.map_err(Error::Database)?;
        self.db.creatures.delete_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "catalog",
            component = "service",
            op = "delete",
            creature_id = id,
            "Deleted creature"
        );
        Ok(DeleteResponse { ok: true })
    }

    /// List creatures with filtering, sorting, and pagination.
    ///
    /// Always returns a well-formed page envelope, including for zero
    /// results.
    pub async fn find_many(&self, req: ListCreaturesRequest) -> Result<ListCreaturesResponse> {
        let start = Instant::now();

        let mut tx = self.db.pool().begin().await.map_err(Error::Database)?;
        let response = self.db.creatures.list_tx(&mut tx, req).await?;
        tx.commit().await.map_err(Error::Database)?;

        info!(
            subsystem = "catalog",
            component = "service",
            op = "find_many",
            result_count = response.items.len(),
            total = response.total,
            duration_ms = start.elapsed().as_millis() as u64,
            "Listed creatures"
        );
        Ok(response)
    }

    /// Import one record from the external catalog, keyed locally by the
    /// external id.
    ///
    /// The network fetch completes before any transaction begins, so
    /// provider failures never hold storage resources. Records without
    /// types import with the single placeholder category "unknown".
    /// Repeated imports of an unchanged record converge to the same stored
    /// state.
    pub async fn import_by_id(&self, external_id: i64) -> Result<Creature> {
        validate_id(external_id).map_err(Error::InvalidInput)?;

        let record = self.provider.fetch_by_id(external_id).await?;
        let raw_names = record.type_names();
        let names = normalize_category_names(Some(raw_names.as_slice()));

        let creature = self
            .upsert_with_categories(external_id, &record.name, names.as_deref())
            .await?;

        info!(
            subsystem = "catalog",
            component = "service",
            op = "import_by_id",
            external_id,
            "Imported creature"
        );
        Ok(creature)
    }

    /// Shared upsert path for create-with-id and import: write the row,
    /// replace the category set when one is given, read back the result,
    /// all in one transaction.
    async fn upsert_with_categories(
        &self,
        id: i64,
        name: &str,
        names: Option<&[String]>,
    ) -> Result<Creature> {
        let mut tx = self.db.pool().begin().await.map_err(Error::Database)?;

        self.db.creatures.upsert_tx(&mut tx, id, name).await?;
        if let Some(names) = names {
            self.db
                .categories
                .replace_for_creature_tx(&mut tx, id, names)
                .await?;
        }

        let creature = self.db.creatures.fetch_tx(&mut tx, id).await?;
        tx.commit().await.map_err(Error::Database)?;
        Ok(creature)
    }
}
