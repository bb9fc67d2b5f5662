//! Postgres-backed list repository.
//!
//! Each list is persisted as one row holding the whole aggregate as a JSONB
//! document, so a mutation is always a single-document conditional write:
//! fetch the document, run the aggregate operation on the materialized copy,
//! write the document back. Concurrent mutations of the same list are not
//! serialized here; last-fetch-wins races are accepted for this domain.
//!
//! ## Thread safety
//!
//! Uses the SQLx connection pool, which is thread-safe (`Arc` + `Send` +
//! `Sync`); the repository can be shared across request tasks freely.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use restock_core::{ListId, UserId};
use restock_lists::{Item, ItemList, ItemStatus, ItemStatusChange};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::memory::materialize_items;
use crate::repository::{
    CreateListCommand, ListRepository, NewItem, RepoResult, RepositoryError, UpdateListCommand,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS item_lists (
    id         UUID PRIMARY KEY,
    creator_id UUID NOT NULL,
    doc        JSONB NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

/// Postgres-backed list store (one JSONB document per list).
#[derive(Debug, Clone)]
pub struct PgListRepository {
    pool: Arc<PgPool>,
}

impl PgListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the backing table if it does not exist yet.
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(SCHEMA).execute(&*self.pool).await?;
        Ok(())
    }

    async fn fetch(&self, id: ListId) -> RepoResult<Option<ItemList>> {
        let row = sqlx::query("SELECT doc FROM item_lists WHERE id = $1")
            .bind(Uuid::from(id))
            .fetch_optional(&*self.pool)
            .await?;

        match row {
            Some(row) => {
                let doc: serde_json::Value = row.try_get("doc")?;
                Ok(Some(serde_json::from_value(doc)?))
            }
            None => Ok(None),
        }
    }

    /// Write the whole document back in one conditional single-row update.
    async fn store(&self, list: &ItemList) -> RepoResult<()> {
        let doc = serde_json::to_value(list)?;
        sqlx::query("UPDATE item_lists SET doc = $2, updated_at = $3 WHERE id = $1")
            .bind(Uuid::from(list.id))
            .bind(doc)
            .bind(list.updated_at)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ListRepository for PgListRepository {
    async fn get_by_id(&self, id: ListId) -> RepoResult<Option<ItemList>> {
        self.fetch(id).await
    }

    async fn create(&self, command: CreateListCommand) -> RepoResult<ItemList> {
        let list = ItemList::create(
            ListId::new(),
            command.name,
            command.description,
            command.creator_id,
            Utc::now(),
        )?;

        let doc = serde_json::to_value(&list)?;
        sqlx::query(
            "INSERT INTO item_lists (id, creator_id, doc, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::from(list.id))
        .bind(Uuid::from(list.creator_id))
        .bind(doc)
        .bind(list.updated_at)
        .execute(&*self.pool)
        .await?;

        tracing::debug!(list_id = %list.id, "created item list");
        Ok(list)
    }

    async fn update(&self, id: ListId, command: UpdateListCommand) -> RepoResult<Option<ItemList>> {
        let Some(mut list) = self.fetch(id).await? else {
            return Ok(None);
        };
        list.apply_update(command.name, command.description, Utc::now())?;
        self.store(&list).await?;
        Ok(Some(list))
    }

    async fn delete(&self, id: ListId) -> RepoResult<Option<ItemList>> {
        let Some(list) = self.fetch(id).await? else {
            return Ok(None);
        };
        sqlx::query("DELETE FROM item_lists WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(&*self.pool)
            .await?;
        Ok(Some(list))
    }

    async fn get_items(&self, id: ListId) -> RepoResult<Option<Vec<Item>>> {
        Ok(self.fetch(id).await?.map(|list| list.items))
    }

    async fn add_items(&self, id: ListId, items: Vec<NewItem>) -> RepoResult<Vec<Item>> {
        let now = Utc::now();
        let items = materialize_items(items, now)?;

        let mut list = self.fetch(id).await?.ok_or_else(RepositoryError::not_found)?;
        let added = list.add_items(items, now)?;
        self.store(&list).await?;
        Ok(added)
    }

    async fn update_status(&self, id: ListId, name: &str, status: ItemStatus) -> RepoResult<Item> {
        let mut list = self.fetch(id).await?.ok_or_else(RepositoryError::not_found)?;
        let updated = list.set_item_status(name, status, Utc::now())?;
        self.store(&list).await?;
        Ok(updated)
    }

    async fn update_status_batch(
        &self,
        id: ListId,
        changes: Vec<ItemStatusChange>,
    ) -> RepoResult<Vec<Item>> {
        let mut list = self.fetch(id).await?.ok_or_else(RepositoryError::not_found)?;
        let updated = list.set_item_statuses(&changes, Utc::now())?;
        // One write for the whole batch narrows the lost-update window
        // relative to N single-item writes.
        self.store(&list).await?;
        Ok(updated)
    }

    async fn delete_item(&self, id: ListId, name: &str) -> RepoResult<Option<Item>> {
        let mut list = self.fetch(id).await?.ok_or_else(RepositoryError::not_found)?;
        let removed = list.remove_item(name, Utc::now());
        if removed.is_some() {
            self.store(&list).await?;
        }
        Ok(removed)
    }

    async fn delete_items(&self, id: ListId, names: Vec<String>) -> RepoResult<Option<Vec<Item>>> {
        let Some(mut list) = self.fetch(id).await? else {
            return Ok(None);
        };
        let removed = list.remove_items(&names, Utc::now());
        if !removed.is_empty() {
            self.store(&list).await?;
        }
        Ok(Some(removed))
    }

    async fn get_by_status(
        &self,
        id: ListId,
        statuses: Vec<ItemStatus>,
    ) -> RepoResult<Option<Vec<Item>>> {
        Ok(self
            .fetch(id)
            .await?
            .map(|list| list.items_by_status(&statuses)))
    }

    async fn get_by_creator(&self, user_id: UserId) -> RepoResult<Vec<ItemList>> {
        let rows = sqlx::query("SELECT doc FROM item_lists WHERE creator_id = $1 ORDER BY id")
            .bind(Uuid::from(user_id))
            .fetch_all(&*self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let doc: serde_json::Value = row.try_get("doc")?;
                Ok(serde_json::from_value(doc)?)
            })
            .collect()
    }
}
