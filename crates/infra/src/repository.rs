//! The list repository contract.
//!
//! Implementations must route every mutation through the `ItemList` aggregate
//! operations rather than manipulating the stored item sequence directly, so
//! the domain invariants hold regardless of backend.
//!
//! The choice between returning `None` and failing with `NotFound` is a
//! per-operation contract and callers branch on it:
//!
//! | Operation | Parent list absent | Target item absent |
//! |---|---|---|
//! | `get_by_id` | `None` | — |
//! | `update` / `delete` / `get_items` / `get_by_status` | `None` | — |
//! | `add_items` | `NotFound` | — (collision → `DuplicateName`) |
//! | `update_status` / `update_status_batch` | `NotFound` | `NotFound` |
//! | `delete_item` | `NotFound` | `Ok(None)` |
//! | `delete_items` | `None` | skipped (best-effort) |

use async_trait::async_trait;
use restock_core::{DomainError, ListId, UserId};
use restock_lists::{Item, ItemList, ItemStatus, ItemStatusChange};
use serde::Deserialize;
use thiserror::Error;

/// Result type for repository operations.
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Storage-layer error.
///
/// Domain failures pass through unchanged; only genuine backend failures get
/// their own variants.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("stored document is corrupt: {0}")]
    Document(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub fn not_found() -> Self {
        Self::Domain(DomainError::NotFound)
    }
}

/// Request to create a list.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListCommand {
    pub name: String,
    pub description: Option<String>,
    pub creator_id: UserId,
}

/// Request to rename and/or redescribe a list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateListCommand {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// An item to add. Timestamps are stamped by the repository at mutation time;
/// a missing status defaults to `Unknown`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub status: Option<ItemStatus>,
}

/// Persistence contract for item lists.
#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn get_by_id(&self, id: ListId) -> RepoResult<Option<ItemList>>;

    async fn create(&self, command: CreateListCommand) -> RepoResult<ItemList>;

    async fn update(&self, id: ListId, command: UpdateListCommand) -> RepoResult<Option<ItemList>>;

    /// Logical removal from the store; returns the deleted list.
    async fn delete(&self, id: ListId) -> RepoResult<Option<ItemList>>;

    async fn get_items(&self, id: ListId) -> RepoResult<Option<Vec<Item>>>;

    /// Append a batch of items, all-or-nothing. The whole batch shares one
    /// mutation timestamp.
    async fn add_items(&self, id: ListId, items: Vec<NewItem>) -> RepoResult<Vec<Item>>;

    async fn update_status(&self, id: ListId, name: &str, status: ItemStatus) -> RepoResult<Item>;

    /// All-or-nothing batch status update, issued as a single document write.
    async fn update_status_batch(
        &self,
        id: ListId,
        changes: Vec<ItemStatusChange>,
    ) -> RepoResult<Vec<Item>>;

    async fn delete_item(&self, id: ListId, name: &str) -> RepoResult<Option<Item>>;

    /// Best-effort batch deletion: absent names are skipped, found items are
    /// removed and returned.
    async fn delete_items(&self, id: ListId, names: Vec<String>) -> RepoResult<Option<Vec<Item>>>;

    async fn get_by_status(
        &self,
        id: ListId,
        statuses: Vec<ItemStatus>,
    ) -> RepoResult<Option<Vec<Item>>>;

    async fn get_by_creator(&self, user_id: UserId) -> RepoResult<Vec<ItemList>>;
}
