//! Service wiring: repository selection and the list use-case surface.

use std::sync::Arc;

use restock_chat::CommandParser;
use restock_core::{ListId, UserId};
use restock_infra::{
    CreateListCommand, ListRepository, MemoryListRepository, NewItem, PgListRepository, RepoResult,
    UpdateListCommand,
};
use restock_lists::{Item, ItemList, ItemStatus, ItemStatusChange};

/// Everything the HTTP handlers need, shared via an `Extension`.
pub struct AppServices {
    pub lists: ListService,
    pub parser: CommandParser,
}

/// Build the service graph from the environment.
///
/// `DATABASE_URL` set selects the Postgres repository (bootstrapping its
/// schema); otherwise the in-memory repository is used.
pub async fn build_services() -> anyhow::Result<AppServices> {
    let repo: Arc<dyn ListRepository> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url).await?;
            let repo = PgListRepository::new(pool);
            repo.ensure_schema().await?;
            tracing::info!("using postgres list repository");
            Arc::new(repo)
        }
        Err(_) => {
            tracing::info!("DATABASE_URL not set; using in-memory list repository");
            Arc::new(MemoryListRepository::new())
        }
    };

    Ok(AppServices {
        lists: ListService::new(repo),
        parser: CommandParser::new(),
    })
}

/// Thin orchestration over the repository: one method per use case, each a
/// direct pass-through. The aggregate enforces the invariants; nothing is
/// duplicated or translated here, so the per-operation `None`-vs-`NotFound`
/// contract of the repository surfaces unchanged to callers.
pub struct ListService {
    repo: Arc<dyn ListRepository>,
}

impl ListService {
    pub fn new(repo: Arc<dyn ListRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_list(&self, id: ListId) -> RepoResult<Option<ItemList>> {
        self.repo.get_by_id(id).await
    }

    pub async fn create_list(&self, command: CreateListCommand) -> RepoResult<ItemList> {
        self.repo.create(command).await
    }

    pub async fn update_list(
        &self,
        id: ListId,
        command: UpdateListCommand,
    ) -> RepoResult<Option<ItemList>> {
        self.repo.update(id, command).await
    }

    pub async fn delete_list(&self, id: ListId) -> RepoResult<Option<ItemList>> {
        self.repo.delete(id).await
    }

    pub async fn get_items(&self, id: ListId) -> RepoResult<Option<Vec<Item>>> {
        self.repo.get_items(id).await
    }

    pub async fn add_items(&self, id: ListId, items: Vec<NewItem>) -> RepoResult<Vec<Item>> {
        self.repo.add_items(id, items).await
    }

    pub async fn update_item_status(
        &self,
        id: ListId,
        name: &str,
        status: ItemStatus,
    ) -> RepoResult<Item> {
        self.repo.update_status(id, name, status).await
    }

    pub async fn update_item_statuses(
        &self,
        id: ListId,
        changes: Vec<ItemStatusChange>,
    ) -> RepoResult<Vec<Item>> {
        self.repo.update_status_batch(id, changes).await
    }

    pub async fn delete_item(&self, id: ListId, name: &str) -> RepoResult<Option<Item>> {
        self.repo.delete_item(id, name).await
    }

    pub async fn delete_items(
        &self,
        id: ListId,
        names: Vec<String>,
    ) -> RepoResult<Option<Vec<Item>>> {
        self.repo.delete_items(id, names).await
    }

    pub async fn get_items_by_status(
        &self,
        id: ListId,
        statuses: Vec<ItemStatus>,
    ) -> RepoResult<Option<Vec<Item>>> {
        self.repo.get_by_status(id, statuses).await
    }

    pub async fn get_lists_by_creator(&self, user_id: UserId) -> RepoResult<Vec<ItemList>> {
        self.repo.get_by_creator(user_id).await
    }
}
