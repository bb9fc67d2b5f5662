//! In-memory repository for tests and development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use restock_core::{ListId, UserId};
use restock_lists::{Item, ItemList, ItemStatus, ItemStatusChange};

use crate::repository::{
    CreateListCommand, ListRepository, NewItem, RepoResult, RepositoryError, UpdateListCommand,
};

/// In-memory list store.
///
/// A `RwLock` over a `HashMap`; no lock is held across an await point. Lists
/// are cloned out, mutated through the aggregate, and written back whole,
/// matching the fetch/mutate/write shape of the persistent backend.
#[derive(Debug, Default)]
pub struct MemoryListRepository {
    inner: RwLock<HashMap<ListId, ItemList>>,
}

impl MemoryListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<ListId, ItemList>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<ListId, ItemList>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Stamp a batch of incoming items with one shared mutation time.
pub(crate) fn materialize_items(
    items: Vec<NewItem>,
    now: chrono::DateTime<Utc>,
) -> RepoResult<Vec<Item>> {
    items
        .into_iter()
        .map(|item| Item::new(item.name, item.status, now).map_err(RepositoryError::from))
        .collect()
}

#[async_trait]
impl ListRepository for MemoryListRepository {
    async fn get_by_id(&self, id: ListId) -> RepoResult<Option<ItemList>> {
        Ok(self.read().get(&id).cloned())
    }

    async fn create(&self, command: CreateListCommand) -> RepoResult<ItemList> {
        let list = ItemList::create(
            ListId::new(),
            command.name,
            command.description,
            command.creator_id,
            Utc::now(),
        )?;
        self.write().insert(list.id, list.clone());
        Ok(list)
    }

    async fn update(&self, id: ListId, command: UpdateListCommand) -> RepoResult<Option<ItemList>> {
        let mut map = self.write();
        let Some(list) = map.get_mut(&id) else {
            return Ok(None);
        };
        list.apply_update(command.name, command.description, Utc::now())?;
        Ok(Some(list.clone()))
    }

    async fn delete(&self, id: ListId) -> RepoResult<Option<ItemList>> {
        Ok(self.write().remove(&id))
    }

    async fn get_items(&self, id: ListId) -> RepoResult<Option<Vec<Item>>> {
        Ok(self.read().get(&id).map(|list| list.items.clone()))
    }

    async fn add_items(&self, id: ListId, items: Vec<NewItem>) -> RepoResult<Vec<Item>> {
        let now = Utc::now();
        let items = materialize_items(items, now)?;

        let mut map = self.write();
        let list = map.get_mut(&id).ok_or_else(RepositoryError::not_found)?;
        Ok(list.add_items(items, now)?)
    }

    async fn update_status(&self, id: ListId, name: &str, status: ItemStatus) -> RepoResult<Item> {
        let mut map = self.write();
        let list = map.get_mut(&id).ok_or_else(RepositoryError::not_found)?;
        Ok(list.set_item_status(name, status, Utc::now())?)
    }

    async fn update_status_batch(
        &self,
        id: ListId,
        changes: Vec<ItemStatusChange>,
    ) -> RepoResult<Vec<Item>> {
        let mut map = self.write();
        let list = map.get_mut(&id).ok_or_else(RepositoryError::not_found)?;
        Ok(list.set_item_statuses(&changes, Utc::now())?)
    }

    async fn delete_item(&self, id: ListId, name: &str) -> RepoResult<Option<Item>> {
        let mut map = self.write();
        let list = map.get_mut(&id).ok_or_else(RepositoryError::not_found)?;
        Ok(list.remove_item(name, Utc::now()))
    }

    async fn delete_items(&self, id: ListId, names: Vec<String>) -> RepoResult<Option<Vec<Item>>> {
        let mut map = self.write();
        let Some(list) = map.get_mut(&id) else {
            return Ok(None);
        };
        Ok(Some(list.remove_items(&names, Utc::now())))
    }

    async fn get_by_status(
        &self,
        id: ListId,
        statuses: Vec<ItemStatus>,
    ) -> RepoResult<Option<Vec<Item>>> {
        Ok(self
            .read()
            .get(&id)
            .map(|list| list.items_by_status(&statuses)))
    }

    async fn get_by_creator(&self, user_id: UserId) -> RepoResult<Vec<ItemList>> {
        Ok(self
            .read()
            .values()
            .filter(|list| list.creator_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_core::DomainError;

    fn new_item(name: &str, status: Option<ItemStatus>) -> NewItem {
        NewItem {
            name: name.to_string(),
            status,
        }
    }

    async fn seeded_repo() -> (MemoryListRepository, ListId) {
        let repo = MemoryListRepository::new();
        let list = repo
            .create(CreateListCommand {
                name: "Groceries".to_string(),
                description: None,
                creator_id: UserId::new(),
            })
            .await
            .unwrap();
        (repo, list.id)
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_unknown_list() {
        let repo = MemoryListRepository::new();
        assert!(repo.get_by_id(ListId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn add_items_fails_not_found_for_unknown_list() {
        let repo = MemoryListRepository::new();
        let err = repo
            .add_items(ListId::new(), vec![new_item("milk", None)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::NotFound)
        ));
    }

    #[tokio::test]
    async fn duplicate_batch_leaves_items_unchanged() {
        let (repo, id) = seeded_repo().await;
        repo.add_items(id, vec![new_item("milk", None)])
            .await
            .unwrap();

        let err = repo
            .add_items(id, vec![new_item("eggs", None), new_item("milk", None)])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::DuplicateName(_))
        ));

        let items = repo.get_items(id).await.unwrap().unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["milk"]);
    }

    #[tokio::test]
    async fn unknown_status_round_trips_through_listing() {
        let (repo, id) = seeded_repo().await;
        repo.add_items(id, vec![new_item("milk", None)])
            .await
            .unwrap();

        let items = repo.get_items(id).await.unwrap().unwrap();
        assert_eq!(items[0].status, ItemStatus::Unknown);
    }

    #[tokio::test]
    async fn status_batch_failure_touches_nothing() {
        let (repo, id) = seeded_repo().await;
        repo.add_items(id, vec![new_item("milk", Some(ItemStatus::Ok))])
            .await
            .unwrap();

        let changes = vec![
            ItemStatusChange::new("milk", ItemStatus::Out).unwrap(),
            ItemStatusChange::new("eggs", ItemStatus::Out).unwrap(),
        ];
        let err = repo.update_status_batch(id, changes).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::NotFound)
        ));

        let items = repo.get_items(id).await.unwrap().unwrap();
        assert_eq!(items[0].status, ItemStatus::Ok);
    }

    #[tokio::test]
    async fn delete_items_skips_absent_names() {
        let (repo, id) = seeded_repo().await;
        repo.add_items(id, vec![new_item("milk", None)])
            .await
            .unwrap();

        let removed = repo
            .delete_items(id, vec!["milk".to_string(), "eggs".to_string()])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].name, "milk");
    }

    #[tokio::test]
    async fn delete_item_distinguishes_missing_list_from_missing_item() {
        let (repo, id) = seeded_repo().await;

        // Missing item in an existing list: Ok(None).
        assert!(repo.delete_item(id, "ghost").await.unwrap().is_none());

        // Missing list: NotFound.
        let err = repo.delete_item(ListId::new(), "ghost").await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::Domain(DomainError::NotFound)
        ));
    }

    #[tokio::test]
    async fn get_by_status_is_idempotent() {
        let (repo, id) = seeded_repo().await;
        repo.add_items(
            id,
            vec![
                new_item("milk", Some(ItemStatus::Low)),
                new_item("eggs", Some(ItemStatus::Ok)),
            ],
        )
        .await
        .unwrap();

        let first = repo
            .get_by_status(id, vec![ItemStatus::Low])
            .await
            .unwrap()
            .unwrap();
        let second = repo
            .get_by_status(id, vec![ItemStatus::Low])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "milk");
    }

    #[tokio::test]
    async fn get_by_creator_returns_only_that_users_lists() {
        let repo = MemoryListRepository::new();
        let creator = UserId::new();
        for name in ["a", "b"] {
            repo.create(CreateListCommand {
                name: name.to_string(),
                description: None,
                creator_id: creator,
            })
            .await
            .unwrap();
        }
        repo.create(CreateListCommand {
            name: "other".to_string(),
            description: None,
            creator_id: UserId::new(),
        })
        .await
        .unwrap();

        assert_eq!(repo.get_by_creator(creator).await.unwrap().len(), 2);
    }
}
