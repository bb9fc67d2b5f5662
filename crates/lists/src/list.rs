//! The `ItemList` aggregate.
//!
//! The list and its items form one consistency boundary: every mutation of the
//! item sequence goes through the operations here so the invariants hold
//! regardless of which storage backend materialized the list.

use chrono::{DateTime, Utc};
use restock_core::{DomainError, DomainResult, ListId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::item::{Item, ItemStatusChange};
use crate::status::ItemStatus;

/// Role of a collaborator on a list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Owner,
    Editor,
    Viewer,
}

impl ParticipantRole {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(ParticipantRole::Owner),
            "editor" => Ok(ParticipantRole::Editor),
            "viewer" => Ok(ParticipantRole::Viewer),
            _ => Err(DomainError::validation(format!("invalid role: {s}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Owner => "owner",
            ParticipantRole::Editor => "editor",
            ParticipantRole::Viewer => "viewer",
        }
    }
}

/// A role-scoped collaborator on a list.
///
/// Carried in the model and in storage documents; participant mutation is
/// handled outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub role: ParticipantRole,
}

/// Aggregate root: a named list of uniquely-named items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    pub id: ListId,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: UserId,
    pub items: Vec<Item>,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemList {
    /// Create an empty list at `now`.
    pub fn create(
        id: ListId,
        name: impl Into<String>,
        description: Option<String>,
        creator_id: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("list name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            description,
            creator_id,
            items: Vec::new(),
            participants: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Append a batch of items, all-or-nothing.
    ///
    /// Every candidate name is checked against the union of existing names and
    /// names accepted earlier in the same call before anything is mutated; the
    /// first collision rejects the whole batch, naming the offending item.
    /// On success the items are appended in input order and `updated_at` is
    /// set to `now`. Returns the appended items.
    pub fn add_items(&mut self, new_items: Vec<Item>, now: DateTime<Utc>) -> DomainResult<Vec<Item>> {
        {
            let mut names: HashSet<&str> = self.items.iter().map(|i| i.name.as_str()).collect();
            for item in &new_items {
                if !names.insert(item.name.as_str()) {
                    return Err(DomainError::duplicate_name(&item.name));
                }
            }
        }

        self.items.extend(new_items.iter().cloned());
        self.updated_at = now;
        Ok(new_items)
    }

    /// Remove the item with the given name, exact match.
    ///
    /// Absence is a normal outcome (`None`), never an error. `updated_at`
    /// only advances when an item actually left.
    pub fn remove_item(&mut self, name: &str, now: DateTime<Utc>) -> Option<Item> {
        let index = self.items.iter().position(|item| item.name == name)?;
        let removed = self.items.remove(index);
        self.updated_at = now;
        Some(removed)
    }

    /// Remove several named items, best-effort.
    ///
    /// Found items are removed and returned; absent names are silently
    /// skipped. This deliberately contrasts with the all-or-nothing presence
    /// check of [`ItemList::set_item_statuses`].
    pub fn remove_items(&mut self, names: &[String], now: DateTime<Utc>) -> Vec<Item> {
        let mut removed = Vec::new();
        for name in names {
            if let Some(item) = self.remove_item(name, now) {
                removed.push(item);
            }
        }
        removed
    }

    /// Replace the status (and `updated_at`) of the named item.
    pub fn set_item_status(
        &mut self,
        name: &str,
        status: ItemStatus,
        now: DateTime<Utc>,
    ) -> DomainResult<Item> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.name == name)
            .ok_or(DomainError::NotFound)?;
        item.status = status;
        item.updated_at = now;
        self.updated_at = now;
        Ok(item.clone())
    }

    /// Apply a batch of status changes, all-or-nothing.
    ///
    /// Presence is validated for *all* names before any status is written;
    /// the first missing name fails the whole call with no state change.
    pub fn set_item_statuses(
        &mut self,
        changes: &[ItemStatusChange],
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<Item>> {
        for change in changes {
            if !self.items.iter().any(|item| item.name == change.item_name) {
                return Err(DomainError::NotFound);
            }
        }

        let mut updated = Vec::with_capacity(changes.len());
        for change in changes {
            updated.push(self.set_item_status(&change.item_name, change.status, now)?);
        }
        Ok(updated)
    }

    /// Items whose status is a member of `statuses`, in list order.
    pub fn items_by_status(&self, statuses: &[ItemStatus]) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| statuses.contains(&item.status))
            .cloned()
            .collect()
    }

    /// Look up a single item by exact name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Rename and/or redescribe the list.
    pub fn apply_update(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("list name cannot be empty"));
            }
            self.name = name;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        self.updated_at = now;
        Ok(())
    }
}
