//! Items and item status changes.

use chrono::{DateTime, Utc};
use restock_core::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

use crate::status::ItemStatus;

/// A single entry in an item list.
///
/// An item has no identity beyond its name within its parent list: names are
/// compared exact-match, case-sensitive, never normalized. Timestamps are set
/// by the owning aggregate operation, never client-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create an item at `now`. A missing status defaults to `Unknown`.
    pub fn new(
        name: impl Into<String>,
        status: Option<ItemStatus>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(Self {
            name,
            status: status.unwrap_or(ItemStatus::Unknown),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Requested status for one named item, used by batch status updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatusChange {
    pub item_name: String,
    pub status: ItemStatus,
}

impl ItemStatusChange {
    pub fn new(item_name: impl Into<String>, status: ItemStatus) -> DomainResult<Self> {
        let item_name = item_name.into();
        if item_name.trim().is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }
        Ok(Self { item_name, status })
    }
}
