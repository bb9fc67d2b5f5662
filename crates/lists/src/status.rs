//! Restock status of an item.

use restock_core::DomainError;
use serde::{Deserialize, Serialize};

/// Restock status of a single item.
///
/// These are independent tags, not a severity scale: there is no meaningful
/// ordering between them, and status filters are order-insensitive sets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Out,
    Low,
    Ok,
    Unknown,
}

impl ItemStatus {
    /// All statuses, for iteration in filters and tests.
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Out,
        ItemStatus::Low,
        ItemStatus::Ok,
        ItemStatus::Unknown,
    ];

    /// Parse a status token case-insensitively (`"low"`, `"Low"`, `"LOW"`).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "out" => Ok(ItemStatus::Out),
            "low" => Ok(ItemStatus::Low),
            "ok" => Ok(ItemStatus::Ok),
            "unknown" => Ok(ItemStatus::Unknown),
            _ => Err(DomainError::validation(format!(
                "invalid status: {s} (expected one of: out, low, ok, unknown)"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Out => "out",
            ItemStatus::Low => "low",
            ItemStatus::Ok => "ok",
            ItemStatus::Unknown => "unknown",
        }
    }

    /// Capitalized display form used in chat confirmations (`Low`, `Ok`).
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemStatus::Out => "Out",
            ItemStatus::Low => "Low",
            ItemStatus::Ok => "Ok",
            ItemStatus::Unknown => "Unknown",
        }
    }
}

impl core::str::FromStr for ItemStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemStatus::parse(s)
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
