//! Structured form of a chat command.

use restock_lists::ItemStatus;

/// What the user asked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Add the named items to the list.
    Add,
    /// Set the status of the named items.
    Update,
    /// Delete the named items from the list.
    Remove,
    /// Show all items.
    List,
    /// Show items with a particular status.
    Filter,
}

/// A successfully parsed chat command.
///
/// `items` is empty for `List` and `Filter`. `status` is the filter status,
/// the explicit `to <status>` token, or the status implied by the trigger
/// phrase ("got" implies `Ok`, "need" implies `Low`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub action: CommandAction,
    pub items: Vec<String>,
    pub status: Option<ItemStatus>,
}
