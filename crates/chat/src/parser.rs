//! Rule-based command parser.
//!
//! A fixed, ordered table of patterns; the first rule whose pattern matches
//! the trimmed input wins. No backtracking across rules, no scoring. The
//! more specific multi-keyword patterns sit ahead of the looser ones, and the
//! bare-text catch-all is always last.

use regex::Regex;
use restock_lists::ItemStatus;

use crate::command::{CommandAction, ParsedCommand};

struct Rule {
    pattern: Regex,
    action: CommandAction,
    implied_status: Option<ItemStatus>,
}

fn rule(pattern: &str, action: CommandAction, implied_status: Option<ItemStatus>) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("rule pattern must compile"),
        action,
        implied_status,
    }
}

/// Stateless free-text command parser.
///
/// Construct once at startup; `parse` borrows immutably and is safe to share.
pub struct CommandParser {
    rules: Vec<Rule>,
}

impl CommandParser {
    pub fn new() -> Self {
        use CommandAction::*;

        let rules = vec![
            // "Add milk, eggs, butter"
            rule(r"(?i)^add\s+(.+)$", Add, Some(ItemStatus::Ok)),
            // "Update milk to low" or "Set milk to low"
            rule(
                r"(?i)^(?:update|set)\s+(.+?)\s+to\s+(ok|low|out|unknown)$",
                Update,
                None,
            ),
            // "Remove milk, eggs"
            rule(r"(?i)^(?:remove|delete)\s+(.+)$", Remove, None),
            // "Got milk, eggs" (items are back in stock)
            rule(r"(?i)^got\s+(.+)$", Update, Some(ItemStatus::Ok)),
            // "Need milk, eggs" (running low)
            rule(r"(?i)^need\s+(.+)$", Update, Some(ItemStatus::Low)),
            rule(r"(?i)^low\s+(?:on\s+)?(.+)$", Update, Some(ItemStatus::Low)),
            // "Out of milk, eggs"
            rule(r"(?i)^out\s+(?:of\s+)?(.+)$", Update, Some(ItemStatus::Out)),
            // "Show low items" or "List out items"
            rule(
                r"(?i)^(?:show|list)\s+(ok|low|out|unknown)\s+items?$",
                Filter,
                None,
            ),
            // "Show items" or "List items"
            rule(r"(?i)^(?:show|list)\s+items?$", List, None),
            // Catch-all: "milk, eggs, cheese" reads as an add.
            rule(r"^(.+)$", Add, Some(ItemStatus::Ok)),
        ];

        Self { rules }
    }

    /// Parse one line of input.
    ///
    /// Empty or whitespace-only input is "no command" (`None`), a normal
    /// outcome rather than an error.
    pub fn parse(&self, input: &str) -> Option<ParsedCommand> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        for rule in &self.rules {
            let Some(caps) = rule.pattern.captures(trimmed) else {
                continue;
            };

            let mut status = rule.implied_status;
            if let Some(token) = caps.get(2) {
                if let Ok(parsed) = ItemStatus::parse(token.as_str()) {
                    status = Some(parsed);
                }
            }

            let mut items = Vec::new();
            if let Some(segment) = caps.get(1) {
                if rule.action == CommandAction::Filter {
                    status = ItemStatus::parse(segment.as_str()).ok();
                } else {
                    items = split_items(segment.as_str());
                }
            }

            return Some(ParsedCommand {
                action: rule.action,
                items,
                status,
            });
        }

        None
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split the item-text segment on commas, trimming whitespace and dropping
/// empty segments. Item names are never case-transformed.
fn split_items(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
