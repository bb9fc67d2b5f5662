//! Free-text chat command parsing.
//!
//! This crate turns one line of free text ("Add milk, eggs", "Low on bread")
//! into a structured command. It is stateless and does no IO; mapping a parsed
//! command onto list operations happens in the API layer.

pub mod command;
pub mod parser;

pub use command::{CommandAction, ParsedCommand};
pub use parser::CommandParser;
