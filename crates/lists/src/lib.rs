//! Item-list domain module.
//!
//! This crate contains the business rules for shared item lists, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod item;
pub mod list;
pub mod status;

pub use item::{Item, ItemStatusChange};
pub use list::{ItemList, Participant, ParticipantRole};
pub use status::ItemStatus;
