//! Storage layer: the list repository contract and its implementations.

pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::MemoryListRepository;
pub use postgres::PgListRepository;
pub use repository::{
    CreateListCommand, ListRepository, NewItem, RepoResult, RepositoryError, UpdateListCommand,
};
