//! Key-value store adapters.

mod file_store;
mod memory_store;

pub use file_store::{FileKeyValueStore, STORE_FILE_EXTENSION};
pub use memory_store::InMemoryKeyValueStore;
