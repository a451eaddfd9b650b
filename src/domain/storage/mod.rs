//! Storage domain - Generic storage abstraction over workspace entities

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::{Modification, Storage};
