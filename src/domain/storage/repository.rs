//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Generic storage trait for the entity operations the workspace needs
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves an entity by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves all entities, in no particular order
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Creates a new entity, returns error if already exists
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Applies `change` to the stored entity in one step and returns the result,
    /// returns error if not found
    ///
    /// No other write to the same storage can interleave with `change`.
    async fn modify(&self, key: &E::Key, change: Modification<E>) -> Result<E, DomainError>;
}

/// In-place change applied by [`Storage::modify`]
pub type Modification<E> = Box<dyn FnOnce(&mut E) + Send>;
