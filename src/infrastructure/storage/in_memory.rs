//! In-memory storage implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{Modification, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Thread-safe in-memory storage implementation
///
/// Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    entities: RwLock<HashMap<String, E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.get(key.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let entities = self.entities.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(entities.values().cloned().collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut entities = self.entities.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        entities.insert(key, entity.clone());
        Ok(entity)
    }

    async fn modify(&self, key: &E::Key, change: Modification<E>) -> Result<E, DomainError> {
        let mut entities = self.entities.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let entity = entities.get_mut(key.as_str()).ok_or_else(|| {
            DomainError::not_found(format!("Entity with key '{}' not found", key.as_str()))
        })?;

        change(entity);
        Ok(entity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Feature, FeatureId, FeatureStatus, ProjectId};

    fn feature(id: &str, title: &str) -> Feature {
        Feature::new(
            FeatureId::new(id).unwrap(),
            ProjectId::new("shop").unwrap(),
            title,
        )
    }

    fn key(id: &str) -> FeatureId {
        FeatureId::new(id).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage: InMemoryStorage<Feature> = InMemoryStorage::new();
        let f = feature("checkout", "Checkout");

        storage.create(f.clone()).await.unwrap();

        let result = storage.get(&key("checkout")).await.unwrap();
        assert_eq!(result, Some(f));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let storage: InMemoryStorage<Feature> = InMemoryStorage::new();

        let result = storage.get(&key("missing")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let storage: InMemoryStorage<Feature> = InMemoryStorage::new();
        let f = feature("checkout", "Checkout");

        storage.create(f.clone()).await.unwrap();
        let result = storage.create(f).await;

        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_modify() {
        let storage: InMemoryStorage<Feature> = InMemoryStorage::new();
        storage.create(feature("checkout", "Checkout")).await.unwrap();

        let done = Box::new(|f: &mut Feature| f.set_status(FeatureStatus::Done));
        let updated = storage.modify(&key("checkout"), done).await.unwrap();
        assert_eq!(updated.status(), FeatureStatus::Done);

        let result = storage.get(&key("checkout")).await.unwrap().unwrap();
        assert_eq!(result.status(), FeatureStatus::Done);
    }

    #[tokio::test]
    async fn test_modify_not_found() {
        let storage: InMemoryStorage<Feature> = InMemoryStorage::new();

        let result = storage
            .modify(&key("checkout"), Box::new(|f: &mut Feature| f.set_annotations("x")))
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_modify_keeps_changes_made_after_a_read() {
        let storage: InMemoryStorage<Feature> = InMemoryStorage::new();
        storage.create(feature("checkout", "Checkout")).await.unwrap();

        // A copy read before another writer changes the entity must not be written back
        let stale = storage.get(&key("checkout")).await.unwrap().unwrap();
        let annotate = Box::new(|f: &mut Feature| f.set_annotations("half done"));
        storage.modify(&key("checkout"), annotate).await.unwrap();

        let block = Box::new(|f: &mut Feature| f.set_status(FeatureStatus::Blocked));
        let result = storage.modify(stale.id(), block).await.unwrap();

        assert_eq!(result.status(), FeatureStatus::Blocked);
        assert_eq!(result.annotations(), "half done");
    }

    #[tokio::test]
    async fn test_list() {
        let storage: InMemoryStorage<Feature> = InMemoryStorage::new();
        for id in ["a", "b", "c"] {
            storage.create(feature(id, id)).await.unwrap();
        }

        assert_eq!(storage.list().await.unwrap().len(), 3);
    }
}
