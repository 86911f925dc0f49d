//! In-memory backend

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::experiment::ExperimentDraft;
use crate::domain::judgment::JudgmentDraft;
use crate::domain::query_set::QuerySetDraft;
use crate::domain::search_configuration::SearchConfigurationDraft;
use crate::domain::{DomainError, Draft, EntityBackend, EntityId, IndexCatalog, IndexInfo};

/// An entity created through the in-memory backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntity {
    pub id: EntityId,
    pub draft: Draft,
    pub created_at: DateTime<Utc>,
}

/// Process-local implementation of [`EntityBackend`] and [`IndexCatalog`]
#[derive(Debug, Default)]
pub struct InMemoryEntityBackend {
    entities: RwLock<HashMap<String, StoredEntity>>,
    indexes: Vec<String>,
    deny_writes: bool,
}

impl InMemoryEntityBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indexes<I, S>(mut self, indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indexes = indexes.into_iter().map(Into::into).collect();
        self
    }

    /// Reject every write with `Forbidden`, like a cluster whose security
    /// plugin grants no write permissions
    pub fn with_deny_writes(mut self, deny_writes: bool) -> Self {
        self.deny_writes = deny_writes;
        self
    }

    pub fn get(&self, id: &EntityId) -> Result<Option<StoredEntity>, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(entities.get(id.as_str()).cloned())
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        let entities = self
            .entities
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(entities.len())
    }

    fn store(&self, draft: Draft) -> Result<EntityId, DomainError> {
        if self.deny_writes {
            return Err(DomainError::forbidden("Forbidden"));
        }

        let mut entities = self
            .entities
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let id = EntityId::new(Uuid::new_v4().to_string());
        debug!(entity = %draft.kind(), entity_id = %id, "Stored entity");

        entities.insert(
            id.as_str().to_string(),
            StoredEntity {
                id: id.clone(),
                draft,
                created_at: Utc::now(),
            },
        );

        Ok(id)
    }
}

#[async_trait]
impl EntityBackend for InMemoryEntityBackend {
    async fn create_query_set(&self, draft: &QuerySetDraft) -> Result<EntityId, DomainError> {
        self.store(Draft::from(draft.clone()))
    }

    async fn create_search_configuration(
        &self,
        draft: &SearchConfigurationDraft,
    ) -> Result<EntityId, DomainError> {
        self.store(Draft::from(draft.clone()))
    }

    async fn create_judgment(&self, draft: &JudgmentDraft) -> Result<EntityId, DomainError> {
        self.store(Draft::from(draft.clone()))
    }

    async fn create_experiment(&self, draft: &ExperimentDraft) -> Result<EntityId, DomainError> {
        self.store(Draft::from(draft.clone()))
    }
}

#[async_trait]
impl IndexCatalog for InMemoryEntityBackend {
    async fn list_indexes(&self) -> Result<Vec<IndexInfo>, DomainError> {
        let mut names: Vec<&String> = self
            .indexes
            .iter()
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();
        names.dedup();

        Ok(names.into_iter().map(IndexInfo::new).collect())
    }
}
