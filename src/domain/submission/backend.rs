//! Backend collaborator traits

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::outcome::EntityId;
use crate::domain::error::DomainError;
use crate::domain::experiment::ExperimentDraft;
use crate::domain::judgment::JudgmentDraft;
use crate::domain::query_set::QuerySetDraft;
use crate::domain::search_configuration::SearchConfigurationDraft;

#[cfg(test)]
use mockall::automock;

/// Service persisting validated drafts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntityBackend: Send + Sync {
    /// Creates a query set, sampled or uploaded depending on its mode
    async fn create_query_set(&self, draft: &QuerySetDraft) -> Result<EntityId, DomainError>;

    async fn create_search_configuration(
        &self,
        draft: &SearchConfigurationDraft,
    ) -> Result<EntityId, DomainError>;

    async fn create_judgment(&self, draft: &JudgmentDraft) -> Result<EntityId, DomainError>;

    async fn create_experiment(&self, draft: &ExperimentDraft) -> Result<EntityId, DomainError>;
}

/// An index a search configuration may target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_count: Option<u64>,
}

impl IndexInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: None,
            docs_count: None,
        }
    }
}

/// Lists the indexes offered on the search configuration screen
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IndexCatalog: Send + Sync {
    /// User-visible indexes, sorted by name
    async fn list_indexes(&self) -> Result<Vec<IndexInfo>, DomainError>;
}
