//! Application state for shared services

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::{DomainError, Draft, EntityBackend, IndexCatalog};
use crate::infrastructure::backend::{BackendFactory, Backends};
use crate::infrastructure::services::{CreationSession, DEFAULT_PREVIEW_LIMIT};

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn EntityBackend>,
    pub catalog: Arc<dyn IndexCatalog>,
    pub preview_limit: usize,
}

impl AppState {
    pub fn new(backends: Backends) -> Self {
        Self {
            backend: backends.entities,
            catalog: backends.catalog,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }

    pub fn with_preview_limit(mut self, preview_limit: usize) -> Self {
        self.preview_limit = preview_limit;
        self
    }

    /// Build the state for the configured backend
    pub fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let backends = BackendFactory::create(&config.backend)?;
        Ok(Self::new(backends).with_preview_limit(config.workbench.preview_limit))
    }

    /// Open a creation session on a posted draft
    pub fn session(&self, draft: Draft) -> CreationSession<dyn EntityBackend> {
        CreationSession::with_draft(self.backend.clone(), draft)
            .with_preview_limit(self.preview_limit)
    }
}
