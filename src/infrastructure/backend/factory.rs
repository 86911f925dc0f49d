use std::sync::Arc;
use std::time::Duration;

use super::{HttpEntityBackend, InMemoryEntityBackend};
use crate::config::{BackendConfig, BackendKind};
use crate::domain::{DomainError, EntityBackend, IndexCatalog};

/// Backend handles shared by the session layer and the index picker
#[derive(Clone)]
pub struct Backends {
    pub entities: Arc<dyn EntityBackend>,
    pub catalog: Arc<dyn IndexCatalog>,
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends").finish_non_exhaustive()
    }
}

/// Factory for creating backends
#[derive(Debug)]
pub struct BackendFactory;

impl BackendFactory {
    /// Create the configured backend
    pub fn create(config: &BackendConfig) -> Result<Backends, DomainError> {
        match config.kind {
            BackendKind::Http => {
                if config.base_url.trim().is_empty() {
                    return Err(DomainError::configuration(
                        "backend.base_url is required for the http backend",
                    ));
                }

                let mut backend = HttpEntityBackend::new(
                    config.base_url.trim(),
                    Duration::from_secs(config.timeout_secs),
                )?;
                if let Some(username) = &config.username {
                    backend = backend.with_basic_auth(username, config.password.clone());
                }

                let backend = Arc::new(backend);
                Ok(Backends {
                    entities: backend.clone(),
                    catalog: backend,
                })
            }

            BackendKind::InMemory => {
                let backend = Arc::new(
                    InMemoryEntityBackend::new()
                        .with_indexes(config.indexes.iter().cloned())
                        .with_deny_writes(config.deny_writes),
                );
                Ok(Backends {
                    entities: backend.clone(),
                    catalog: backend,
                })
            }
        }
    }
}
