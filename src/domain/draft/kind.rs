//! Creatable entity kinds and the screens they navigate to

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of entity the workbench can create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    QuerySet,
    SearchConfiguration,
    Judgment,
    Experiment,
}

impl EntityKind {
    /// Lower-case name used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::QuerySet => "query set",
            EntityKind::SearchConfiguration => "search configuration",
            EntityKind::Judgment => "judgment",
            EntityKind::Experiment => "experiment",
        }
    }

    /// Route of the entity's list view
    pub fn list_route(&self) -> &'static str {
        match self {
            EntityKind::QuerySet => "/querySet",
            EntityKind::SearchConfiguration => "/searchConfiguration",
            EntityKind::Judgment => "/judgment",
            EntityKind::Experiment => "/experiment",
        }
    }

    /// Route of the entity's creation screen
    pub fn create_route(&self) -> String {
        format!("{}/create", self.list_route())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Route change requested by the core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub route: String,
}

impl Navigation {
    pub fn to(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }

    /// Back to the list view of an entity kind
    pub fn list(kind: EntityKind) -> Self {
        Self::to(kind.list_route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(EntityKind::QuerySet.list_route(), "/querySet");
        assert_eq!(
            EntityKind::SearchConfiguration.create_route(),
            "/searchConfiguration/create"
        );
        assert_eq!(Navigation::list(EntityKind::Judgment).route, "/judgment");
    }

    #[test]
    fn test_labels() {
        assert_eq!(EntityKind::SearchConfiguration.to_string(), "search configuration");
        assert_eq!(EntityKind::Experiment.label(), "experiment");
    }
}
