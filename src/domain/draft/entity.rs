//! The draft owned by a creation screen

use serde::{Deserialize, Serialize};

use super::field::FieldValue;
use super::kind::EntityKind;
use crate::domain::experiment::{validate_experiment, ExperimentDraft, ExperimentType};
use crate::domain::judgment::{validate_judgment, JudgmentDraft, JudgmentType};
use crate::domain::query_set::{validate_query_set, ModeKind, QuerySetDraft};
use crate::domain::search_configuration::{
    validate_search_configuration, SearchConfigurationDraft,
};
use crate::domain::validation::ValidationResult;
use crate::domain::DomainError;

/// Entity kind together with its mode or type, i.e. the shape of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "entity", content = "variant", rename_all = "camelCase")]
pub enum DraftVariant {
    QuerySet(ModeKind),
    SearchConfiguration,
    Judgment(JudgmentType),
    Experiment(ExperimentType),
}

impl DraftVariant {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            DraftVariant::QuerySet(_) => EntityKind::QuerySet,
            DraftVariant::SearchConfiguration => EntityKind::SearchConfiguration,
            DraftVariant::Judgment(_) => EntityKind::Judgment,
            DraftVariant::Experiment(_) => EntityKind::Experiment,
        }
    }
}

/// An entity being created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "camelCase")]
pub enum Draft {
    QuerySet(QuerySetDraft),
    SearchConfiguration(SearchConfigurationDraft),
    Judgment(JudgmentDraft),
    Experiment(ExperimentDraft),
}

impl Draft {
    /// Blank draft of a kind, as shown when its creation screen opens
    pub fn new(kind: EntityKind) -> Self {
        match kind {
            EntityKind::QuerySet => Draft::QuerySet(QuerySetDraft::new()),
            EntityKind::SearchConfiguration => {
                Draft::SearchConfiguration(SearchConfigurationDraft::new())
            }
            EntityKind::Judgment => Draft::Judgment(JudgmentDraft::new()),
            EntityKind::Experiment => Draft::Experiment(ExperimentDraft::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Draft::QuerySet(_) => EntityKind::QuerySet,
            Draft::SearchConfiguration(_) => EntityKind::SearchConfiguration,
            Draft::Judgment(_) => EntityKind::Judgment,
            Draft::Experiment(_) => EntityKind::Experiment,
        }
    }

    pub fn variant(&self) -> DraftVariant {
        match self {
            Draft::QuerySet(draft) => DraftVariant::QuerySet(draft.mode.kind()),
            Draft::SearchConfiguration(_) => DraftVariant::SearchConfiguration,
            Draft::Judgment(draft) => DraftVariant::Judgment(draft.kind.judgment_type()),
            Draft::Experiment(draft) => DraftVariant::Experiment(draft.experiment_type()),
        }
    }

    /// Move the draft to another shape.
    ///
    /// Fields belonging to the previous mode or type are discarded and the
    /// current shape maps to itself. Moving to a different entity kind starts a
    /// blank draft of that kind.
    pub fn transition(self, variant: DraftVariant) -> Draft {
        match (self, variant) {
            (Draft::QuerySet(draft), DraftVariant::QuerySet(mode)) => {
                Draft::QuerySet(draft.with_mode(mode))
            }
            (draft @ Draft::SearchConfiguration(_), DraftVariant::SearchConfiguration) => draft,
            (Draft::Judgment(draft), DraftVariant::Judgment(judgment_type)) => {
                Draft::Judgment(draft.with_type(judgment_type))
            }
            (Draft::Experiment(draft), DraftVariant::Experiment(experiment_type)) => {
                Draft::Experiment(draft.with_type(experiment_type))
            }
            (_, variant) => Draft::new(variant.entity_kind()).transition(variant),
        }
    }

    /// Apply a single form change
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), DomainError> {
        match self {
            Draft::QuerySet(draft) => draft.set_field(field, value),
            Draft::SearchConfiguration(draft) => draft.set_field(field, value),
            Draft::Judgment(draft) => draft.set_field(field, value),
            Draft::Experiment(draft) => draft.set_field(field, value),
        }
    }

    /// Check every rule for the draft's current shape
    pub fn validate(&self) -> ValidationResult {
        validate(self)
    }
}

/// Validate any draft.
///
/// Pure and deterministic: the same draft always yields the same result, and
/// every violation is reported at once.
pub fn validate(draft: &Draft) -> ValidationResult {
    match draft {
        Draft::QuerySet(draft) => validate_query_set(draft),
        Draft::SearchConfiguration(draft) => validate_search_configuration(draft),
        Draft::Judgment(draft) => validate_judgment(draft),
        Draft::Experiment(draft) => validate_experiment(draft),
    }
}

impl From<QuerySetDraft> for Draft {
    fn from(draft: QuerySetDraft) -> Self {
        Draft::QuerySet(draft)
    }
}

impl From<SearchConfigurationDraft> for Draft {
    fn from(draft: SearchConfigurationDraft) -> Self {
        Draft::SearchConfiguration(draft)
    }
}

impl From<JudgmentDraft> for Draft {
    fn from(draft: JudgmentDraft) -> Self {
        Draft::Judgment(draft)
    }
}

impl From<ExperimentDraft> for Draft {
    fn from(draft: ExperimentDraft) -> Self {
        Draft::Experiment(draft)
    }
}
