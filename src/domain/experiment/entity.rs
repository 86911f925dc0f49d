//! Experiment domain entities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::draft::field::{fields, unknown_field, FieldValue};
use crate::domain::DomainError;

pub const DEFAULT_EXPERIMENT_SIZE: i64 = 10;

// ============================================================================
// ExperimentType
// ============================================================================

/// Persisted experiment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentType {
    /// Two search configurations compared over a whole query set
    PairwiseComparison,
    /// One search configuration scored against judgments
    PointwiseEvaluation,
    /// Hybrid search parameter sweep scored against judgments
    HybridOptimizer,
}

impl ExperimentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentType::PairwiseComparison => "PAIRWISE_COMPARISON",
            ExperimentType::PointwiseEvaluation => "POINTWISE_EVALUATION",
            ExperimentType::HybridOptimizer => "HYBRID_OPTIMIZER",
        }
    }

    /// Number of search configurations the experiment runs against
    pub fn required_search_configurations(&self) -> usize {
        match self {
            ExperimentType::PairwiseComparison => 2,
            ExperimentType::PointwiseEvaluation | ExperimentType::HybridOptimizer => 1,
        }
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExperimentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "PAIRWISE_COMPARISON" => Ok(ExperimentType::PairwiseComparison),
            "POINTWISE_EVALUATION" => Ok(ExperimentType::PointwiseEvaluation),
            "HYBRID_OPTIMIZER" => Ok(ExperimentType::HybridOptimizer),
            other => Err(DomainError::validation(format!(
                "Unknown experiment type '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// ExperimentKind
// ============================================================================

/// Search configurations and judgments an evaluation runs against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationTargets {
    #[serde(default, rename = "searchConfigurationList")]
    pub search_configuration_refs: Vec<String>,
    #[serde(default, rename = "judgmentList")]
    pub judgment_refs: Vec<String>,
}

/// Type-specific part of an experiment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperimentKind {
    PairwiseComparison {
        #[serde(default, rename = "searchConfigurationList")]
        search_configuration_refs: Vec<String>,
    },
    PointwiseEvaluation(EvaluationTargets),
    HybridOptimizer(EvaluationTargets),
}

impl ExperimentKind {
    pub fn experiment_type(&self) -> ExperimentType {
        match self {
            ExperimentKind::PairwiseComparison { .. } => ExperimentType::PairwiseComparison,
            ExperimentKind::PointwiseEvaluation(_) => ExperimentType::PointwiseEvaluation,
            ExperimentKind::HybridOptimizer(_) => ExperimentType::HybridOptimizer,
        }
    }

    pub fn search_configuration_refs(&self) -> &[String] {
        match self {
            ExperimentKind::PairwiseComparison {
                search_configuration_refs,
            } => search_configuration_refs,
            ExperimentKind::PointwiseEvaluation(targets)
            | ExperimentKind::HybridOptimizer(targets) => &targets.search_configuration_refs,
        }
    }

    /// Judgments used for scoring; pairwise comparisons have none
    pub fn judgment_refs(&self) -> Option<&[String]> {
        match self {
            ExperimentKind::PairwiseComparison { .. } => None,
            ExperimentKind::PointwiseEvaluation(targets)
            | ExperimentKind::HybridOptimizer(targets) => Some(&targets.judgment_refs),
        }
    }

    fn blank(experiment_type: ExperimentType) -> Self {
        match experiment_type {
            ExperimentType::PairwiseComparison => ExperimentKind::PairwiseComparison {
                search_configuration_refs: Vec::new(),
            },
            ExperimentType::PointwiseEvaluation => {
                ExperimentKind::PointwiseEvaluation(EvaluationTargets::default())
            }
            ExperimentType::HybridOptimizer => {
                ExperimentKind::HybridOptimizer(EvaluationTargets::default())
            }
        }
    }
}

impl Default for ExperimentKind {
    fn default() -> Self {
        Self::blank(ExperimentType::PairwiseComparison)
    }
}

// ============================================================================
// ExperimentDraft
// ============================================================================

/// Experiment being filled in on the creation screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ExperimentForm")]
pub struct ExperimentDraft {
    #[serde(default, rename = "querySetId")]
    pub query_set_ref: Option<String>,
    /// Number of results retrieved per query
    #[serde(default = "default_size")]
    pub size: i64,
    #[serde(flatten)]
    pub kind: ExperimentKind,
}

fn default_size() -> i64 {
    DEFAULT_EXPERIMENT_SIZE
}

/// Posted experiment form; a missing `type` means a pairwise comparison
#[derive(Debug, Deserialize)]
struct ExperimentForm {
    #[serde(default, rename = "querySetId")]
    query_set_ref: Option<String>,
    #[serde(default = "default_size")]
    size: i64,
    #[serde(default, rename = "type")]
    experiment_type: Option<ExperimentType>,
    #[serde(flatten)]
    targets: EvaluationTargets,
}

impl From<ExperimentForm> for ExperimentDraft {
    fn from(form: ExperimentForm) -> Self {
        let kind = match form.experiment_type.unwrap_or(ExperimentType::PairwiseComparison) {
            ExperimentType::PairwiseComparison => ExperimentKind::PairwiseComparison {
                search_configuration_refs: form.targets.search_configuration_refs,
            },
            ExperimentType::PointwiseEvaluation => ExperimentKind::PointwiseEvaluation(form.targets),
            ExperimentType::HybridOptimizer => ExperimentKind::HybridOptimizer(form.targets),
        };
        Self {
            query_set_ref: form.query_set_ref,
            size: form.size,
            kind,
        }
    }
}

impl Default for ExperimentDraft {
    fn default() -> Self {
        Self::new(ExperimentType::PairwiseComparison)
    }
}

impl ExperimentDraft {
    pub fn new(experiment_type: ExperimentType) -> Self {
        Self {
            query_set_ref: None,
            size: DEFAULT_EXPERIMENT_SIZE,
            kind: ExperimentKind::blank(experiment_type),
        }
    }

    pub fn experiment_type(&self) -> ExperimentType {
        self.kind.experiment_type()
    }

    /// Switch experiment type. The query set and size are shared by every type
    /// and survive; search configuration and judgment selections are reset.
    pub fn with_type(mut self, experiment_type: ExperimentType) -> Self {
        if self.kind.experiment_type() != experiment_type {
            self.kind = ExperimentKind::blank(experiment_type);
        }
        self
    }

    /// Apply a single form change
    pub fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), DomainError> {
        match field {
            fields::TYPE => {
                let experiment_type = value.into_text(field)?.parse::<ExperimentType>()?;
                *self = std::mem::take(self).with_type(experiment_type);
            }
            fields::QUERY_SET_ID => self.query_set_ref = value.into_optional_text(field)?,
            fields::SIZE => self.size = value.into_number(field)?.unwrap_or(0),
            fields::SEARCH_CONFIGURATION_LIST => {
                let refs = value.into_list(field)?;
                match &mut self.kind {
                    ExperimentKind::PairwiseComparison {
                        search_configuration_refs,
                    } => *search_configuration_refs = refs,
                    ExperimentKind::PointwiseEvaluation(targets)
                    | ExperimentKind::HybridOptimizer(targets) => {
                        targets.search_configuration_refs = refs
                    }
                }
            }
            fields::JUDGMENT_LIST => match &mut self.kind {
                ExperimentKind::PointwiseEvaluation(targets)
                | ExperimentKind::HybridOptimizer(targets) => {
                    targets.judgment_refs = value.into_list(field)?
                }
                ExperimentKind::PairwiseComparison { .. } => {
                    return Err(unknown_field("pairwise comparison experiment", field));
                }
            },
            _ => return Err(unknown_field("experiment", field)),
        }

        Ok(())
    }
}
