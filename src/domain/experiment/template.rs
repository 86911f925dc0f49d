//! Experiment template registry shown on the workbench landing page

use serde::Serialize;

use super::entity::ExperimentType;
use crate::domain::draft::Navigation;

/// Identifier of a creatable experiment template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TemplateId {
    SingleQueryComparison,
    QuerySetComparison,
    SearchEvaluation,
    HybridOptimizer,
}

/// Static description of one experiment template card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentTemplate {
    pub id: TemplateId,
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
    pub icon: &'static str,
    /// Persisted experiment type created from this template; single query
    /// comparisons run ad hoc and create nothing
    pub experiment_type: Option<ExperimentType>,
}

static TEMPLATES: [ExperimentTemplate; 4] = [
    ExperimentTemplate {
        id: TemplateId::SingleQueryComparison,
        title: "Single Query Comparison",
        description: "Test two search configurations with a single query.",
        route: "/experiment/create/singleQueryComparison",
        icon: "beaker",
        experiment_type: None,
    },
    ExperimentTemplate {
        id: TemplateId::QuerySetComparison,
        title: "Query Set Comparison",
        description: "Perform a comparison across an entire set of queries.",
        route: "/experiment/create/querySetComparison",
        icon: "beaker",
        experiment_type: Some(ExperimentType::PairwiseComparison),
    },
    ExperimentTemplate {
        id: TemplateId::SearchEvaluation,
        title: "Search Evaluation",
        description: "Calculate search quality metrics for a search configuration against judgments.",
        route: "/experiment/create/searchEvaluation",
        icon: "beaker",
        experiment_type: Some(ExperimentType::PointwiseEvaluation),
    },
    ExperimentTemplate {
        id: TemplateId::HybridOptimizer,
        title: "Hybrid Search Optimizer",
        description: "Find the best balance between neural and lexical hybrid search.",
        route: "/experiment/create/hybridOptimizer",
        icon: "beaker",
        experiment_type: Some(ExperimentType::HybridOptimizer),
    },
];

/// All templates in display order
pub fn templates() -> &'static [ExperimentTemplate] {
    &TEMPLATES
}

/// Look a template up by route. A leading `#` and trailing `/` are ignored.
pub fn find_template(route: &str) -> Option<&'static ExperimentTemplate> {
    let route = route.trim().trim_start_matches('#').trim_end_matches('/');
    TEMPLATES.iter().find(|template| template.route == route)
}

/// Navigation triggered by clicking a template card
pub fn select_template(route: &str) -> Option<Navigation> {
    find_template(route).map(|template| Navigation::to(template.route))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_templates_in_order() {
        let titles: Vec<_> = templates().iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            vec![
                "Single Query Comparison",
                "Query Set Comparison",
                "Search Evaluation",
                "Hybrid Search Optimizer",
            ]
        );
        assert!(templates().iter().all(|t| t.icon == "beaker"));
    }

    #[test]
    fn test_descriptions() {
        let descriptions: Vec<_> = templates().iter().map(|t| t.description).collect();
        assert!(descriptions[0].contains("Test two search configurations with a single query"));
        assert!(descriptions[1].contains("Perform a comparison across an entire set of queries"));
        assert!(descriptions[2].contains("Calculate search quality metrics"));
        assert!(descriptions[3].contains("Find the best balance between neural and lexical hybrid search"));
    }

    #[test]
    fn test_select_template_navigates() {
        let navigation = select_template("/experiment/create/hybridOptimizer").unwrap();
        assert_eq!(navigation.route, "/experiment/create/hybridOptimizer");

        let navigation = select_template("#/experiment/create/querySetComparison/").unwrap();
        assert_eq!(navigation.route, "/experiment/create/querySetComparison");
    }

    #[test]
    fn test_unknown_route() {
        assert!(select_template("/experiment/create/unknown").is_none());
    }

    #[test]
    fn test_template_experiment_types() {
        let template = find_template("/experiment/create/searchEvaluation").unwrap();
        assert_eq!(template.id, TemplateId::SearchEvaluation);
        assert_eq!(template.experiment_type, Some(ExperimentType::PointwiseEvaluation));
        assert_eq!(
            find_template("/experiment/create/singleQueryComparison").unwrap().experiment_type,
            None
        );
    }
}
