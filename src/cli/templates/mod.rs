//! Templates command - prints the experiment template cards

use crate::domain::{templates, ExperimentTemplate};

pub fn run() -> anyhow::Result<()> {
    print!("{}", render(templates()));
    Ok(())
}

fn render(templates: &[ExperimentTemplate]) -> String {
    templates
        .iter()
        .map(|template| {
            let experiment_type = template
                .experiment_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "ad hoc".to_string());
            format!(
                "{}\n  {}\n  route: {}  type: {}\n",
                template.title, template.description, template.route, experiment_type
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_template() {
        let output = render(templates());
        assert!(output.starts_with("Single Query Comparison\n"));
        assert!(output.contains("route: /experiment/create/querySetComparison  type: PAIRWISE_COMPARISON"));
        assert!(output.contains("type: ad hoc"));
        assert_eq!(output.matches("route:").count(), 4);
    }
}
