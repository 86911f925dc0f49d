//! Create command - submits a draft file through a creation session

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;
use tracing::info;

use crate::domain::{Draft, SubmissionOutcome, SubmitResponse, ValidationResult};
use crate::infrastructure::backend::BackendFactory;
use crate::infrastructure::services::CreationSession;

/// Arguments for the create command
#[derive(Args, Clone)]
pub struct CreateArgs {
    /// JSON draft tagged with its entity, e.g. `{"entity": "querySet", ...}`
    pub draft: PathBuf,
}

pub async fn run(args: CreateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let content = tokio::fs::read_to_string(&args.draft)
        .await
        .with_context(|| format!("Failed to read {}", args.draft.display()))?;
    let draft: Draft = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid draft", args.draft.display()))?;

    let backends = BackendFactory::create(&config.backend)?;
    let session = CreationSession::with_draft(backends.entities, draft)
        .with_preview_limit(config.workbench.preview_limit);

    match session.on_submit().await? {
        SubmitResponse::Invalid { errors } => {
            eprint!("{}", render_validation(&errors));
            bail!("Draft has {} invalid field(s)", errors.len())
        }
        SubmitResponse::Completed {
            outcome: SubmissionOutcome::Success { entity_id },
        } => {
            info!(entity_id = %entity_id, "Created");
            println!("{}", entity_id);
            Ok(())
        }
        SubmitResponse::Completed {
            outcome: SubmissionOutcome::Failure(failure),
        } => bail!("{}", failure),
        SubmitResponse::Ignored { reason } => bail!("Submission ignored: {:?}", reason),
    }
}

fn render_validation(errors: &ValidationResult) -> String {
    format!("{}\n", errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_validation_lists_fields() {
        let draft: Draft = serde_json::from_str(
            r#"{"entity": "experiment", "type": "POINTWISE_EVALUATION", "querySetId": "qs-1"}"#,
        )
        .unwrap();

        let output = render_validation(&draft.validate());
        assert!(output.contains("judgmentList: Please select at least one judgment."));
        assert!(output.contains("searchConfigurationList: Please select a search configuration."));
        assert!(!output.contains("querySetId"));
    }
}
