//! Preview command - parses an NDJSON query upload

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use crate::domain::{parse_queries, BulkParseError, QueryPreview};

/// Arguments for the preview command
#[derive(Args, Clone)]
pub struct PreviewArgs {
    /// NDJSON file with one `{"queryText", "referenceAnswer"}` object per line
    pub file: PathBuf,

    /// Number of queries to show (defaults to `workbench.preview_limit`)
    #[arg(long)]
    pub limit: Option<usize>,
}

pub async fn run(args: PreviewArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    match parse_queries(&content) {
        Ok(queries) => {
            let limit = args.limit.unwrap_or(config.workbench.preview_limit);
            print!("{}", render_preview(&QueryPreview::new(&queries, limit)));
            Ok(())
        }
        Err(error) => {
            eprint!("{}", render_errors(&error));
            bail!(error)
        }
    }
}

fn render_preview(preview: &QueryPreview) -> String {
    let mut output = String::new();
    for (index, record) in preview.records.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {}  =>  {}\n",
            index + 1,
            record.query_text,
            record.reference_answer
        ));
    }
    if preview.is_truncated() {
        output.push_str(&format!(
            "... {} more\n",
            preview.total - preview.records.len()
        ));
    }
    output.push_str(&format!("{} queries\n", preview.total));
    output
}

fn render_errors(error: &BulkParseError) -> String {
    error
        .errors
        .iter()
        .map(|line| format!("{}\n", line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QueryRecord;

    #[test]
    fn test_render_truncated_preview() {
        let queries = vec![
            QueryRecord::new("red shoes", "sneakers"),
            QueryRecord::new("laptop bag", ""),
            QueryRecord::new("desk lamp", ""),
        ];

        let output = render_preview(&QueryPreview::new(&queries, 2));
        assert!(output.contains("   1  red shoes  =>  sneakers\n"));
        assert!(output.contains("... 1 more\n"));
        assert!(output.ends_with("3 queries\n"));
        assert!(!output.contains("desk lamp"));
    }

    #[test]
    fn test_render_every_line_error() {
        let error = parse_queries("nope\n\n[1]\n").unwrap_err();
        let output = render_errors(&error);

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Line 1:"));
        assert!(lines[1].starts_with("Line 3:"));
    }
}
