// Runtime executor: load data, resolve, optionally run one edit session, re-resolve

use crate::data::Table;
use crate::editor::{EditSession, FieldEdit};
use crate::ir::{Resolution, VisualizationDescriptor};
use crate::resolve::resolve_table;
use crate::ResolveOptions;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputFormat {
    #[default]
    Csv,
    Json,
}

/// How an edit session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditOutcome {
    #[default]
    Commit,
    Cancel,
}

#[derive(Debug, Clone, Default)]
pub struct Request {
    pub input_format: InputFormat,
    pub descriptor: Option<VisualizationDescriptor>,
    /// When present an edit session is opened on the first resolution
    pub edits: Option<Vec<FieldEdit>>,
    pub edit_outcome: EditOutcome,
    pub options: ResolveOptions,
}

/// The caller's stored descriptor after the run, plus what to render
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<VisualizationDescriptor>,
    pub resolution: Resolution,
}

pub fn load_table(format: InputFormat, input: &str) -> Result<Table> {
    match format {
        InputFormat::Csv => Table::from_csv(input.as_bytes()).context("Failed to parse CSV input"),
        InputFormat::Json => Table::from_json_str(input).context("Failed to parse JSON input"),
    }
}

pub fn load_options(path: &Path) -> Result<ResolveOptions> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config file '{}'", path.display()))
}

pub fn load_descriptor(path: &Path) -> Result<VisualizationDescriptor> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid descriptor file '{}'", path.display()))
}

/// Execute a request against raw tabular input
pub fn run(request: &Request, input: &str) -> Result<Outcome> {
    let table = load_table(request.input_format, input)?;
    info!(rows = table.rows.len(), columns = table.columns.len(), "loaded table");

    Ok(run_on_table(request, &table))
}

/// Execute a request against an already-loaded table. Never fails.
pub fn run_on_table(request: &Request, table: &Table) -> Outcome {
    let mut stored = request.descriptor.clone();
    let resolution = resolve_table(table, stored.as_ref(), &request.options);

    let Some(edits) = &request.edits else {
        return Outcome {
            descriptor: stored,
            resolution,
        };
    };

    // Scope the session to what is on screen: the concrete spec if there is one
    let session = match resolution.spec() {
        Some(spec) => EditSession::open_resolved(spec),
        None => EditSession::open(&stored.clone().unwrap_or_default()),
    };
    let session = session.apply(edits.iter().cloned());

    match request.edit_outcome {
        EditOutcome::Commit => {
            let committed = session.commit();
            debug!(?committed, "re-resolving committed descriptor");
            let resolution = resolve_table(table, Some(&committed), &request.options);
            stored = Some(committed);
            Outcome {
                descriptor: stored,
                resolution,
            }
        }
        EditOutcome::Cancel => {
            session.cancel();
            Outcome {
                descriptor: stored,
                resolution,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ChartBody, ChartKind};

    const SALES: &str = "region,sales,cost\nwest,100,40\neast,80,30\n";

    #[test]
    fn test_run_without_edits() {
        let outcome = run(&Request::default(), SALES).unwrap();
        assert_eq!(outcome.descriptor, None);
        let spec = outcome.resolution.spec().unwrap();
        assert_eq!(spec.kind, ChartKind::Table);
        assert_eq!(spec.y_axis, vec!["sales", "cost"]);
    }

    #[test]
    fn test_commit_replaces_descriptor() {
        let request = Request {
            edits: Some(vec![
                FieldEdit::kind(ChartKind::Pie),
                FieldEdit::ToggleYAxis("sales".into()),
            ]),
            ..Default::default()
        };
        let outcome = run(&request, SALES).unwrap();
        let stored = outcome.descriptor.unwrap();
        assert_eq!(stored.chart_kind.as_deref(), Some("pie"));
        assert_eq!(stored.y_axis, Some(vec!["cost".to_string()]));

        let spec = outcome.resolution.spec().unwrap();
        match &spec.body {
            ChartBody::Pie { slices } => assert_eq!(slices[0].numeric, 40.0),
            other => panic!("expected pie body, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_keeps_descriptor() {
        let original = VisualizationDescriptor {
            chart_kind: Some("bar".to_string()),
            ..Default::default()
        };
        let request = Request {
            descriptor: Some(original.clone()),
            edits: Some(vec![FieldEdit::kind(ChartKind::Pie)]),
            edit_outcome: EditOutcome::Cancel,
            ..Default::default()
        };
        let outcome = run(&request, SALES).unwrap();
        assert_eq!(outcome.descriptor, Some(original));
        assert_eq!(outcome.resolution.spec().unwrap().kind, ChartKind::Bar);
    }

    #[test]
    fn test_empty_input_resolves_empty() {
        let outcome = run(&Request::default(), "region,sales\n").unwrap();
        assert!(outcome.resolution.is_empty());

        let request = Request {
            input_format: InputFormat::Json,
            ..Default::default()
        };
        assert!(run(&request, "[]").unwrap().resolution.is_empty());
    }

    #[test]
    fn test_edit_on_empty_data_still_commits() {
        let request = Request {
            edits: Some(vec![FieldEdit::Title(Some("Nothing yet".into()))]),
            ..Default::default()
        };
        let outcome = run(&request, "a,b\n").unwrap();
        assert!(outcome.resolution.is_empty());
        assert_eq!(
            outcome.descriptor.and_then(|d| d.title).as_deref(),
            Some("Nothing yet")
        );
    }

    #[test]
    fn test_bad_json_input() {
        let request = Request {
            input_format: InputFormat::Json,
            ..Default::default()
        };
        assert!(run(&request, "{not json").is_err());
    }
}
