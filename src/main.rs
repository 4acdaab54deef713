use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vizspec::parser;
use vizspec::runtime::{self, EditOutcome, InputFormat, Request};
use vizspec::{DisplayContext, ResolveOptions};

#[derive(Parser, Debug)]
#[command(name = "vizspec")]
#[command(about = "Resolve chart descriptors against tabular data read from stdin", long_about = None)]
struct Args {
    /// Descriptor DSL (e.g., 'chart(kind: bar, x: region, y: [sales, cost])')
    #[arg(long, conflicts_with = "descriptor_json")]
    descriptor: Option<String>,

    /// Path to a JSON descriptor ({"chartKind": "pie", "yAxis": ["sales"]})
    #[arg(long)]
    descriptor_json: Option<PathBuf>,

    /// Edit script applied in a session on the resolved chart (e.g., 'kind(pie) | toggle_y(cost)')
    #[arg(long)]
    edit: Option<String>,

    /// Cancel the edit session instead of committing it
    #[arg(long, requires = "edit")]
    cancel: bool,

    /// Format of the data on stdin
    #[arg(long, value_enum, default_value_t = InputFormat::Csv)]
    input: InputFormat,

    /// Path to a JSON options file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the table is shown; sets the displayed row limit
    #[arg(long, value_enum)]
    display: Option<DisplayContext>,

    /// Explicit displayed row limit for tables
    #[arg(long)]
    max_rows: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Args {
    fn to_request(&self) -> Result<Request> {
        let mut options = match &self.config {
            Some(path) => runtime::load_options(path)?,
            None => ResolveOptions::default(),
        };
        if let Some(display) = self.display {
            options.display = display;
        }
        if self.max_rows.is_some() {
            options.max_rows = self.max_rows;
        }

        let descriptor = match (&self.descriptor, &self.descriptor_json) {
            (Some(dsl), _) => Some(parser::descriptor_from_str(dsl)?),
            (None, Some(path)) => Some(runtime::load_descriptor(path)?),
            (None, None) => None,
        };

        let edits = self
            .edit
            .as_deref()
            .map(parser::edit_script_from_str)
            .transpose()?;

        Ok(Request {
            input_format: self.input,
            descriptor,
            edits,
            edit_outcome: if self.cancel {
                EditOutcome::Cancel
            } else {
                EditOutcome::Commit
            },
            options,
        })
    }
}

fn main() -> Result<()> {
    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let request = args.to_request().context("Invalid arguments")?;

    // Read tabular data from stdin
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read data from stdin")?;

    let outcome = runtime::run(&request, &input).context("Failed to resolve chart")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome)
    } else {
        serde_json::to_string(&outcome)
    }
    .context("Failed to serialize result")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json).context("Failed to write result to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
