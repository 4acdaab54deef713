// Library exports for vizspec

pub mod data;
pub mod editor;
pub mod ir;
pub mod palette;
pub mod parser;
pub mod resolve;
pub mod runtime;
pub mod transform;

pub use data::{Row, Scalar, Table};
pub use editor::{EditSession, FieldEdit};
pub use ir::{ChartKind, Resolution, ResolvedChartSpec, VisualizationDescriptor};
pub use resolve::resolve_chart;

use serde::Deserialize;

/// Where a table is being shown; decides how many rows are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DisplayContext {
    /// Collapsed table inside a conversation message
    Inline,
    #[default]
    Plain,
    /// Dedicated results page
    FullPage,
}

impl DisplayContext {
    pub fn row_limit(&self) -> usize {
        match self {
            DisplayContext::Inline => 10,
            DisplayContext::Plain => 50,
            DisplayContext::FullPage => 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResolveOptions {
    #[serde(default)]
    pub display: DisplayContext,
    /// Overrides the display context's row limit
    #[serde(default)]
    pub max_rows: Option<usize>,
}

impl ResolveOptions {
    pub fn for_display(display: DisplayContext) -> Self {
        Self {
            display,
            max_rows: None,
        }
    }

    pub fn table_row_limit(&self) -> usize {
        self.max_rows.unwrap_or_else(|| self.display.row_limit())
    }
}
