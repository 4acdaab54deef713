use crate::data::{Row, Scalar};
use crate::palette::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Input: Visualization Descriptor
// =============================================================================

/// Chart intent as supplied by a user or an upstream suggestion, before defaulting.
///
/// `chart_kind` stays a free string: unknown kinds must survive storage and
/// editing and only degrade to a table at resolve time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Supported chart kinds. `Table` is the universal fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Table,
    Histogram,
    Scatter,
    Kpi,
}

impl ChartKind {
    /// Parse a descriptor kind name. Returns None for anything unsupported.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "line" => Some(ChartKind::Line),
            "bar" => Some(ChartKind::Bar),
            "pie" => Some(ChartKind::Pie),
            "table" => Some(ChartKind::Table),
            "histogram" => Some(ChartKind::Histogram),
            "scatter" => Some(ChartKind::Scatter),
            "kpi" | "metric_card" => Some(ChartKind::Kpi),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Table => "table",
            ChartKind::Histogram => "histogram",
            ChartKind::Scatter => "scatter",
            ChartKind::Kpi => "kpi",
        }
    }

    /// Kinds that plot one series per y-axis column
    pub fn is_series(&self) -> bool {
        matches!(
            self,
            ChartKind::Line | ChartKind::Bar | ChartKind::Histogram | ChartKind::Scatter
        )
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Output: Resolved Chart Spec
// =============================================================================

/// A descriptor with every field concrete, bound to the data it was resolved against.
///
/// Every column named by `x_axis` or `y_axis` is a member of `columns`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChartSpec {
    pub kind: ChartKind,
    pub x_axis: String,
    pub y_axis: Vec<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub body: ChartBody,
}

impl ResolvedChartSpec {
    /// Project back to a fully concrete descriptor.
    /// Resolving this descriptor against the same data yields this spec again.
    pub fn descriptor(&self) -> VisualizationDescriptor {
        VisualizationDescriptor {
            chart_kind: Some(self.kind.as_str().to_string()),
            x_axis: Some(self.x_axis.clone()),
            y_axis: Some(self.y_axis.clone()),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Kind-specific renderable payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartBody {
    Series { series: Vec<Series> },
    Pie { slices: Vec<PieSlice> },
    Kpi(KpiValue),
    Table(TableView),
}

/// One plotted y-axis column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub column: String,
    pub color: Color,
}

/// One pie row: `{ name: row[x], value: row[y0] }`.
///
/// `value` is the literal cell for label-style renderers; `numeric` is the
/// coerced number (0 on failure) for renderers that sum or scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: Scalar,
    pub value: Scalar,
    pub numeric: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiValue {
    pub label: String,
    pub value: Scalar,
}

/// A display-capped slice of the rows plus the true row count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub rows: Vec<Row>,
    pub total: usize,
    pub truncated: bool,
}

// =============================================================================
// Resolution Result
// =============================================================================

/// Why a requested chart was drawn as something simpler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Degradation {
    /// The requested kind name is not supported
    UnknownKind { requested: String },
    /// The data has no column left to plot against the x-axis
    Unplottable { requested: ChartKind },
}

/// Outcome of resolving a descriptor. Never an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// No rows (or no columns): render a no-data placeholder
    Empty,
    Chart {
        spec: ResolvedChartSpec,
        #[serde(skip_serializing_if = "Option::is_none")]
        degraded: Option<Degradation>,
    },
}

impl Resolution {
    pub fn spec(&self) -> Option<&ResolvedChartSpec> {
        match self {
            Resolution::Chart { spec, .. } => Some(spec),
            Resolution::Empty => None,
        }
    }

    pub fn into_spec(self) -> Option<ResolvedChartSpec> {
        match self {
            Resolution::Chart { spec, .. } => Some(spec),
            Resolution::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Resolution::Empty)
    }

    pub fn degraded(&self) -> Option<&Degradation> {
        match self {
            Resolution::Chart { degraded, .. } => degraded.as_ref(),
            Resolution::Empty => None,
        }
    }
}
