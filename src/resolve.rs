use crate::data::{Row, Table};
use crate::ir::{ChartKind, Degradation, Resolution, ResolvedChartSpec, VisualizationDescriptor};
use crate::transform::build_body;
use crate::ResolveOptions;
use tracing::{debug, warn};

/// Resolve a (possibly partial) descriptor against tabular data.
///
/// Total over its inputs: malformed descriptors degrade to a table, and
/// missing rows or columns yield [`Resolution::Empty`].
pub fn resolve_chart(
    rows: &[Row],
    columns: &[String],
    descriptor: Option<&VisualizationDescriptor>,
    options: &ResolveOptions,
) -> Resolution {
    // 1. Nothing to draw
    if rows.is_empty() || columns.is_empty() {
        debug!(rows = rows.len(), columns = columns.len(), "no data, resolving to empty");
        return Resolution::Empty;
    }

    let fallback = VisualizationDescriptor::default();
    let descriptor = descriptor.unwrap_or(&fallback);

    // 2. Chart kind
    let (requested, mut degraded) = resolve_kind(descriptor.chart_kind.as_deref());

    // 3. Axes
    let x_axis = resolve_x_axis(descriptor.x_axis.as_deref(), columns);
    let y_axis = resolve_y_axis(descriptor.y_axis.as_deref(), &x_axis, columns);

    // 4. A chart with nothing to plot against x can only be shown as a table
    let plottable = y_axis.iter().any(|y| *y != x_axis);
    let kind = if !plottable && requested != ChartKind::Table {
        warn!(requested = %requested, "no plottable y-axis column, falling back to table");
        degraded = Some(Degradation::Unplottable { requested });
        ChartKind::Table
    } else {
        requested
    };

    debug!(kind = %kind, x = %x_axis, y = ?y_axis, "resolved chart spec");

    // 5. Kind-specific payload
    let body = build_body(kind, &x_axis, &y_axis, rows, options);

    Resolution::Chart {
        spec: ResolvedChartSpec {
            kind,
            x_axis,
            y_axis,
            title: descriptor.title.clone(),
            description: descriptor.description.clone(),
            columns: columns.to_vec(),
            rows: rows.to_vec(),
            body,
        },
        degraded,
    }
}

/// Convenience wrapper over [`resolve_chart`] for a loaded [`Table`]
pub fn resolve_table(
    table: &Table,
    descriptor: Option<&VisualizationDescriptor>,
    options: &ResolveOptions,
) -> Resolution {
    resolve_chart(&table.rows, &table.columns, descriptor, options)
}

fn resolve_kind(name: Option<&str>) -> (ChartKind, Option<Degradation>) {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => (ChartKind::Table, None),
        Some(name) => match ChartKind::parse(name) {
            Some(kind) => (kind, None),
            None => {
                warn!(requested = name, "unsupported chart kind, falling back to table");
                (
                    ChartKind::Table,
                    Some(Degradation::UnknownKind {
                        requested: name.to_string(),
                    }),
                )
            }
        },
    }
}

/// Requested x column if it exists, otherwise the first column.
/// Callers guarantee `columns` is non-empty.
fn resolve_x_axis(requested: Option<&str>, columns: &[String]) -> String {
    match requested {
        Some(x) if columns.iter().any(|c| c == x) => x.to_string(),
        Some(x) => {
            debug!(x, "x-axis column not in data, using first column");
            columns[0].clone()
        }
        None => columns[0].clone(),
    }
}

/// Requested y columns that exist (first occurrence wins), or every column
/// except the x-axis when none survive.
fn resolve_y_axis(requested: Option<&[String]>, x_axis: &str, columns: &[String]) -> Vec<String> {
    let mut y_axis: Vec<String> = Vec::new();
    for col in requested.unwrap_or_default() {
        if columns.contains(col) && !y_axis.contains(col) {
            y_axis.push(col.clone());
        } else if !columns.contains(col) {
            debug!(column = %col, "dropping y-axis column not in data");
        }
    }

    if y_axis.is_empty() {
        y_axis = columns.iter().filter(|c| *c != x_axis).cloned().collect();
    }
    y_axis
}
