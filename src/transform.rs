use crate::data::{cell, Row};
use crate::ir::{ChartBody, ChartKind, KpiValue, PieSlice, Series, TableView};
use crate::palette::palette_color;
use crate::ResolveOptions;
use tracing::trace;

/// Build the renderable payload for an already-resolved kind and axis binding.
///
/// `y_axis` is empty only for tables; pie and kpi honor just its first entry.
pub fn build_body(
    kind: ChartKind,
    x_axis: &str,
    y_axis: &[String],
    rows: &[Row],
    options: &ResolveOptions,
) -> ChartBody {
    match (kind, y_axis.first()) {
        (ChartKind::Pie, Some(value_col)) => ChartBody::Pie {
            slices: pie_slices(x_axis, value_col, rows),
        },
        (ChartKind::Kpi, Some(value_col)) => ChartBody::Kpi(kpi_value(value_col, rows)),
        (kind, Some(_)) if kind.is_series() => ChartBody::Series {
            series: assign_series(y_axis),
        },
        _ => ChartBody::Table(table_view(rows, options.table_row_limit())),
    }
}

/// One series per y column, coloured by position
pub fn assign_series(y_axis: &[String]) -> Vec<Series> {
    y_axis
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let color = palette_color(i);
            trace!(%column, %color, "assigned series colour");
            Series {
                column: column.clone(),
                color,
            }
        })
        .collect()
}

/// `{ name: row[x], value: row[y] }` per row, in row order
pub fn pie_slices(x_axis: &str, value_col: &str, rows: &[Row]) -> Vec<PieSlice> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let value = cell(row, value_col);
            PieSlice {
                name: cell(row, x_axis),
                numeric: value.as_f64_or_zero(),
                value,
                color: palette_color(i),
            }
        })
        .collect()
}

/// First row wins; later rows are ignored
pub fn kpi_value(value_col: &str, rows: &[Row]) -> KpiValue {
    KpiValue {
        label: value_col.to_string(),
        value: rows.first().map(|r| cell(r, value_col)).unwrap_or_default(),
    }
}

pub fn table_view(rows: &[Row], limit: usize) -> TableView {
    let shown = rows.len().min(limit);
    TableView {
        rows: rows[..shown].to_vec(),
        total: rows.len(),
        truncated: shown < rows.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Scalar;
    use crate::DisplayContext;

    fn row(pairs: &[(&str, Scalar)]) -> Row {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn numbered_rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| row(&[("id", Scalar::Number(i as f64)), ("v", Scalar::Number(1.0))]))
            .collect()
    }

    #[test]
    fn test_table_truncation() {
        let rows = numbered_rows(120);
        let view = table_view(&rows, 50);
        assert_eq!(view.rows.len(), 50);
        assert_eq!(view.total, 120);
        assert!(view.truncated);
        assert_eq!(view.rows[49], rows[49]);
    }

    #[test]
    fn test_table_under_limit() {
        let rows = numbered_rows(3);
        let view = table_view(&rows, 10);
        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.total, 3);
        assert!(!view.truncated);
    }

    #[test]
    fn test_display_context_limits() {
        let rows = numbered_rows(120);
        for (ctx, expected) in [
            (DisplayContext::Inline, 10),
            (DisplayContext::Plain, 50),
            (DisplayContext::FullPage, 100),
        ] {
            let body = build_body(ChartKind::Table, "id", &[], &rows, &ResolveOptions::for_display(ctx));
            match body {
                ChartBody::Table(view) => {
                    assert_eq!(view.rows.len(), expected);
                    assert_eq!(view.total, 120);
                }
                other => panic!("expected table body, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_pie_non_numeric_values() {
        let rows = vec![
            row(&[("k", Scalar::Text("a".into())), ("v", Scalar::Text("12.5".into()))]),
            row(&[("k", Scalar::Text("b".into())), ("v", Scalar::Text("lots".into()))]),
            row(&[("k", Scalar::Text("c".into()))]),
        ];
        let slices = pie_slices("k", "v", &rows);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].numeric, 12.5);
        assert_eq!(slices[1].value, Scalar::Text("lots".into()));
        assert_eq!(slices[1].numeric, 0.0);
        assert_eq!(slices[2].value, Scalar::Null);
        assert_eq!(slices[2].numeric, 0.0);
        assert_eq!(slices[2].color, palette_color(2));
    }

    #[test]
    fn test_pie_uses_first_y_only() {
        let rows = vec![row(&[
            ("k", Scalar::Text("a".into())),
            ("v", Scalar::Number(3.0)),
            ("w", Scalar::Number(9.0)),
        ])];
        let y = vec!["v".to_string(), "w".to_string()];
        match build_body(ChartKind::Pie, "k", &y, &rows, &ResolveOptions::default()) {
            ChartBody::Pie { slices } => assert_eq!(slices[0].value, Scalar::Number(3.0)),
            other => panic!("expected pie body, got {:?}", other),
        }
    }

    #[test]
    fn test_kpi_first_row_wins() {
        let rows = vec![
            row(&[("total", Scalar::Number(42.0))]),
            row(&[("total", Scalar::Number(7.0))]),
        ];
        let kpi = kpi_value("total", &rows);
        assert_eq!(kpi.label, "total");
        assert_eq!(kpi.value, Scalar::Number(42.0));
    }

    #[test]
    fn test_kpi_missing_cell_is_null() {
        let rows = vec![row(&[("other", Scalar::Number(1.0))])];
        assert_eq!(kpi_value("total", &rows).value, Scalar::Null);
    }

    #[test]
    fn test_series_palette_wraps() {
        let y: Vec<String> = (0..10).map(|i| format!("c{}", i)).collect();
        let series = assign_series(&y);
        assert_eq!(series[8].color, palette_color(0));
        assert_eq!(series[9].color, series[1].color);
    }
}
