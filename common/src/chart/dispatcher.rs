//! Chart type dispatch: rows + type + config to a render description.
//!
//! The empty check runs before anything type-specific, so every type (even
//! an unknown one) renders the same "No data available" placeholder for an
//! empty row-set.

use crate::chart::aggregate::{apply_filters, group_rows};
use crate::chart::palette::{Palette, RenderOptions, GAUGE_AMBER, GAUGE_GREEN, GAUGE_RED, GAUGE_TRACK};
use crate::chart::render::{
    CartesianKind, CartesianPoint, CartesianRender, ChartRender, FunnelRender, GaugeBand,
    GaugeRender, PieRender, RadarAxis, RadarRender, Slice, StatRender, TableRender,
    AREA_FILL_OPACITY,
};
use crate::chart::spec::{AxisKeys, BaseSpec, CartesianMark, ChartSpec, GroupSpec};
use crate::chart::value::{as_number, display};
use crate::model::widget::{Annotation, ReferenceLine};
use crate::model::widget_config::{ChartType, WidgetConfig};
use crate::model::Row;
use log::debug;

/// Rows shown by the table chart.
pub const TABLE_ROW_CAP: usize = 10;

/// Widget-level overlays drawn on top of x/y charts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decorations<'a> {
    pub reference_lines: &'a [ReferenceLine],
    pub annotations: &'a [Annotation],
}

/// Builds the render description for one chart.
pub fn dispatch(
    rows: &[Row],
    chart_type: &ChartType,
    config: &WidgetConfig,
    decorations: Decorations<'_>,
    options: &RenderOptions,
) -> ChartRender {
    if rows.is_empty() {
        return ChartRender::empty();
    }

    let rows = apply_filters(rows, config.filters.as_ref());
    if rows.is_empty() {
        return ChartRender::empty();
    }

    let palette = options.palette.for_config(config);
    let tooltip = options.tooltip;

    match ChartSpec::from_config(chart_type, config) {
        ChartSpec::Cartesian { mark, base, group } => {
            let (rows, keys) = keyed_rows(&rows, &base, group.as_ref());
            let points: Vec<CartesianPoint> = rows
                .iter()
                .map(|row| CartesianPoint {
                    category: row.get(&keys.x).map(display).unwrap_or_default(),
                    value: row.get(&keys.y).and_then(as_number),
                })
                .collect();
            let (y_min, y_max) = value_range(points.iter().filter_map(|p| p.value));
            let chart = match mark {
                CartesianMark::Bar => CartesianKind::Bar,
                CartesianMark::Line => CartesianKind::Line,
                CartesianMark::Area => CartesianKind::Area,
                CartesianMark::Scatter => CartesianKind::Scatter,
            };
            ChartRender::Cartesian(CartesianRender {
                chart,
                x_key: keys.x,
                y_key: keys.y,
                points,
                color: palette.color_at(0).to_string(),
                y_min,
                y_max,
                show_grid: base.show_grid,
                show_legend: base.show_legend,
                fill_opacity: (chart == CartesianKind::Area).then_some(AREA_FILL_OPACITY),
                reference_lines: decorations.reference_lines.to_vec(),
                annotations: decorations.annotations.to_vec(),
                tooltip,
            })
        }
        ChartSpec::Slices { donut, base, group } => {
            let (rows, keys) = keyed_rows(&rows, &base, group.as_ref());
            let (inner_radius, outer_radius, corner_radius) = if donut {
                (0.6, 0.8, 4.0)
            } else {
                (0.0, 0.8, 0.0)
            };
            ChartRender::Pie(PieRender {
                donut,
                slices: colored_items(&rows, &keys, &palette),
                name_key: keys.x,
                value_key: keys.y,
                inner_radius,
                outer_radius,
                corner_radius,
                show_legend: base.show_legend,
                tooltip,
            })
        }
        ChartSpec::Gauge {
            base,
            value,
            min,
            max,
        } => {
            let value = value.unwrap_or_else(|| {
                let keys = base.axis_keys(&rows);
                rows[0].get(&keys.y).and_then(as_number).unwrap_or(min)
            });
            ChartRender::Gauge(gauge(value, min, max))
        }
        ChartSpec::Funnel { base, group } => {
            let (rows, keys) = keyed_rows(&rows, &base, group.as_ref());
            ChartRender::Funnel(FunnelRender {
                stages: colored_items(&rows, &keys, &palette),
                name_key: keys.x,
                value_key: keys.y,
                tooltip,
            })
        }
        ChartSpec::Radar { base, group } => {
            let (rows, keys) = keyed_rows(&rows, &base, group.as_ref());
            let axes: Vec<RadarAxis> = rows
                .iter()
                .map(|row| RadarAxis {
                    label: row.get(&keys.x).map(display).unwrap_or_default(),
                    value: row.get(&keys.y).and_then(as_number).unwrap_or(0.0),
                })
                .collect();
            let max = axes.iter().map(|a| a.value).fold(0.0, f64::max);
            ChartRender::Radar(RadarRender {
                label_key: keys.x,
                value_key: keys.y,
                axes,
                max,
                color: palette.color_at(0).to_string(),
                show_legend: base.show_legend,
                tooltip,
            })
        }
        ChartSpec::Stat { value, label } => {
            let mut first_values = rows[0].values();
            let first = first_values.next().map(display);
            let second = first_values.next().map(display);
            let (value, label) = match (value, second) {
                (Some(value), _) => (value, label),
                (None, Some(second)) => (second, label.or(first)),
                (None, None) => (first.unwrap_or_default(), label),
            };
            ChartRender::Stat(StatRender {
                value,
                label,
                color: palette.color_at(0).to_string(),
            })
        }
        ChartSpec::Table => {
            let columns: Vec<String> = rows[0].keys().cloned().collect();
            let body = rows
                .iter()
                .take(TABLE_ROW_CAP)
                .map(|row| {
                    columns
                        .iter()
                        .map(|c| row.get(c).map(display).unwrap_or_default())
                        .collect()
                })
                .collect();
            ChartRender::Table(TableRender {
                columns,
                rows: body,
                total_rows: rows.len(),
            })
        }
        ChartSpec::Unsupported(tag) => {
            debug!("no renderer for chart type {:?}", tag);
            ChartRender::unsupported(&tag)
        }
    }
}

/// Percent of `value` within `min..max`, clamped, and its color band.
pub fn gauge(value: f64, min: f64, max: f64) -> GaugeRender {
    let span = max - min;
    let fraction = if span > 0.0 { (value - min) / span } else { 0.0 };
    let percent = fraction.clamp(0.0, 1.0) * 100.0;
    let band = if percent < 33.0 {
        GaugeBand::Red
    } else if percent < 66.0 {
        GaugeBand::Amber
    } else {
        GaugeBand::Green
    };
    let color = match band {
        GaugeBand::Red => GAUGE_RED,
        GaugeBand::Amber => GAUGE_AMBER,
        GaugeBand::Green => GAUGE_GREEN,
    };
    GaugeRender {
        value,
        min,
        max,
        percent,
        band,
        color: color.to_string(),
        track_color: GAUGE_TRACK.to_string(),
    }
}

fn keyed_rows(rows: &[Row], base: &BaseSpec, group: Option<&GroupSpec>) -> (Vec<Row>, AxisKeys) {
    let keys = base.axis_keys(rows);
    match group {
        Some(group) => group_rows(rows, &keys, group),
        None => (rows.to_vec(), keys),
    }
}

/// Items colored by position, cycling through the palette.
fn colored_items(rows: &[Row], keys: &AxisKeys, palette: &Palette) -> Vec<Slice> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| Slice {
            label: row.get(&keys.x).map(display).unwrap_or_default(),
            value: row.get(&keys.y).and_then(as_number).unwrap_or(0.0),
            color: palette.color_at(index).to_string(),
        })
        .collect()
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((0.0, 0.0), |(lo, hi), v| (f64::min(lo, v), f64::max(hi, v)))
}
