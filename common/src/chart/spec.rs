//! Typed view of a widget's loosely typed config.
//!
//! The stored [`WidgetConfig`] is one flat bag of optional fields. Before
//! dispatch it is narrowed into a [`ChartSpec`] variant per chart family,
//! carrying only the fields that family reads, with defaults applied.
//! [`ChartSpec::validate`] is the strict form used when the API accepts a
//! config; [`ChartSpec::from_config`] is the lenient form used for
//! rendering, which never fails.

use crate::chart::value::{as_number, display};
use crate::model::widget_config::{Aggregation, ChartType, WidgetConfig};
use crate::model::Row;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_GAUGE_MIN: f64 = 0.0;
pub const DEFAULT_GAUGE_MAX: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("gauge range is empty: min {min} must be below max {max}")]
    GaugeRange { min: f64, max: f64 },
    #[error("gauge bound must be a finite number")]
    GaugeBoundNotFinite,
    #[error("colors must be non-empty strings (entry {0} is blank)")]
    BlankColor(usize),
    #[error("statValue must be a number or a string")]
    StatValueNotScalar,
    #[error("aggregation {0:?} requires a value column (yAxis)")]
    AggregationWithoutValue(Aggregation),
}

/// Fields shared by every keyed chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSpec {
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
    pub show_legend: bool,
    pub show_grid: bool,
}

impl BaseSpec {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            x_axis: config.x_axis.clone().filter(|k| !k.is_empty()),
            y_axis: config.y_axis.clone().filter(|k| !k.is_empty()),
            show_legend: config.show_legend.unwrap_or(true),
            show_grid: config.show_grid.unwrap_or(true),
        }
    }

    /// Axis keys for `rows`: configured names first, then the first and
    /// second keys of the first row. A missing second key leaves `y` empty,
    /// which reads as no value for every row.
    pub fn axis_keys(&self, rows: &[Row]) -> AxisKeys {
        let mut declared = rows.first().into_iter().flat_map(|row| row.keys());
        let first = declared.next().cloned();
        let second = declared.next().cloned();
        AxisKeys {
            x: self.x_axis.clone().or(first).unwrap_or_default(),
            y: self.y_axis.clone().or(second).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisKeys {
    pub x: String,
    pub y: String,
}

/// Optional grouping applied before series are built.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSpec {
    /// Group key; the x key when unset.
    pub group_by: Option<String>,
    pub aggregation: Aggregation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartesianMark {
    Bar,
    Line,
    Area,
    Scatter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Cartesian {
        mark: CartesianMark,
        base: BaseSpec,
        group: Option<GroupSpec>,
    },
    Slices {
        donut: bool,
        base: BaseSpec,
        group: Option<GroupSpec>,
    },
    Gauge {
        base: BaseSpec,
        value: Option<f64>,
        min: f64,
        max: f64,
    },
    Funnel {
        base: BaseSpec,
        group: Option<GroupSpec>,
    },
    Radar {
        base: BaseSpec,
        group: Option<GroupSpec>,
    },
    Stat {
        value: Option<String>,
        label: Option<String>,
    },
    Table,
    Unsupported(String),
}

impl ChartSpec {
    /// Lenient narrowing used for rendering. Never fails; nonsensical gauge
    /// bounds fall back to the 0..100 default range.
    pub fn from_config(chart_type: &ChartType, config: &WidgetConfig) -> ChartSpec {
        let base = BaseSpec::from_config(config);
        let group = config.aggregation.map(|aggregation| GroupSpec {
            group_by: config.group_by.clone().filter(|k| !k.is_empty()),
            aggregation,
        });
        match chart_type {
            ChartType::Bar => cartesian(CartesianMark::Bar, base, group),
            ChartType::Line => cartesian(CartesianMark::Line, base, group),
            ChartType::Area => cartesian(CartesianMark::Area, base, group),
            ChartType::Scatter => cartesian(CartesianMark::Scatter, base, group),
            ChartType::Pie | ChartType::Donut => ChartSpec::Slices {
                donut: *chart_type == ChartType::Donut,
                base,
                group,
            },
            ChartType::Gauge => {
                let (min, max) = gauge_bounds(config);
                ChartSpec::Gauge {
                    base,
                    value: config.stat_value.as_ref().and_then(as_number),
                    min,
                    max,
                }
            }
            ChartType::Funnel => ChartSpec::Funnel { base, group },
            ChartType::Radar => ChartSpec::Radar { base, group },
            ChartType::Stat => ChartSpec::Stat {
                value: config
                    .stat_value
                    .as_ref()
                    .filter(|v| !v.is_null())
                    .map(display),
                label: config.stat_label.clone(),
            },
            ChartType::Table => ChartSpec::Table,
            ChartType::Other(tag) => ChartSpec::Unsupported(tag.clone()),
        }
    }

    /// Strict narrowing for configs arriving at the API.
    pub fn validate(chart_type: &ChartType, config: &WidgetConfig) -> Result<ChartSpec, ConfigError> {
        if let Some(colors) = &config.colors {
            if let Some(blank) = colors.iter().position(|c| c.trim().is_empty()) {
                return Err(ConfigError::BlankColor(blank));
            }
        }
        if let Some(value) = &config.stat_value {
            if !matches!(value, Value::Number(_) | Value::String(_) | Value::Null) {
                return Err(ConfigError::StatValueNotScalar);
            }
        }
        if *chart_type == ChartType::Gauge {
            let min = config.gauge_min().unwrap_or(DEFAULT_GAUGE_MIN);
            let max = config.gauge_max().unwrap_or(DEFAULT_GAUGE_MAX);
            if !min.is_finite() || !max.is_finite() {
                return Err(ConfigError::GaugeBoundNotFinite);
            }
            if min >= max {
                return Err(ConfigError::GaugeRange { min, max });
            }
        }
        if let Some(aggregation) = config.aggregation {
            let needs_value = aggregation != Aggregation::Count;
            let keyed = matches!(
                chart_type,
                ChartType::Bar
                    | ChartType::Line
                    | ChartType::Area
                    | ChartType::Scatter
                    | ChartType::Pie
                    | ChartType::Donut
                    | ChartType::Funnel
                    | ChartType::Radar
            );
            if needs_value && keyed && config.y_axis.as_deref().unwrap_or("").is_empty() {
                return Err(ConfigError::AggregationWithoutValue(aggregation));
            }
        }
        Ok(ChartSpec::from_config(chart_type, config))
    }
}

fn cartesian(mark: CartesianMark, base: BaseSpec, group: Option<GroupSpec>) -> ChartSpec {
    ChartSpec::Cartesian { mark, base, group }
}

fn gauge_bounds(config: &WidgetConfig) -> (f64, f64) {
    let min = config.gauge_min().unwrap_or(DEFAULT_GAUGE_MIN);
    let max = config.gauge_max().unwrap_or(DEFAULT_GAUGE_MAX);
    if min.is_finite() && max.is_finite() && min < max {
        (min, max)
    } else {
        (DEFAULT_GAUGE_MIN, DEFAULT_GAUGE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> WidgetConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn axis_keys_fall_back_to_declared_key_order() {
        let rows: Vec<Row> =
            serde_json::from_value(json!([{"month": "Jan", "sales": 1, "cost": 2}])).unwrap();
        let base = BaseSpec::from_config(&WidgetConfig::default());
        assert_eq!(
            base.axis_keys(&rows),
            AxisKeys { x: "month".into(), y: "sales".into() }
        );

        let base = BaseSpec::from_config(&config(json!({"yAxis": "cost"})));
        assert_eq!(base.axis_keys(&rows).y, "cost");
    }

    #[test]
    fn single_column_rows_leave_y_empty() {
        let rows: Vec<Row> = serde_json::from_value(json!([{"only": 1}])).unwrap();
        let keys = BaseSpec::from_config(&WidgetConfig::default()).axis_keys(&rows);
        assert_eq!(keys.x, "only");
        assert_eq!(keys.y, "");
    }

    #[test]
    fn unknown_types_narrow_to_unsupported() {
        let spec = ChartSpec::from_config(&ChartType::from("sankey"), &WidgetConfig::default());
        assert_eq!(spec, ChartSpec::Unsupported("sankey".into()));
    }

    #[test]
    fn validation_rejects_inverted_gauge_ranges() {
        let bad = config(json!({"gaugeMin": 10, "gaugeMax": 10}));
        assert_eq!(
            ChartSpec::validate(&ChartType::Gauge, &bad),
            Err(ConfigError::GaugeRange { min: 10.0, max: 10.0 })
        );
        // Rendering stays lenient.
        match ChartSpec::from_config(&ChartType::Gauge, &bad) {
            ChartSpec::Gauge { min, max, .. } => assert_eq!((min, max), (0.0, 100.0)),
            other => panic!("unexpected spec {:?}", other),
        }
    }

    #[test]
    fn validation_rejects_blank_colors_and_structured_stat_values() {
        let blank = config(json!({"colors": ["#fff", ""]}));
        assert_eq!(
            ChartSpec::validate(&ChartType::Bar, &blank),
            Err(ConfigError::BlankColor(1))
        );
        let structured = config(json!({"statValue": {"n": 1}}));
        assert_eq!(
            ChartSpec::validate(&ChartType::Stat, &structured),
            Err(ConfigError::StatValueNotScalar)
        );
    }

    #[test]
    fn sum_without_value_column_is_rejected() {
        let cfg = config(json!({"aggregation": "sum"}));
        assert!(ChartSpec::validate(&ChartType::Bar, &cfg).is_err());
        let count = config(json!({"aggregation": "count"}));
        assert!(ChartSpec::validate(&ChartType::Bar, &count).is_ok());
    }
}
