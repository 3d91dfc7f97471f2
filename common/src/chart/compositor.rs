//! Layers: alternate chart types over one widget's rows.
//!
//! Layer 0 is always the widget's own type and config. Stored layers
//! follow, each merging its partial config over the widget's. Rows are
//! resolved once when the [`ComposedWidget`] is built and every layer
//! renders from that same row-set.

use crate::chart::dispatcher::{dispatch, Decorations};
use crate::chart::palette::RenderOptions;
use crate::chart::render::ChartRender;
use crate::chart::resolver::{resolve, Resolution};
use crate::model::datasource::DataSource;
use crate::model::widget::Widget;
use crate::model::widget_config::{ChartType, WidgetConfig};
use crate::model::Row;
use log::debug;
use serde::{Deserialize, Serialize};

/// Selector entry shown for a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDescriptor {
    pub index: usize,
    pub label: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
}

/// The rendered active layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRender {
    /// Index actually rendered after clamping.
    pub index: usize,
    pub label: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub render: ChartRender,
}

/// A widget with its rows resolved, ready to render any of its layers.
#[derive(Debug, Clone)]
pub struct ComposedWidget<'w> {
    widget: &'w Widget,
    resolution: Resolution,
    layers: Vec<LayerDescriptor>,
}

impl<'w> ComposedWidget<'w> {
    /// Resolves the widget's rows against `sources`. This is the only
    /// place rows are resolved; switching layers reuses them.
    pub fn new(widget: &'w Widget, sources: &[DataSource]) -> Self {
        let resolution = resolve(&widget.config, widget.data_source_id.as_deref(), sources);
        Self::with_resolution(widget, resolution)
    }

    /// Builds from rows resolved elsewhere (e.g. a cache).
    pub fn with_resolution(widget: &'w Widget, resolution: Resolution) -> Self {
        Self {
            widget,
            resolution,
            layers: layer_descriptors(widget),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.resolution.rows
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    /// Maps a possibly stale index back onto a layer that exists.
    pub fn clamp_index(&self, index: usize) -> usize {
        clamp_layer_index(index, self.layers.len())
    }

    /// Config the given layer renders with.
    pub fn effective_config(&self, index: usize) -> WidgetConfig {
        let index = self.clamp_index(index);
        let base = &self.widget.config;
        if index == 0 {
            return base.clone();
        }
        match self
            .widget
            .layers
            .as_ref()
            .and_then(|layers| layers.get(index - 1))
            .and_then(|layer| layer.config.as_ref())
        {
            Some(overlay) => base.merged_with(overlay),
            None => base.clone(),
        }
    }

    /// Renders layer `index`; an index past the last layer renders layer 0.
    pub fn render(&self, index: usize, options: &RenderOptions) -> LayerRender {
        let clamped = self.clamp_index(index);
        if clamped != index {
            debug!(
                "widget {}: layer {} out of range, showing {}",
                self.widget.id, index, clamped
            );
        }
        let descriptor = &self.layers[clamped];
        let config = self.effective_config(clamped);
        let decorations = Decorations {
            reference_lines: self.widget.reference_lines.as_deref().unwrap_or(&[]),
            annotations: self.widget.annotations.as_deref().unwrap_or(&[]),
        };
        LayerRender {
            index: clamped,
            label: descriptor.label.clone(),
            chart_type: descriptor.chart_type.clone(),
            render: dispatch(
                self.rows(),
                &descriptor.chart_type,
                &config,
                decorations,
                options,
            ),
        }
    }

    /// Renders the widget's stored active layer.
    pub fn render_active(&self, options: &RenderOptions) -> LayerRender {
        self.render(self.widget.active_layer, options)
    }
}

/// Layer 0 from the widget itself, then its stored layers.
pub fn layer_descriptors(widget: &Widget) -> Vec<LayerDescriptor> {
    let mut layers = vec![LayerDescriptor {
        index: 0,
        label: widget.chart_type.display_name(),
        chart_type: widget.chart_type.clone(),
    }];
    for (offset, layer) in widget.layers.iter().flatten().enumerate() {
        layers.push(LayerDescriptor {
            index: offset + 1,
            label: layer
                .label
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| layer.chart_type.display_name()),
            chart_type: layer.chart_type.clone(),
        });
    }
    layers
}

/// `index` when it names one of `count` layers, otherwise the base layer.
pub fn clamp_layer_index(index: usize, count: usize) -> usize {
    if index < count {
        index
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::widget::{WidgetLayer, WidgetPosition};
    use serde_json::json;

    fn widget(layers: Option<Vec<WidgetLayer>>, active_layer: usize) -> Widget {
        Widget {
            id: "w1".into(),
            dashboard_id: "d1".into(),
            data_source_id: None,
            chart_type: ChartType::Bar,
            title: "Sales".into(),
            config: serde_json::from_value(json!({
                "xAxis": "month",
                "yAxis": "sales",
                "data": [
                    {"month": "Jan", "sales": 100, "profit": 10},
                    {"month": "Feb", "sales": 150, "profit": 30}
                ]
            }))
            .unwrap(),
            position: WidgetPosition::default(),
            layers,
            active_layer,
            reference_lines: None,
            annotations: None,
            ai_insights: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn line_layer() -> WidgetLayer {
        WidgetLayer {
            chart_type: ChartType::Line,
            label: None,
            config: Some(serde_json::from_value(json!({"yAxis": "profit"})).unwrap()),
        }
    }

    #[test]
    fn layer_zero_comes_from_the_widget() {
        let w = widget(None, 0);
        let composed = ComposedWidget::new(&w, &[]);
        assert_eq!(composed.layers().len(), 1);
        assert_eq!(composed.layers()[0].label, "Bar");
        assert_eq!(composed.effective_config(0), w.config);
    }

    #[test]
    fn stale_active_index_falls_back_to_the_base_layer() {
        let w = widget(Some(vec![line_layer()]), 5);
        let composed = ComposedWidget::new(&w, &[]);
        let rendered = composed.render_active(&RenderOptions::default());
        assert_eq!(rendered.index, 0);
        assert_eq!(rendered.chart_type, ChartType::Bar);
        assert_eq!(composed.clamp_index(1), 1);
        assert_eq!(composed.clamp_index(2), 0);

        let only_base = widget(None, 5);
        let composed = ComposedWidget::new(&only_base, &[]);
        assert_eq!(composed.render_active(&RenderOptions::default()).index, 0);
    }

    #[test]
    fn layers_merge_their_override_and_share_rows() {
        let w = widget(Some(vec![line_layer()]), 0);
        let composed = ComposedWidget::new(&w, &[]);

        let base = composed.render(0, &RenderOptions::default());
        let overlay = composed.render(1, &RenderOptions::default());
        let (ChartRender::Cartesian(bar), ChartRender::Cartesian(line)) =
            (base.render, overlay.render)
        else {
            panic!("expected x/y charts");
        };
        assert_eq!(bar.y_key, "sales");
        assert_eq!(line.y_key, "profit");
        assert_eq!(line.x_key, "month");
        assert_eq!(bar.points.len(), line.points.len());
        assert_eq!(overlay.label, "Line");
    }

    #[test]
    fn clamp_handles_empty_counts() {
        assert_eq!(clamp_layer_index(3, 0), 0);
        assert_eq!(clamp_layer_index(3, 2), 0);
        assert_eq!(clamp_layer_index(1, 2), 1);
        assert_eq!(clamp_layer_index(0, 2), 0);
    }
}
