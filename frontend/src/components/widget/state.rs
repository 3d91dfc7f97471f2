//! Card state: the rows resolved once per widget/source pair and the layer
//! on screen. Switching layers only changes `active_layer`.

use super::props::WidgetCardProps;
use common::chart::{clamp_layer_index, resolve, ComposedWidget, Resolution};
use common::model::widget::Widget;

pub struct WidgetCard {
    pub resolution: Resolution,
    pub active_layer: usize,
}

impl WidgetCard {
    pub fn new(props: &WidgetCardProps) -> Self {
        Self {
            resolution: resolve_for(props),
            active_layer: stored_layer(&props.widget),
        }
    }

    /// Re-resolves after the widget or its source changed.
    pub fn refresh(&mut self, props: &WidgetCardProps) {
        self.resolution = resolve_for(props);
        self.active_layer = stored_layer(&props.widget);
    }

    pub fn composed<'w>(&self, props: &'w WidgetCardProps) -> ComposedWidget<'w> {
        ComposedWidget::with_resolution(&props.widget, self.resolution.clone())
    }
}

fn resolve_for(props: &WidgetCardProps) -> Resolution {
    let widget = &props.widget;
    resolve(&widget.config, widget.data_source_id.as_deref(), &props.sources)
}

/// The widget's stored layer, or the base layer when it no longer exists.
fn stored_layer(widget: &Widget) -> usize {
    let count = 1 + widget.layers.as_ref().map_or(0, Vec::len);
    clamp_layer_index(widget.active_layer, count)
}
