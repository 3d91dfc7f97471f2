use common::chart::ChartRender;
use common::model::widget::Widget;
use common::model::widget_config::{Aggregation, ChartType, WidgetConfig};
use serde_json::json;

#[test]
fn every_config_field_survives_a_round_trip() {
    let original = json!({
        "xAxis": "month",
        "yAxis": "sales",
        "groupBy": "region",
        "aggregation": "avg",
        "colors": ["#111111", "#222222"],
        "showLegend": false,
        "showGrid": true,
        "statValue": "$1,200",
        "statLabel": "Revenue",
        "gaugeMin": 0.5,
        "gaugeMax": 500.25,
        "dateRange": {"from": "2024-01-01", "to": "2024-03-31"},
        "filters": {"region": ["North", "South"]},
        "textContent": "Quarterly numbers",
        "data": [{"month": "Jan", "sales": 1}],
        "customTheme": {"dense": true}
    });
    let config: WidgetConfig = serde_json::from_value(original.clone()).unwrap();
    assert_eq!(config.aggregation, Some(Aggregation::Avg));
    assert_eq!(config.extra.get("customTheme"), Some(&json!({"dense": true})));
    assert_eq!(serde_json::to_value(&config).unwrap(), original);
}

#[test]
fn integer_gauge_bounds_keep_their_form() {
    let original = json!({"gaugeMin": 0, "gaugeMax": 100});
    let config: WidgetConfig = serde_json::from_value(original.clone()).unwrap();
    assert_eq!(config.gauge_min(), Some(0.0));
    assert_eq!(config.gauge_max(), Some(100.0));
    assert_eq!(serde_json::to_value(&config).unwrap(), original);
    assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"gaugeMin":0,"gaugeMax":100}"#);
}

#[test]
fn widgets_with_layers_and_unknown_types_round_trip() {
    let original = json!({
        "id": "w1",
        "dashboardId": "d1",
        "dataSourceId": "ds1",
        "type": "sankey",
        "title": "Flows",
        "config": {"xAxis": "from"},
        "position": {"x": 0, "y": 2, "w": 6, "h": 4},
        "layers": [{"type": "table", "label": "Raw"}],
        "activeLayer": 1,
        "referenceLines": [{"value": 10.0, "axis": "y"}],
        "annotations": [{"x": "Jan", "text": "launch"}],
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    });
    let widget: Widget = serde_json::from_value(original.clone()).unwrap();
    assert_eq!(widget.chart_type, ChartType::Other("sankey".into()));
    assert_eq!(serde_json::to_value(&widget).unwrap(), original);
}

#[test]
fn renders_serialize_with_a_kind_tag() {
    let value = serde_json::to_value(ChartRender::unsupported("sankey")).unwrap();
    assert_eq!(value["kind"], "unsupported");
    assert_eq!(value["chartType"], "sankey");
}
