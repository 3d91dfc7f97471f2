use common::chart::render::{CartesianKind, ChartRender, NO_DATA_MESSAGE};
use common::chart::{ComposedWidget, RenderOptions, RowOrigin, DISPLAY_ROW_CAP};
use common::export::rows_to_csv;
use common::model::datasource::{
    DataSource, DataSourceKind, DataSourceMetadata, DataSourceStatus, FileFormat,
};
use common::model::widget::Widget;
use serde_json::{json, Value};

fn widget(value: Value) -> Widget {
    serde_json::from_value(value).unwrap()
}

fn source(id: &str, payload: Value) -> DataSource {
    DataSource {
        id: id.into(),
        user_id: "u1".into(),
        organization_id: None,
        name: "upload".into(),
        kind: DataSourceKind::File,
        format: FileFormat::Json,
        raw_payload: Some(payload),
        metadata: DataSourceMetadata::default(),
        status: DataSourceStatus::Ready,
        error_message: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[test]
fn inline_bar_chart_renders_and_exports() {
    let w = widget(json!({
        "id": "w1",
        "dashboardId": "d1",
        "type": "bar",
        "title": "Monthly sales",
        "config": {
            "xAxis": "month",
            "yAxis": "sales",
            "data": [
                {"month": "Jan", "sales": 100},
                {"month": "Feb", "sales": 150}
            ]
        }
    }));
    let composed = ComposedWidget::new(&w, &[]);
    assert_eq!(composed.resolution().origin, RowOrigin::Inline);
    assert_eq!(
        bar_points(&composed),
        vec![("Jan".to_string(), Some(100.0)), ("Feb".to_string(), Some(150.0))]
    );
    assert_eq!(rows_to_csv(composed.rows()), "month,sales\nJan,100\nFeb,150");
}

#[test]
fn data_source_bar_chart_renders_and_exports() {
    let sources = vec![source(
        "sales",
        json!([
            {"month": "Jan", "sales": 100},
            {"month": "Feb", "sales": 150}
        ]),
    )];
    let w = widget(json!({
        "id": "w5",
        "dashboardId": "d1",
        "dataSourceId": "sales",
        "type": "bar",
        "title": "Monthly sales",
        "config": {"xAxis": "month", "yAxis": "sales"}
    }));
    let composed = ComposedWidget::new(&w, &sources);
    assert_eq!(
        composed.resolution().origin,
        RowOrigin::DataSource("sales".into())
    );
    assert!(!composed.resolution().truncated);
    assert_eq!(
        bar_points(&composed),
        vec![("Jan".to_string(), Some(100.0)), ("Feb".to_string(), Some(150.0))]
    );
    assert_eq!(rows_to_csv(composed.rows()), "month,sales\nJan,100\nFeb,150");
}

fn bar_points(composed: &ComposedWidget) -> Vec<(String, Option<f64>)> {
    let layer = composed.render_active(&RenderOptions::default());
    let ChartRender::Cartesian(bar) = layer.render else {
        panic!("expected a bar chart, got {:?}", layer.render);
    };
    assert_eq!(bar.chart, CartesianKind::Bar);
    bar.points
        .iter()
        .map(|p| (p.category.clone(), p.value))
        .collect()
}

#[test]
fn data_source_rows_are_capped_and_nested_arrays_found() {
    let many: Vec<Value> = (0..250).map(|i| json!({"day": i, "visits": i * 2})).collect();
    let sources = vec![
        source("big", Value::Array(many)),
        source("nested", json!({"meta": "x", "rows": [{"k": "a", "v": 1}]})),
    ];

    let w = widget(json!({
        "id": "w2", "dashboardId": "d1", "type": "line", "title": "Visits",
        "dataSourceId": "big", "config": {}
    }));
    let composed = ComposedWidget::new(&w, &sources);
    assert_eq!(composed.rows().len(), DISPLAY_ROW_CAP);
    assert!(composed.resolution().truncated);

    let w = widget(json!({
        "id": "w3", "dashboardId": "d1", "type": "pie", "title": "Nested",
        "dataSourceId": "nested", "config": {}
    }));
    let composed = ComposedWidget::new(&w, &sources);
    assert_eq!(composed.rows().len(), 1);
    assert_eq!(
        composed.resolution().origin,
        RowOrigin::DataSource("nested".into())
    );
}

#[test]
fn missing_source_renders_the_empty_placeholder() {
    let w = widget(json!({
        "id": "w4", "dashboardId": "d1", "type": "gauge", "title": "Gone",
        "dataSourceId": "deleted", "config": {}
    }));
    let composed = ComposedWidget::new(&w, &[]);
    let layer = composed.render_active(&RenderOptions::default());
    assert_eq!(
        layer.render,
        ChartRender::Empty {
            message: NO_DATA_MESSAGE.to_string()
        }
    );
}
