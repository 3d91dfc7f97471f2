use crate::db::{json_column, optional_json_column, to_json, to_optional_json};
use common::model::widget::Widget;
use common::model::widget_config::ChartType;
use rusqlite::{params, Connection, OptionalExtension};

const COLUMNS: &str = "id, dashboard_id, data_source_id, type, title, config, position, layers, \
                       active_layer, reference_lines, annotations, ai_insights, created_at, updated_at";

fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Widget> {
    let chart_type: String = row.get(3)?;
    let active_layer: i64 = row.get(8)?;
    Ok(Widget {
        id: row.get(0)?,
        dashboard_id: row.get(1)?,
        data_source_id: row.get(2)?,
        chart_type: ChartType::from(chart_type),
        title: row.get(4)?,
        config: json_column(row, 5)?,
        position: json_column(row, 6)?,
        layers: optional_json_column(row, 7)?,
        active_layer: usize::try_from(active_layer).unwrap_or(0),
        reference_lines: optional_json_column(row, 9)?,
        annotations: optional_json_column(row, 10)?,
        ai_insights: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub fn insert(conn: &Connection, widget: &Widget) -> rusqlite::Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO widgets ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        ),
        params![
            widget.id,
            widget.dashboard_id,
            widget.data_source_id,
            widget.chart_type.as_str(),
            widget.title,
            to_json(&widget.config)?,
            to_json(&widget.position)?,
            to_optional_json(widget.layers.as_ref())?,
            widget.active_layer as i64,
            to_optional_json(widget.reference_lines.as_ref())?,
            to_optional_json(widget.annotations.as_ref())?,
            widget.ai_insights,
            widget.created_at,
            widget.updated_at,
        ],
    )?;
    Ok(())
}

/// Writes every mutable field back.
pub fn update(conn: &Connection, widget: &Widget) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE widgets
         SET data_source_id = ?2, type = ?3, title = ?4, config = ?5, position = ?6,
             layers = ?7, active_layer = ?8, reference_lines = ?9, annotations = ?10,
             ai_insights = ?11, updated_at = ?12
         WHERE id = ?1",
        params![
            widget.id,
            widget.data_source_id,
            widget.chart_type.as_str(),
            widget.title,
            to_json(&widget.config)?,
            to_json(&widget.position)?,
            to_optional_json(widget.layers.as_ref())?,
            widget.active_layer as i64,
            to_optional_json(widget.reference_lines.as_ref())?,
            to_optional_json(widget.annotations.as_ref())?,
            widget.ai_insights,
            widget.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, id: &str) -> rusqlite::Result<Option<Widget>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM widgets WHERE id = ?1"),
        params![id],
        from_row,
    )
    .optional()
}

/// Widgets of a dashboard in reading order: top to bottom, left to right,
/// then oldest first.
pub fn list_for_dashboard(conn: &Connection, dashboard_id: &str) -> rusqlite::Result<Vec<Widget>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM widgets
         WHERE dashboard_id = ?1
         ORDER BY json_extract(position, '$.y'), json_extract(position, '$.x'), created_at, id"
    ))?;
    let rows = stmt.query_map(params![dashboard_id], from_row)?;
    rows.collect()
}

pub fn delete(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    Ok(conn.execute("DELETE FROM widgets WHERE id = ?1", params![id])? > 0)
}
