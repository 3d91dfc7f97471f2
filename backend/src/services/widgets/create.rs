use crate::auth::AuthUser;
use crate::db::{now, widgets, Database};
use crate::error::ApiError;
use crate::services::access::{dashboard_for_edit, data_source_for_view};
use crate::services::widgets::validate_widget;
use actix_web::{web, HttpResponse};
use common::chart::resolve;
use common::model::widget::Widget;
use common::requests::{CreateWidgetRequest, CreatedWidget};
use log::{debug, info};
use rusqlite::Connection;
use uuid::Uuid;

/// `POST /api/widgets`: adds a widget to a dashboard the caller may edit.
///
/// When the widget names a data source and carries no rows of its own, the
/// rows the widget would display (at most 100) are copied into
/// `config.data`, so later edits to the source do not move the chart.
/// `truncated` in the response tells whether the source had more.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    payload: web::Json<CreateWidgetRequest>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let created = create_widget(&conn, &user, payload.into_inner())?;
    info!(
        "widget {} added to dashboard {}",
        created.widget.id, created.widget.dashboard_id
    );
    Ok(HttpResponse::Created().json(created))
}

pub fn create_widget(
    conn: &Connection,
    user: &AuthUser,
    req: CreateWidgetRequest,
) -> Result<CreatedWidget, ApiError> {
    let dashboard = dashboard_for_edit(conn, user, &req.dashboard_id)?;
    let mut config = req.config;
    validate_widget(&req.chart_type, &config, req.layers.as_deref())?;

    let mut truncated = false;
    if let Some(source_id) = req.data_source_id.as_deref() {
        let source = data_source_for_view(conn, user, source_id)?;
        if config.inline_rows().is_none() {
            let resolution = resolve(&config, Some(source_id), std::slice::from_ref(&source));
            if resolution.rows.is_empty() {
                debug!("data source {} has no rows yet; widget reads it live", source_id);
            } else {
                truncated = resolution.truncated;
                config.data = Some(resolution.rows);
            }
        }
    }

    let created_at = now();
    let widget = Widget {
        id: Uuid::new_v4().to_string(),
        dashboard_id: dashboard.id,
        data_source_id: req.data_source_id,
        chart_type: req.chart_type,
        title: req.title.trim().to_string(),
        config,
        position: req.position,
        layers: req.layers,
        active_layer: 0,
        reference_lines: req.reference_lines,
        annotations: req.annotations,
        ai_insights: None,
        created_at: created_at.clone(),
        updated_at: created_at,
    };
    widgets::insert(conn, &widget)?;
    Ok(CreatedWidget { widget, truncated })
}
