use crate::auth::AuthUser;
use crate::db::{now, widgets, Database};
use crate::error::ApiError;
use crate::services::access::widget_for_edit;
use crate::services::widgets::validate_widget;
use actix_web::{web, HttpResponse};
use common::model::widget::Widget;
use common::requests::UpdateWidgetRequest;
use rusqlite::Connection;

/// `PATCH /api/widgets/{id}`: updates the fields present in the body.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
    payload: web::Json<UpdateWidgetRequest>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let widget = update_widget(&conn, &user, &id, payload.into_inner())?;
    Ok(HttpResponse::Ok().json(widget))
}

/// A new `config` replaces the old one, except that the stored row snapshot
/// is kept when the new config brings no `data` of its own. The active
/// layer is stored as sent; rendering falls back to layer 0 when it is stale.
pub fn update_widget(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
    req: UpdateWidgetRequest,
) -> Result<Widget, ApiError> {
    let (mut widget, _) = widget_for_edit(conn, user, id)?;

    if let Some(chart_type) = req.chart_type {
        widget.chart_type = chart_type;
    }
    if let Some(title) = req.title {
        widget.title = title.trim().to_string();
    }
    if let Some(mut config) = req.config {
        if config.data.is_none() {
            config.data = widget.config.data.take();
        }
        widget.config = config;
    }
    if let Some(position) = req.position {
        widget.position = position;
    }
    if let Some(layers) = req.layers {
        widget.layers = Some(layers).filter(|l| !l.is_empty());
    }
    if let Some(active_layer) = req.active_layer {
        widget.active_layer = active_layer;
    }
    if let Some(lines) = req.reference_lines {
        widget.reference_lines = Some(lines);
    }
    if let Some(annotations) = req.annotations {
        widget.annotations = Some(annotations);
    }
    if let Some(insights) = req.ai_insights {
        widget.ai_insights = Some(insights).filter(|i| !i.trim().is_empty());
    }
    validate_widget(&widget.chart_type, &widget.config, widget.layers.as_deref())?;
    widget.updated_at = now();
    widgets::update(conn, &widget)?;
    Ok(widget)
}
