use crate::auth::AuthUser;
use crate::db::Database;
use crate::error::ApiError;
use crate::services::access::{sources_for, widget_for_view};
use actix_web::{web, HttpResponse};
use common::chart::{ComposedWidget, RenderOptions};
use common::requests::WidgetRender;
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RenderQuery {
    /// Layer to render; the widget's stored active layer when absent.
    pub layer: Option<usize>,
}

/// `GET /api/widgets/{id}/render?layer=i`: the chart description the
/// browser would draw, for clients without the shared chart core.
///
/// An out-of-range layer renders the base layer, never an error; the
/// response names the layer actually rendered.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
    query: web::Query<RenderQuery>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(render_widget(&conn, &user, &id, query.layer)?))
}

pub fn render_widget(
    conn: &Connection,
    user: &AuthUser,
    id: &str,
    layer: Option<usize>,
) -> Result<WidgetRender, ApiError> {
    let (widget, dashboard) = widget_for_view(conn, user, id)?;
    let sources = sources_for(conn, &widget)?;
    let options = RenderOptions::from_preferences(&dashboard.preferences);

    let composed = ComposedWidget::new(&widget, &sources);
    let active = match layer {
        Some(index) => composed.render(index, &options),
        None => composed.render_active(&options),
    };
    Ok(WidgetRender {
        layers: composed.layers().to_vec(),
        active,
        truncated: composed.resolution().truncated,
    })
}
