use crate::auth::AuthUser;
use crate::db::{widgets, Database};
use crate::error::ApiError;
use crate::services::access::widget_for_edit;
use actix_web::{web, HttpResponse};
use log::info;

/// `DELETE /api/widgets/{id}`
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let (widget, _) = widget_for_edit(&conn, &user, &id)?;
    widgets::delete(&conn, &widget.id)?;
    info!("widget {} deleted by {}", widget.id, user.id());
    Ok(HttpResponse::NoContent().finish())
}
