use crate::auth::AuthUser;
use crate::db::{data_sources, Database};
use crate::error::ApiError;
use crate::services::access::data_source_for_edit;
use actix_web::{web, HttpResponse};
use log::info;

/// `DELETE /api/data_sources/{id}`: widgets that used the source keep
/// their snapshot rows and lose the reference; its analyses are removed.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let source = data_source_for_edit(&conn, &user, &id)?;
    data_sources::delete(&conn, &source.id)?;
    info!("data source {} deleted by {}", source.id, user.id());
    Ok(HttpResponse::NoContent().finish())
}
