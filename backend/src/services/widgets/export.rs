use crate::auth::AuthUser;
use crate::db::Database;
use crate::error::ApiError;
use crate::services::access::{sources_for, widget_for_view};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use common::chart::resolve;
use common::export::{export_file_name, rows_to_csv, CSV_MIME};

/// `GET /api/widgets/{id}/export.csv`: the widget's displayed rows as CSV,
/// with the same column and quoting rules as the browser export.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let (widget, _) = widget_for_view(&conn, &user, &id)?;
    let sources = sources_for(&conn, &widget)?;
    let rows = resolve(&widget.config, widget.data_source_id.as_deref(), &sources).rows;

    Ok(HttpResponse::Ok()
        .content_type(CSV_MIME)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export_file_name(&widget.title))],
        })
        .body(rows_to_csv(&rows)))
}
