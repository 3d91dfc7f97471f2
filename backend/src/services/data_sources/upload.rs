use crate::auth::{ensure_member, AuthUser};
use crate::config::Config;
use crate::db::{data_sources, now, Database};
use crate::error::ApiError;
use crate::ingest::{self, Parsed};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::datasource::{
    DataSource, DataSourceKind, DataSourceMetadata, DataSourceStatus, FileFormat,
};
use common::requests::UploadDataSourceMeta;
use futures_util::StreamExt;
use log::{info, warn};
use serde_json::from_slice;
use uuid::Uuid;

/// `POST /api/data_sources/upload`
///
/// Expects `multipart/form-data` with a `json` part (an
/// `UploadDataSourceMeta`) followed by a `file` part. CSV, TSV and JSON
/// files are accepted, recognised by extension.
///
/// - Parsed files are stored `ready` and returned with `201 Created`.
/// - Files that fail to parse are still stored, in the `error` state with
///   the reason, and the request answers `422`.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = read_upload(payload, config.upload_limit_bytes).await?;
    let conn = db.connect()?;
    ensure_member(&conn, &user, upload.meta.organization_id.as_deref())?;

    let format = FileFormat::from_name(&upload.file_name);
    let bytes = upload.bytes;
    let parsed = tokio::task::spawn_blocking(move || ingest::parse(&bytes, format))
        .await
        .map_err(|e| ApiError::Internal(format!("upload parsing task failed: {}", e)))?;

    let created_at = now();
    let mut source = DataSource {
        id: Uuid::new_v4().to_string(),
        user_id: user.id().to_string(),
        organization_id: upload.meta.organization_id,
        name: upload.meta.name.trim().to_string(),
        kind: DataSourceKind::File,
        format,
        raw_payload: None,
        metadata: DataSourceMetadata::default(),
        status: DataSourceStatus::Ready,
        error_message: None,
        created_at: created_at.clone(),
        updated_at: created_at,
    };

    match parsed {
        Ok(Parsed { payload, metadata }) => {
            source.raw_payload = Some(payload);
            source.metadata = metadata;
            data_sources::insert(&conn, &source)?;
            info!(
                "data source {} uploaded by {}: {} rows",
                source.id,
                user.id(),
                source.metadata.row_count
            );
            Ok(HttpResponse::Created().json(source))
        }
        Err(err) => {
            source.status = DataSourceStatus::Error;
            source.error_message = Some(err.to_string());
            data_sources::insert(&conn, &source)?;
            warn!("upload {} rejected: {}", upload.file_name, err);
            Err(ApiError::Ingest(format!("{} (data source {})", err, source.id)))
        }
    }
}

struct Upload {
    meta: UploadDataSourceMeta,
    file_name: String,
    bytes: Vec<u8>,
}

/// Drains the multipart stream. The metadata part must come before the
/// file so a bad request fails before the file is buffered.
async fn read_upload(mut payload: Multipart, limit: usize) -> Result<Upload, ApiError> {
    let mut meta: Option<UploadDataSourceMeta> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("json") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    bytes.extend_from_slice(&chunk.map_err(|e| ApiError::BadRequest(e.to_string()))?);
                }
                let parsed: UploadDataSourceMeta = from_slice(&bytes)
                    .map_err(|e| ApiError::BadRequest(format!("invalid json part: {}", e)))?;
                if parsed.name.trim().is_empty() {
                    return Err(ApiError::BadRequest("data source name must not be empty".into()));
                }
                meta = Some(parsed);
            }
            Some("file") => {
                if meta.is_none() {
                    return Err(ApiError::BadRequest(
                        "the json part must be sent before the file".into(),
                    ));
                }
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                if !matches!(
                    FileFormat::from_name(&file_name),
                    FileFormat::Csv | FileFormat::Tsv | FileFormat::Json
                ) {
                    return Err(ApiError::BadRequest(format!(
                        "{:?} is not a .csv, .tsv or .json file",
                        file_name
                    )));
                }
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| ApiError::BadRequest(e.to_string()))?;
                    if bytes.len() + chunk.len() > limit {
                        return Err(ApiError::BadRequest(format!(
                            "file exceeds the {} byte upload limit",
                            limit
                        )));
                    }
                    bytes.extend_from_slice(&chunk);
                }
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let meta = meta.ok_or_else(|| ApiError::BadRequest("missing json part".into()))?;
    let (file_name, bytes) = file.ok_or_else(|| ApiError::BadRequest("missing file part".into()))?;
    Ok(Upload {
        meta,
        file_name,
        bytes,
    })
}
