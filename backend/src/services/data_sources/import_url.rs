//! `POST /api/data_sources/url`
//!
//! Registers a `pending` URL source and a job, answers with both ids, then
//! fetches and parses the document in the background. The job ends
//! `Completed(<data source id>)` or `Failed(<reason>)`, and the source ends
//! `ready` or `error` to match.

use crate::auth::{ensure_member, AuthUser};
use crate::config::Config;
use crate::db::{data_sources, now, Database};
use crate::error::ApiError;
use crate::ingest;
use crate::job_controller::state::JobsState;
use actix_web::{web, HttpResponse};
use common::jobs::JobStatus;
use common::model::datasource::{
    DataSource, DataSourceKind, DataSourceMetadata, DataSourceStatus, FileFormat,
};
use common::requests::{ImportUrlRequest, JobStarted};
use log::{info, warn};
use reqwest::Url;
use std::time::Duration;
use uuid::Uuid;

pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    jobs: web::Data<JobsState>,
    config: web::Data<Config>,
    body: web::Json<ImportUrlRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    let url = parse_url(&request.url)?;
    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest("data source name must not be empty".into()));
    }

    let source = {
        let conn = db.connect()?;
        ensure_member(&conn, &user, request.organization_id.as_deref())?;
        let created_at = now();
        let source = DataSource {
            id: Uuid::new_v4().to_string(),
            user_id: user.id().to_string(),
            organization_id: request.organization_id,
            name: request.name.trim().to_string(),
            kind: DataSourceKind::Url,
            format: request.format.unwrap_or_else(|| FileFormat::from_name(url.path())),
            raw_payload: None,
            metadata: DataSourceMetadata::default(),
            status: DataSourceStatus::Pending,
            error_message: None,
            created_at: created_at.clone(),
            updated_at: created_at,
        };
        data_sources::insert(&conn, &source)?;
        source
    };

    let job_id = jobs.register().await;
    info!("job {}: importing {} into data source {}", job_id, url, source.id);

    let worker = ImportJob {
        job_id: job_id.clone(),
        data_source_id: source.id.clone(),
        url,
        format: source.format,
        explicit_format: request.format.is_some(),
        limit: config.upload_limit_bytes,
        timeout: config.url_fetch_timeout,
    };
    let db = db.get_ref().clone();
    let jobs = jobs.get_ref().clone();
    tokio::spawn(async move { worker.run(db, jobs).await });

    Ok(HttpResponse::Accepted().json(JobStarted {
        job_id,
        data_source_id: Some(source.id),
    }))
}

/// Only absolute http(s) URLs are fetched.
fn parse_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::BadRequest(format!("invalid url {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ApiError::BadRequest(format!(
            "unsupported url scheme {:?}; use http or https",
            scheme
        ))),
    }
}

struct ImportJob {
    job_id: String,
    data_source_id: String,
    url: Url,
    format: FileFormat,
    explicit_format: bool,
    limit: usize,
    timeout: Duration,
}

impl ImportJob {
    async fn run(self, db: Database, jobs: JobsState) {
        let outcome = self.import(&db, &jobs).await;
        match outcome {
            Ok(rows) => {
                info!(
                    "job {}: data source {} ready with {} rows",
                    self.job_id, self.data_source_id, rows
                );
                jobs.report(&self.job_id, JobStatus::Completed(self.data_source_id.clone()))
                    .await;
            }
            Err(reason) => {
                warn!("job {}: import of {} failed: {}", self.job_id, self.url, reason);
                let marked = db.connect().and_then(|conn| {
                    data_sources::set_status(
                        &conn,
                        &self.data_source_id,
                        DataSourceStatus::Error,
                        Some(&reason),
                    )
                });
                if let Err(e) = marked {
                    warn!("job {}: could not record the failure: {}", self.job_id, e);
                }
                jobs.report(&self.job_id, JobStatus::Failed(reason)).await;
            }
        }
    }

    /// Fetches, parses and stores the document; returns the row count.
    async fn import(&self, db: &Database, jobs: &JobsState) -> Result<usize, String> {
        {
            let conn = db.connect().map_err(|e| e.to_string())?;
            data_sources::set_status(&conn, &self.data_source_id, DataSourceStatus::Processing, None)
                .map_err(|e| e.to_string())?;
        }
        jobs.report(&self.job_id, JobStatus::InProgress(10)).await;

        let (bytes, content_type) = self.fetch().await?;
        jobs.report(&self.job_id, JobStatus::InProgress(60)).await;

        let format = if self.explicit_format || self.format != FileFormat::Other {
            self.format
        } else {
            format_from_content_type(content_type.as_deref())
        };

        let db = db.clone();
        let id = self.data_source_id.clone();
        tokio::task::spawn_blocking(move || -> Result<usize, String> {
            let parsed = ingest::parse(&bytes, format).map_err(|e| e.to_string())?;
            let conn = db.connect().map_err(|e| e.to_string())?;
            data_sources::set_payload(&conn, &id, &parsed.payload, &parsed.metadata)
                .map_err(|e| e.to_string())?;
            Ok(parsed.metadata.row_count)
        })
        .await
        .map_err(|e| format!("parsing task failed: {}", e))?
    }

    async fn fetch(&self) -> Result<(Vec<u8>, Option<String>), String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| e.to_string())?;
        let response = client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("the server answered {}", status));
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.limit as u64)
        {
            return Err(format!("document exceeds the {} byte limit", self.limit));
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("reading the body failed: {}", e))?;
        if bytes.len() > self.limit {
            return Err(format!("document exceeds the {} byte limit", self.limit));
        }
        Ok((bytes.to_vec(), content_type))
    }
}

fn format_from_content_type(content_type: Option<&str>) -> FileFormat {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();
    match essence.as_str() {
        "text/csv" | "application/csv" => FileFormat::Csv,
        "text/tab-separated-values" => FileFormat::Tsv,
        "application/json" | "text/json" => FileFormat::Json,
        _ if essence.ends_with("+json") => FileFormat::Json,
        _ => FileFormat::Other,
    }
}
