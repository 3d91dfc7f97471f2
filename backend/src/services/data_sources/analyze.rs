//! `POST /api/data_sources/{id}/analyze`
//!
//! Starts a job that re-profiles the source's payload and stores a new
//! analysis from the suggestion service. The job completes with the new
//! analysis id; `GET /api/data_sources/{id}/analyses` lists the results.

use crate::auth::AuthUser;
use crate::db::{analyses, data_sources, now, Database};
use crate::error::ApiError;
use crate::ingest;
use crate::job_controller::state::JobsState;
use crate::services::access::data_source_for_edit;
use crate::suggestions::SuggestionService;
use actix_web::{web, HttpResponse};
use common::jobs::JobStatus;
use common::model::datasource::DataSourceStatus;
use common::requests::JobStarted;
use log::{info, warn};
use uuid::Uuid;

pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    jobs: web::Data<JobsState>,
    suggestions: web::Data<dyn SuggestionService>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let source = {
        let conn = db.connect()?;
        let source = data_source_for_edit(&conn, &user, &id)?;
        if source.status == DataSourceStatus::Pending {
            return Err(ApiError::BadRequest(format!(
                "data source {} has not finished importing",
                source.id
            )));
        }
        source
    };

    let job_id = jobs.register().await;
    info!("job {}: analyzing data source {}", job_id, source.id);

    let db = db.get_ref().clone();
    let jobs = jobs.get_ref().clone();
    let source_id = source.id.clone();
    let job = job_id.clone();
    tokio::spawn(async move {
        jobs.report(&job, JobStatus::InProgress(10)).await;
        let blocking_db = db.clone();
        let blocking_id = source_id.clone();
        let outcome = tokio::task::spawn_blocking(move || {
            analyze_blocking(&blocking_db, &blocking_id, suggestions.get_ref())
        })
        .await
        .unwrap_or_else(|e| Err(format!("analysis task failed: {}", e)));

        match outcome {
            Ok(analysis_id) => {
                info!("job {}: analysis {} stored", job, analysis_id);
                jobs.report(&job, JobStatus::Completed(analysis_id)).await;
            }
            Err(reason) => {
                warn!("job {}: analysis of {} failed: {}", job, source_id, reason);
                if let Err(e) = db.connect().and_then(|conn| {
                    data_sources::set_status(&conn, &source_id, DataSourceStatus::Error, Some(&reason))
                }) {
                    warn!("job {}: could not record the failure: {}", job, e);
                }
                jobs.report(&job, JobStatus::Failed(reason)).await;
            }
        }
    });

    Ok(HttpResponse::Accepted().json(JobStarted {
        job_id,
        data_source_id: Some(source.id),
    }))
}

/// Refreshes the metadata, then stores the analysis; returns its id.
fn analyze_blocking(
    db: &Database,
    data_source_id: &str,
    suggestions: &dyn SuggestionService,
) -> Result<String, String> {
    let conn = db.connect().map_err(|e| e.to_string())?;
    data_sources::set_status(&conn, data_source_id, DataSourceStatus::Processing, None)
        .map_err(|e| e.to_string())?;

    let mut source = data_sources::get(&conn, data_source_id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("data source {} disappeared", data_source_id))?;
    let payload = source
        .raw_payload
        .take()
        .ok_or_else(|| "the data source holds no data".to_string())?;

    let rows = ingest::all_rows(&payload);
    source.metadata = ingest::metadata_for(&payload);
    data_sources::set_metadata(&conn, data_source_id, &source.metadata)
        .map_err(|e| e.to_string())?;
    data_sources::set_status(&conn, data_source_id, DataSourceStatus::Ready, None)
        .map_err(|e| e.to_string())?;

    let analysis = suggestions.analyze(&source, &rows).into_analysis(
        Uuid::new_v4().to_string(),
        data_source_id.to_string(),
        now(),
    );
    analyses::insert(&conn, &analysis).map_err(|e| e.to_string())?;
    Ok(analysis.id)
}
