use crate::error::ApiError;
use crate::job_controller::state::JobsState;
use actix_web::{web, HttpResponse};

/// `GET /api/jobs/{job_id}`: the job's latest status.
pub async fn process(
    job_id: web::Path<String>,
    state: web::Data<JobsState>,
) -> Result<HttpResponse, ApiError> {
    match state.status(&job_id).await {
        Some(status) => Ok(HttpResponse::Ok().json(status)),
        None => Err(ApiError::NotFound(format!("job {}", job_id))),
    }
}
