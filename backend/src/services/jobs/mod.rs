//! Polling of background jobs (URL imports and analyses).
//!
//! * **`GET /api/jobs/{job_id}`**: `Pending`, `InProgress(percent)`,
//!   `Completed(result id)` or `Failed(reason)`. Job ids are random v4
//!   uuids handed only to whoever started the job, so no user header is
//!   required.

mod get_status;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/jobs";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{job_id}", get().to(get_status::process))
}

#[cfg(test)]
mod tests {
    use crate::services::testing::TestState;
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use common::jobs::JobStatus;

    #[actix_web::test]
    async fn unknown_jobs_are_not_found() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
        let response = test::call_service(
            &app,
            TestRequest::get().uri("/api/jobs/nope").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let job_id = state.jobs.register().await;
        let status: JobStatus = test::call_and_read_body_json(
            &app,
            TestRequest::get().uri(&format!("/api/jobs/{}", job_id)).to_request(),
        )
        .await;
        assert_eq!(status, JobStatus::Pending);
    }
}
