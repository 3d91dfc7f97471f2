//! # Data Source Service Module
//!
//! Routes under `/api/data_sources`. A data source is a stored tabular
//! payload (uploaded file or fetched URL) with profiled metadata; widgets
//! snapshot rows from it.
//!
//! ## Registered Routes
//!
//! * **`GET /`**: sources the caller can see, payloads omitted (`list`).
//! * **`POST /upload`**: multipart upload, parsed synchronously (`upload`).
//! * **`POST /url`**: fetches a URL in a background job (`import_url`).
//! * **`GET /{id}`**, **`DELETE /{id}`** (`get`, `delete`).
//! * **`POST /{id}/analyze`**: background analysis job (`analyze`).
//! * **`GET /{id}/analyses`**: stored analyses, newest first (`analyses`).
//!
//! Job progress is polled through `GET /api/jobs/{job_id}`.

mod analyses;
mod analyze;
mod delete;
mod get;
mod import_url;
mod list;
mod upload;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/data_sources";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/upload", post().to(upload::process))
        .route("/url", post().to(import_url::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/analyze", post().to(analyze::process))
        .route("/{id}/analyses", get().to(analyses::process))
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{as_user, TestState};
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use common::jobs::JobStatus;
    use common::model::analysis::AiAnalysis;
    use common::model::column::ColumnType;
    use common::model::dashboard::Dashboard;
    use common::model::datasource::{DataSource, DataSourceStatus};
    use common::model::widget::Widget;
    use common::requests::{CreatedWidget, JobStarted};
    use serde_json::json;

    const BOUNDARY: &str = "dashboard-test-boundary";

    fn upload_request(user: &str, name: &str, file_name: &str, contents: &str) -> TestRequest {
        let meta = json!({ "name": name }).to_string();
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"json\"\r\n\
             Content-Type: application/json\r\n\r\n\
             {meta}\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {contents}\r\n\
             --{b}--\r\n",
            b = BOUNDARY
        );
        as_user(TestRequest::post().uri("/api/data_sources/upload"), user)
            .insert_header((
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn csv_upload_is_parsed_and_profiled() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let source: DataSource = test::call_and_read_body_json(
            &app,
            upload_request("alice", "Sales", "sales.csv", "region;sales\nNorth;100\nSouth;150")
                .to_request(),
        )
        .await;
        assert_eq!(source.status, DataSourceStatus::Ready);
        assert_eq!(source.metadata.row_count, 2);
        assert_eq!(source.metadata.columns, vec!["region", "sales"]);
        assert_eq!(source.metadata.profile[1].column_type, ColumnType::Number);
        assert_eq!(
            source.raw_payload,
            Some(json!([
                {"region": "North", "sales": 100},
                {"region": "South", "sales": 150}
            ]))
        );

        let listed: Vec<DataSource> = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::get().uri("/api/data_sources"), "alice").to_request(),
        )
        .await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].raw_payload, None);

        let hidden = test::call_service(
            &app,
            as_user(
                TestRequest::get().uri(&format!("/api/data_sources/{}", source.id)),
                "bob",
            )
            .to_request(),
        )
        .await;
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn bad_files_are_kept_as_errors() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let response = test::call_service(
            &app,
            upload_request("alice", "Broken", "broken.csv", "name,name\n1,2").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let listed: Vec<DataSource> = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::get().uri("/api/data_sources"), "alice").to_request(),
        )
        .await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].status, DataSourceStatus::Error);
        assert!(listed[0].error_message.is_some());

        let spreadsheet = test::call_service(
            &app,
            upload_request("alice", "Sheet", "sheet.xlsx", "PK").to_request(),
        )
        .await;
        assert_eq!(spreadsheet.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn deleting_a_source_keeps_widget_snapshots() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let source: DataSource = test::call_and_read_body_json(
            &app,
            upload_request("alice", "Visits", "visits.json", r#"[{"day":"Mon","visits":3}]"#)
                .to_request(),
        )
        .await;
        let dashboard: Dashboard = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/dashboards"), "alice")
                .set_json(json!({"title": "Traffic"}))
                .to_request(),
        )
        .await;
        let created: CreatedWidget = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/widgets"), "alice")
                .set_json(json!({
                    "dashboardId": dashboard.id,
                    "dataSourceId": source.id,
                    "type": "bar",
                    "title": "Visits"
                }))
                .to_request(),
        )
        .await;

        let deleted = test::call_service(
            &app,
            as_user(
                TestRequest::delete().uri(&format!("/api/data_sources/{}", source.id)),
                "alice",
            )
            .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let widget: Widget = test::call_and_read_body_json(
            &app,
            as_user(
                TestRequest::get().uri(&format!("/api/widgets/{}", created.widget.id)),
                "alice",
            )
            .to_request(),
        )
        .await;
        assert_eq!(widget.data_source_id, None);
        assert_eq!(widget.config.data.as_ref().map(Vec::len), Some(1));
    }

    #[actix_web::test]
    async fn analysis_runs_as_a_job() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let source: DataSource = test::call_and_read_body_json(
            &app,
            upload_request(
                "alice",
                "Sales",
                "sales.csv",
                "month,sales\nJan,100\nFeb,\nMar,175",
            )
            .to_request(),
        )
        .await;

        let started: JobStarted = test::call_and_read_body_json(
            &app,
            as_user(
                TestRequest::post().uri(&format!("/api/data_sources/{}/analyze", source.id)),
                "alice",
            )
            .to_request(),
        )
        .await;

        let mut status = JobStatus::Pending;
        for _ in 0..200 {
            status = test::call_and_read_body_json(
                &app,
                TestRequest::get()
                    .uri(&format!("/api/jobs/{}", started.job_id))
                    .to_request(),
            )
            .await;
            if status.is_finished() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let JobStatus::Completed(analysis_id) = status else {
            panic!("analysis did not complete: {:?}", status);
        };

        let analyses: Vec<AiAnalysis> = test::call_and_read_body_json(
            &app,
            as_user(
                TestRequest::get().uri(&format!("/api/data_sources/{}/analyses", source.id)),
                "alice",
            )
            .to_request(),
        )
        .await;
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].id, analysis_id);
        assert_eq!(
            analyses[0].summary,
            "Sales has 3 rows across 2 columns, 1 of them numeric."
        );
        assert_eq!(analyses[0].data_quality_notes, vec!["sales is empty in 1 of 3 rows."]);

        // Someone without edit rights cannot start one.
        let denied = test::call_service(
            &app,
            as_user(
                TestRequest::post().uri(&format!("/api/data_sources/{}/analyze", source.id)),
                "bob",
            )
            .to_request(),
        )
        .await;
        assert_eq!(denied.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn url_imports_reject_bad_urls() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
        let response = test::call_service(
            &app,
            as_user(TestRequest::post().uri("/api/data_sources/url"), "alice")
                .set_json(json!({"name": "Remote", "url": "file:///etc/passwd"}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
