//! Anonymous, read-only access to published dashboards.
//!
//! * **`GET /api/public/{share_token}`**: the dashboard and its widgets.
//!   Unknown tokens and unpublished dashboards both answer 404. Viewers of a
//!   shared link cannot read data sources, so widgets without inline rows get
//!   their resolved rows embedded in `config.data` for this response only.

use crate::db::{dashboards, widgets, Database};
use crate::error::ApiError;
use crate::services::access::sources_for;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};
use common::chart::resolve;
use common::requests::PublicDashboard;
use rusqlite::Connection;

const API_PATH: &str = "/api/public";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{share_token}", get().to(process))
}

async fn process(
    db: web::Data<Database>,
    token: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    Ok(HttpResponse::Ok().json(public_dashboard(&conn, &token)?))
}

pub fn public_dashboard(conn: &Connection, share_token: &str) -> Result<PublicDashboard, ApiError> {
    let dashboard = dashboards::get_public(conn, share_token)?
        .ok_or_else(|| ApiError::NotFound("shared dashboard".into()))?;
    let mut list = widgets::list_for_dashboard(conn, &dashboard.id)?;
    for widget in &mut list {
        if widget.config.inline_rows().is_some() {
            continue;
        }
        let sources = sources_for(conn, widget)?;
        let resolution = resolve(&widget.config, widget.data_source_id.as_deref(), &sources);
        if !resolution.rows.is_empty() {
            widget.config.data = Some(resolution.rows);
        }
    }
    Ok(PublicDashboard {
        dashboard,
        widgets: list,
    })
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{as_user, TestState};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use common::model::dashboard::Dashboard;
    use common::requests::{CreatedWidget, PublicDashboard};
    use serde_json::json;

    #[actix_web::test]
    async fn shared_links_follow_the_public_flag() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let dashboard: Dashboard = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/dashboards"), "alice")
                .set_json(json!({"title": "Launch", "isPublic": true}))
                .to_request(),
        )
        .await;
        let token = dashboard.share_token.clone().unwrap();
        let _: CreatedWidget = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/widgets"), "alice")
                .set_json(json!({
                    "dashboardId": dashboard.id,
                    "type": "stat",
                    "title": "Signups",
                    "config": {"statValue": 42}
                }))
                .to_request(),
        )
        .await;

        let shared: PublicDashboard = test::call_and_read_body_json(
            &app,
            TestRequest::get().uri(&format!("/api/public/{}", token)).to_request(),
        )
        .await;
        assert_eq!(shared.dashboard.id, dashboard.id);
        assert_eq!(shared.widgets.len(), 1);

        let _: Dashboard = test::call_and_read_body_json(
            &app,
            as_user(
                TestRequest::patch().uri(&format!("/api/dashboards/{}", dashboard.id)),
                "alice",
            )
            .set_json(json!({"isPublic": false}))
            .to_request(),
        )
        .await;
        let hidden = test::call_service(
            &app,
            TestRequest::get().uri(&format!("/api/public/{}", token)).to_request(),
        )
        .await;
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

        let unknown = test::call_service(
            &app,
            TestRequest::get().uri("/api/public/not-a-token").to_request(),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    }
}
