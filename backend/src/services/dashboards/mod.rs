//! # Dashboard Service Module
//!
//! Routes under `/api/dashboards`. Every route needs the `X-User-Id`
//! header; dashboards outside the caller's reach answer 404.
//!
//! ## Registered Routes
//!
//! * **`GET /`**: dashboards the caller can see (`list`).
//! * **`POST /`**: creates a dashboard (`create`). `isPublic: true` mints
//!   a share token.
//! * **`GET /{id}`**, **`PATCH /{id}`**, **`DELETE /{id}`**: read, partial
//!   update and delete (`get`, `update`, `delete`). Deleting removes the
//!   dashboard's widgets too.
//! * **`GET /{id}/widgets`**: the dashboard's widgets ordered by grid row,
//!   then column, then creation time (`widgets`).
//! * **`POST /{id}/insights`**: regenerates the insight text of every widget
//!   through the suggestion service (`insights`).

mod create;
mod delete;
mod get;
mod insights;
mod list;
mod update;
mod widgets;

use actix_web::web::{delete, get, patch, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/dashboards";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", patch().to(update::process))
        .route("/{id}", delete().to(delete::process))
        .route("/{id}/widgets", get().to(widgets::process))
        .route("/{id}/insights", post().to(insights::process))
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{as_user, TestState};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use common::model::dashboard::Dashboard;
    use common::model::widget::Widget;
    use common::requests::CreatedWidget;
    use serde_json::json;

    #[actix_web::test]
    async fn create_read_update_delete() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let created: Dashboard = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/dashboards"), "alice")
                .set_json(json!({"title": "Sales"}))
                .to_request(),
        )
        .await;
        assert_eq!(created.user_id, "alice");
        assert!(!created.is_public);
        assert_eq!(created.share_token, None);

        let listed: Vec<Dashboard> = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::get().uri("/api/dashboards"), "alice").to_request(),
        )
        .await;
        assert_eq!(listed.len(), 1);

        let hidden = test::call_service(
            &app,
            as_user(
                TestRequest::get().uri(&format!("/api/dashboards/{}", created.id)),
                "bob",
            )
            .to_request(),
        )
        .await;
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

        let published: Dashboard = test::call_and_read_body_json(
            &app,
            as_user(
                TestRequest::patch().uri(&format!("/api/dashboards/{}", created.id)),
                "alice",
            )
            .set_json(json!({"isPublic": true}))
            .to_request(),
        )
        .await;
        let token = published.share_token.clone().expect("token minted");

        // Toggling off and on keeps the same link.
        for is_public in [false, true] {
            let again: Dashboard = test::call_and_read_body_json(
                &app,
                as_user(
                    TestRequest::patch().uri(&format!("/api/dashboards/{}", created.id)),
                    "alice",
                )
                .set_json(json!({ "isPublic": is_public }))
                .to_request(),
            )
            .await;
            assert_eq!(again.share_token.as_deref(), Some(token.as_str()));
        }

        let deleted = test::call_service(
            &app,
            as_user(
                TestRequest::delete().uri(&format!("/api/dashboards/{}", created.id)),
                "alice",
            )
            .to_request(),
        )
        .await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn requests_without_a_user_are_rejected() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
        let response =
            test::call_service(&app, TestRequest::get().uri("/api/dashboards").to_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = test::call_service(
            &app,
            as_user(TestRequest::post().uri("/api/dashboards"), "alice")
                .set_json(json!({"title": "   "}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn widgets_list_in_grid_order_and_get_insights() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
        let dashboard: Dashboard = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/dashboards"), "alice")
                .set_json(json!({"title": "Ops"}))
                .to_request(),
        )
        .await;

        for (title, x, y) in [("bottom", 0, 3), ("top-right", 4, 0), ("top-left", 0, 0)] {
            let _: CreatedWidget = test::call_and_read_body_json(
                &app,
                as_user(TestRequest::post().uri("/api/widgets"), "alice")
                    .set_json(json!({
                        "dashboardId": dashboard.id,
                        "type": "bar",
                        "title": title,
                        "position": {"x": x, "y": y, "w": 4, "h": 3},
                        "config": {"data": [{"k": "a", "v": 1}, {"k": "b", "v": 3}]}
                    }))
                    .to_request(),
            )
            .await;
        }

        let listed: Vec<Widget> = test::call_and_read_body_json(
            &app,
            as_user(
                TestRequest::get().uri(&format!("/api/dashboards/{}/widgets", dashboard.id)),
                "alice",
            )
            .to_request(),
        )
        .await;
        let titles: Vec<&str> = listed.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["top-left", "top-right", "bottom"]);

        let refreshed: Vec<Widget> = test::call_and_read_body_json(
            &app,
            as_user(
                TestRequest::post().uri(&format!("/api/dashboards/{}/insights", dashboard.id)),
                "alice",
            )
            .to_request(),
        )
        .await;
        assert!(refreshed.iter().all(|w| w.ai_insights.is_some()));
    }
}
