//! # Organization Service Module
//!
//! Routes under `/api/organizations`. Organizations group users so that
//! dashboards and data sources placed in one are visible to its members and
//! editable by its owner and admins.
//!
//! * **`POST /`**: creates an organization owned by the caller (`create`).
//! * **`GET /`**: the caller's organizations (`list`).
//! * **`POST /{id}/members`**: adds a member or changes a role; owner or
//!   admin only (`members`).

mod create;
mod list;
mod members;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/organizations";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("", get().to(list::process))
        .route("/{id}/members", post().to(members::process))
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{as_user, TestState};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use common::model::dashboard::Dashboard;
    use common::model::organization::{MemberRole, Organization, OrganizationMember};
    use serde_json::json;

    #[actix_web::test]
    async fn members_see_and_admins_edit_org_dashboards() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

        let org: Organization = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/organizations"), "alice")
                .set_json(json!({"name": "Acme"}))
                .to_request(),
        )
        .await;
        assert_eq!(org.owner_id, "alice");

        for (user, role) in [("bob", "viewer"), ("carol", "admin")] {
            let member: OrganizationMember = test::call_and_read_body_json(
                &app,
                as_user(
                    TestRequest::post().uri(&format!("/api/organizations/{}/members", org.id)),
                    "alice",
                )
                .set_json(json!({"userId": user, "role": role}))
                .to_request(),
            )
            .await;
            assert_eq!(member.user_id, user);
        }

        let listed: Vec<Organization> = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::get().uri("/api/organizations"), "bob").to_request(),
        )
        .await;
        assert_eq!(listed, vec![org.clone()]);

        let dashboard: Dashboard = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/dashboards"), "alice")
                .set_json(json!({"title": "Shared", "organizationId": org.id}))
                .to_request(),
        )
        .await;

        // Viewers read but cannot edit; admins edit.
        let seen = test::call_service(
            &app,
            as_user(
                TestRequest::get().uri(&format!("/api/dashboards/{}", dashboard.id)),
                "bob",
            )
            .to_request(),
        )
        .await;
        assert_eq!(seen.status(), StatusCode::OK);
        let denied = test::call_service(
            &app,
            as_user(
                TestRequest::patch().uri(&format!("/api/dashboards/{}", dashboard.id)),
                "bob",
            )
            .set_json(json!({"title": "Mine"}))
            .to_request(),
        )
        .await;
        assert_eq!(denied.status(), StatusCode::FORBIDDEN);
        let edited = test::call_service(
            &app,
            as_user(
                TestRequest::patch().uri(&format!("/api/dashboards/{}", dashboard.id)),
                "carol",
            )
            .set_json(json!({"title": "Renamed"}))
            .to_request(),
        )
        .await;
        assert_eq!(edited.status(), StatusCode::OK);

        // Viewers cannot manage members, nor place dashboards in the org.
        let forbidden = test::call_service(
            &app,
            as_user(
                TestRequest::post().uri(&format!("/api/organizations/{}/members", org.id)),
                "bob",
            )
            .set_json(json!({"userId": "dave", "role": "member"}))
            .to_request(),
        )
        .await;
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        let placed = test::call_service(
            &app,
            as_user(TestRequest::post().uri("/api/dashboards"), "bob")
                .set_json(json!({"title": "Sneaky", "organizationId": org.id}))
                .to_request(),
        )
        .await;
        assert_eq!(placed.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn the_owner_role_is_fixed() {
        let state = TestState::new();
        let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;
        let org: Organization = test::call_and_read_body_json(
            &app,
            as_user(TestRequest::post().uri("/api/organizations"), "alice")
                .set_json(json!({"name": "Acme"}))
                .to_request(),
        )
        .await;

        for body in [
            json!({"userId": "alice", "role": "viewer"}),
            json!({"userId": "bob", "role": "owner"}),
        ] {
            let response = test::call_service(
                &app,
                as_user(
                    TestRequest::post().uri(&format!("/api/organizations/{}/members", org.id)),
                    "alice",
                )
                .set_json(body)
                .to_request(),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        let conn = state.database().connect().unwrap();
        assert_eq!(
            crate::db::organizations::role_of(&conn, &org.id, "alice").unwrap(),
            Some(MemberRole::Owner)
        );
    }
}
