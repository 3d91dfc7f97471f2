//! Caller identity and access rules.
//!
//! Sign-in happens elsewhere; requests carry the already-authenticated user
//! id in `X-User-Id`. Items are visible to their owner and to members of the
//! organization they belong to. Changing an item takes ownership or an
//! owner/admin role in its organization.
//!
//! Items a caller cannot see are reported as missing rather than forbidden,
//! so ids of other users' items are not confirmed.

use crate::db::organizations;
use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use log::warn;
use rusqlite::Connection;

pub const USER_HEADER: &str = "X-User-Id";

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| AuthUser(value.to_string()));
        ready(user.ok_or(ApiError::Unauthorized))
    }
}

/// Ownership of something the access rules apply to.
#[derive(Debug, Clone, Copy)]
pub struct Owned<'a> {
    pub kind: &'static str,
    pub id: &'a str,
    pub user_id: &'a str,
    pub organization_id: Option<&'a str>,
}

pub fn can_view(conn: &Connection, user: &AuthUser, item: Owned<'_>) -> Result<bool, ApiError> {
    if item.user_id == user.id() {
        return Ok(true);
    }
    match item.organization_id {
        Some(org) => Ok(organizations::role_of(conn, org, user.id())?.is_some()),
        None => Ok(false),
    }
}

pub fn can_edit(conn: &Connection, user: &AuthUser, item: Owned<'_>) -> Result<bool, ApiError> {
    if item.user_id == user.id() {
        return Ok(true);
    }
    match item.organization_id {
        Some(org) => Ok(organizations::role_of(conn, org, user.id())?
            .map(|role| role.can_manage())
            .unwrap_or(false)),
        None => Ok(false),
    }
}

/// Fails with `NotFound` when the caller cannot see the item.
pub fn ensure_view(conn: &Connection, user: &AuthUser, item: Owned<'_>) -> Result<(), ApiError> {
    if can_view(conn, user, item)? {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("{} {}", item.kind, item.id)))
    }
}

/// Fails with `NotFound` when the caller cannot see the item and with
/// `Forbidden` when they can see but not change it.
pub fn ensure_edit(conn: &Connection, user: &AuthUser, item: Owned<'_>) -> Result<(), ApiError> {
    ensure_view(conn, user, item)?;
    if can_edit(conn, user, item)? {
        return Ok(());
    }
    warn!(
        "user {} may not modify {} {}",
        user.id(),
        item.kind,
        item.id
    );
    Err(ApiError::Forbidden(format!(
        "not allowed to modify {} {}",
        item.kind, item.id
    )))
}

/// The caller must be able to place items into `organization_id`.
pub fn ensure_member(
    conn: &Connection,
    user: &AuthUser,
    organization_id: Option<&str>,
) -> Result<(), ApiError> {
    let Some(org) = organization_id else {
        return Ok(());
    };
    match organizations::role_of(conn, org, user.id())? {
        Some(role) if role != common::model::organization::MemberRole::Viewer => Ok(()),
        Some(_) => Err(ApiError::Forbidden(format!(
            "viewers cannot add items to organization {}",
            org
        ))),
        None => Err(ApiError::NotFound(format!("organization {}", org))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::temp_database;
    use actix_web::test::TestRequest;
    use common::model::organization::{MemberRole, Organization, OrganizationMember};

    fn user(id: &str) -> AuthUser {
        AuthUser(id.to_string())
    }

    #[actix_web::test]
    async fn extractor_requires_a_non_empty_header() {
        let req = TestRequest::default()
            .insert_header((USER_HEADER, "alice"))
            .to_http_request();
        let extracted = AuthUser::extract(&req).await.unwrap();
        assert_eq!(extracted.id(), "alice");

        let req = TestRequest::default()
            .insert_header((USER_HEADER, "  "))
            .to_http_request();
        assert!(matches!(
            AuthUser::extract(&req).await,
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn roles_decide_what_members_may_change() {
        let db = temp_database();
        let mut conn = db.database.connect().unwrap();
        organizations::insert(
            &mut conn,
            &Organization {
                id: "org".into(),
                name: "Acme".into(),
                owner_id: "owner".into(),
                created_at: crate::db::now(),
            },
        )
        .unwrap();
        for (user_id, role) in [("admin", MemberRole::Admin), ("viewer", MemberRole::Viewer)] {
            organizations::upsert_member(
                &conn,
                &OrganizationMember {
                    organization_id: "org".into(),
                    user_id: user_id.into(),
                    role,
                },
            )
            .unwrap();
        }

        let item = Owned {
            kind: "dashboard",
            id: "d1",
            user_id: "someone",
            organization_id: Some("org"),
        };
        assert!(ensure_edit(&conn, &user("admin"), item).is_ok());
        assert!(matches!(
            ensure_edit(&conn, &user("viewer"), item),
            Err(ApiError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_view(&conn, &user("stranger"), item),
            Err(ApiError::NotFound(_))
        ));
        assert!(ensure_member(&conn, &user("viewer"), Some("org")).is_err());
        assert!(ensure_member(&conn, &user("admin"), Some("org")).is_ok());
    }
}
