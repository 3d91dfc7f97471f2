use crate::auth::AuthUser;
use crate::db::{organizations, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::model::organization::{MemberRole, OrganizationMember};
use common::requests::AddMemberRequest;
use log::info;
use rusqlite::Connection;

/// `POST /api/organizations/{id}/members`: adds a member or changes their
/// role. Only owners and admins may do this.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<String>,
    body: web::Json<AddMemberRequest>,
) -> Result<HttpResponse, ApiError> {
    let conn = db.connect()?;
    let member = add_member(&conn, &user, &id, body.into_inner())?;
    info!(
        "{} set {} as {} in organization {}",
        user.id(),
        member.user_id,
        member.role.as_str(),
        member.organization_id
    );
    Ok(HttpResponse::Ok().json(member))
}

pub fn add_member(
    conn: &Connection,
    user: &AuthUser,
    organization_id: &str,
    request: AddMemberRequest,
) -> Result<OrganizationMember, ApiError> {
    let organization = organizations::get(conn, organization_id)?
        .ok_or_else(|| ApiError::NotFound(format!("organization {}", organization_id)))?;
    match organizations::role_of(conn, &organization.id, user.id())? {
        None => {
            return Err(ApiError::NotFound(format!("organization {}", organization.id)));
        }
        Some(role) if !role.can_manage() => {
            return Err(ApiError::Forbidden(format!(
                "only owners and admins manage members of organization {}",
                organization.id
            )));
        }
        Some(_) => {}
    }

    let user_id = request.user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::BadRequest("member user id must not be empty".into()));
    }
    if request.role == MemberRole::Owner {
        return Err(ApiError::BadRequest("an organization has exactly one owner".into()));
    }
    if user_id == organization.owner_id {
        return Err(ApiError::BadRequest("the owner's role cannot be changed".into()));
    }

    let member = OrganizationMember {
        organization_id: organization.id,
        user_id: user_id.to_string(),
        role: request.role,
    };
    organizations::upsert_member(conn, &member)?;
    Ok(member)
}
