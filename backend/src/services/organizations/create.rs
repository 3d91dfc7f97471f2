use crate::auth::AuthUser;
use crate::db::{now, organizations, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::model::organization::Organization;
use common::requests::CreateOrganizationRequest;
use log::info;
use uuid::Uuid;

/// `POST /api/organizations`: the caller becomes its owner.
pub async fn process(
    user: AuthUser,
    db: web::Data<Database>,
    body: web::Json<CreateOrganizationRequest>,
) -> Result<HttpResponse, ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("organization name must not be empty".into()));
    }
    let organization = Organization {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        owner_id: user.id().to_string(),
        created_at: now(),
    };
    let mut conn = db.connect()?;
    organizations::insert(&mut conn, &organization)?;
    info!("organization {} created by {}", organization.id, user.id());
    Ok(HttpResponse::Created().json(organization))
}
