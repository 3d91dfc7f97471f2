//! HTTP API.
//!
//! Each submodule owns one resource and exposes `configure_routes()`
//! returning its scope; `configure` mounts them all. Handlers are named
//! `process` and delegate to a plain function over a database connection,
//! which is where the behavior lives and what the tests drive.

pub mod access;
pub mod dashboards;
pub mod data_sources;
pub mod jobs;
pub mod organizations;
pub mod public;
pub mod widgets;

#[cfg(test)]
pub mod testing;

use crate::error::ApiError;
use actix_web::web;

/// Mounts every API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboards::configure_routes())
        .service(widgets::configure_routes())
        .service(data_sources::configure_routes())
        .service(jobs::configure_routes())
        .service(organizations::configure_routes())
        .service(public::configure_routes());
}

/// JSON body settings: size limit and errors in the API's error shape.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// URL-safe random token for share links.
pub fn mint_share_token() -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    URL_SAFE_NO_PAD.encode(uuid::Uuid::new_v4().as_bytes())
}
