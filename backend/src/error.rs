//! The error type every handler returns.
//!
//! `ApiError` renders as a JSON body `{ "error": <code>, "message": <text> }`
//! with a status matching the variant. Storage and internal failures are
//! logged when rendered; their message is still returned to the caller.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::chart::ConfigError;
use common::requests::ApiErrorBody;
use log::{error, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("missing or empty X-User-Id header")]
    Unauthorized,
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("{0}")]
    Ingest(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized => "unauthorized",
            ApiError::Storage(_) => "storage",
            ApiError::Ingest(_) => "ingest",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("json encoding: {}", err))
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Ingest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Storage(_) | ApiError::Internal(_) => error!("{}", self),
            ApiError::Ingest(_) => warn!("{}", self),
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        })
    }
}
