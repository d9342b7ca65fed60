//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deskshare_common::Error;
use tracing::{debug, warn};

/// Wraps a library error so handlers can return it with `?`
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::MissingParameter(_) | Error::InvalidParameter(_) | Error::Decode(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::TokenNotFound | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ProcessLaunch { .. } | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        if status.is_server_error() {
            warn!("{}", message);
        } else {
            debug!("Rejected request: {}", message);
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
