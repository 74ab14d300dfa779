pub mod generate;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use icsgen_core::IcsError;
use serde::Serialize;
use tracing::{error, warn};

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// An error paired with the status code it is reported with
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn new(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        AppError {
            status,
            error: error.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{:#}", self.error);
        } else {
            warn!(status = %self.status, "{:#}", self.error);
        }

        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

/// Bad payloads are the client's fault, bad dates fail generation
impl From<IcsError> for AppError {
    fn from(err: IcsError) -> Self {
        let status = match err {
            IcsError::Decode(_) => StatusCode::BAD_REQUEST,
            IcsError::DateParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError::new(status, err)
    }
}
