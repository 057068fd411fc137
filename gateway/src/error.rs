use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::rest_api::models::Envelope;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Authentication required")]
    MissingBearer,

    #[error("Invalid Authorization header format")]
    MalformedBearer,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Photo exceeds the 10 MB upload limit")]
    PhotoTooLarge,

    #[error("Unsupported photo type: {0}")]
    UnsupportedPhotoType(String),

    /// Outbound call to the backend failed at the transport level. Surfaces
    /// as a generic 500; the underlying error goes to the logs only.
    #[error("Internal server error")]
    Upstream(#[from] reqwest::Error),
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingBearer | GatewayError::MalformedBearer => {
                StatusCode::UNAUTHORIZED
            }
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::PhotoTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::UnsupportedPhotoType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let GatewayError::Upstream(e) = self {
            tracing::error!("Backend call failed: {e}");
        }
        let status = self.status_code();
        HttpResponse::build(status).json(Envelope {
            status: status.as_u16(),
            data: None,
            message: Some(self.to_string()),
        })
    }
}

impl From<validator::ValidationErrors> for GatewayError {
    fn from(err: validator::ValidationErrors) -> Self {
        GatewayError::Validation(err.to_string())
    }
}
