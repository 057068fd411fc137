//! Pass-through API handlers.
//!
//! Each handler validates its input, requires or forwards the bearer header,
//! performs exactly one outbound call to the remote CitiWatch backend, and
//! reshapes the `{status, data, message}` envelope. No retries, no state.

use actix_web::{http::header, http::StatusCode, web, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::{error, warn};

pub mod auth;
pub mod categories;
pub mod complaints;
pub mod models;
pub mod statuses;
pub mod users;

use crate::error::{GatewayError, Result};
use models::Envelope;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::register)
        .service(complaints::submit_complaint)
        .service(complaints::list_complaints)
        .service(complaints::get_complaint)
        .service(complaints::update_complaint_status)
        .service(complaints::delete_complaint)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(statuses::list_statuses)
        .service(users::list_users)
        .service(users::delete_user);
}

/// Extract the raw token from `Authorization: Bearer <token>`. Handlers only
/// check presence and shape; the backend does the actual verification.
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<&str> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(GatewayError::MissingBearer)?;

    header
        .strip_prefix("Bearer ")
        .ok_or(GatewayError::MalformedBearer)
}

/// Reshape a backend response into the gateway envelope, passing the remote
/// status code through verbatim.
pub(crate) async fn relay(resp: reqwest::Response) -> HttpResponse {
    let status = StatusCode::from_u16(resp.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match resp.json::<Value>().await {
        Ok(body) => body,
        Err(e) => {
            error!("Unreadable backend response body: {e}");
            Value::Null
        }
    };

    if !status.is_success() {
        warn!(status = status.as_u16(), "Backend returned non-success");
    }

    HttpResponse::build(status).json(Envelope::from_remote(status.as_u16(), body))
}
