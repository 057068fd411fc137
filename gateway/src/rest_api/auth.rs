//! Login and registration pass-throughs.
//!
//! POST /api/auth/login    - forward credentials, returns the issued token
//! POST /api/auth/register - forward the registration form

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::clients::BackendClient;
use crate::error::Result;
use crate::rest_api::relay;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "full name must be 2-100 characters"))]
    pub full_name: String,

    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[post("/api/auth/login")]
pub async fn login(
    client: web::Data<BackendClient>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    body.validate()?;
    info!(email = %body.email, "POST /api/auth/login");

    let resp = client
        .http()
        .post(client.url("/api/User/login"))
        .json(&*body)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[post("/api/auth/register")]
pub async fn register(
    client: web::Data<BackendClient>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    body.validate()?;
    info!(email = %body.email, "POST /api/auth/register");

    let resp = client
        .http()
        .post(client.url("/api/User/register"))
        .json(&*body)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_requires_valid_email() {
        let req = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_err());

        let req = LoginRequest {
            email: "citizen@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn register_request_bounds() {
        let req = RegisterRequest {
            full_name: "A".to_string(),
            email: "citizen@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(req.validate().is_err());

        let req = RegisterRequest {
            full_name: "Ada Citizen".to_string(),
            email: "citizen@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());

        let req = RegisterRequest {
            full_name: "Ada Citizen".to_string(),
            email: "citizen@example.com".to_string(),
            password: "longenough".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
