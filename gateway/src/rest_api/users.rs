//! User administration pass-throughs. Both routes are admin operations; the
//! gateway requires the bearer header and the backend enforces the role.

use actix_web::{delete, get, web, HttpRequest, HttpResponse};
use tracing::info;

use crate::clients::BackendClient;
use crate::error::Result;
use crate::rest_api::{bearer_token, relay};

#[get("/api/users")]
pub async fn list_users(
    req: HttpRequest,
    client: web::Data<BackendClient>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    info!("GET /api/users");

    let resp = client
        .http()
        .get(client.url("/api/User"))
        .bearer_auth(token)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[delete("/api/users/{id}")]
pub async fn delete_user(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let id = path.into_inner();
    info!(user_id = %id, "DELETE /api/users/{id}");

    let resp = client
        .http()
        .delete(client.url(&format!("/api/User/{id}")))
        .bearer_auth(token)
        .send()
        .await?;

    Ok(relay(resp).await)
}
