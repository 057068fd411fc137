//! Category pass-throughs. Listing is public (the submit form needs it);
//! mutations require a bearer credential, enforced for role by the backend.

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::clients::BackendClient;
use crate::error::Result;
use crate::rest_api::{bearer_token, relay};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[get("/api/categories")]
pub async fn list_categories(client: web::Data<BackendClient>) -> Result<HttpResponse> {
    info!("GET /api/categories");

    let resp = client
        .http()
        .get(client.url("/api/Category"))
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[post("/api/categories")]
pub async fn create_category(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    body.validate()?;
    info!(name = %body.name, "POST /api/categories");

    let resp = client
        .http()
        .post(client.url("/api/Category"))
        .bearer_auth(token)
        .json(&*body)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[put("/api/categories/{id}")]
pub async fn update_category(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    path: web::Path<String>,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    body.validate()?;
    let id = path.into_inner();
    info!(category_id = %id, "PUT /api/categories/{id}");

    let resp = client
        .http()
        .put(client.url(&format!("/api/Category/{id}")))
        .bearer_auth(token)
        .json(&*body)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[delete("/api/categories/{id}")]
pub async fn delete_category(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let id = path.into_inner();
    info!(category_id = %id, "DELETE /api/categories/{id}");

    let resp = client
        .http()
        .delete(client.url(&format!("/api/Category/{id}")))
        .bearer_auth(token)
        .send()
        .await?;

    Ok(relay(resp).await)
}
