//! Status catalog pass-through.

use actix_web::{get, web, HttpResponse};
use tracing::info;

use crate::clients::BackendClient;
use crate::error::Result;
use crate::rest_api::relay;

#[get("/api/statuses")]
pub async fn list_statuses(client: web::Data<BackendClient>) -> Result<HttpResponse> {
    info!("GET /api/statuses");

    let resp = client.http().get(client.url("/api/Status")).send().await?;

    Ok(relay(resp).await)
}
