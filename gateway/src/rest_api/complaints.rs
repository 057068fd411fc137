//! Complaint pass-throughs.
//!
//! POST   /api/complaints              - submit (multipart, optional photo)
//! GET    /api/complaints              - list (backend scopes admin vs own)
//! GET    /api/complaints/{id}         - single complaint
//! PATCH  /api/complaints/{id}/status  - admin status update
//! DELETE /api/complaints/{id}         - remove complaint

use actix_multipart::Multipart;
use actix_web::{delete, get, patch, post, web, HttpRequest, HttpResponse};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::clients::BackendClient;
use crate::error::{GatewayError, Result};
use crate::rest_api::{bearer_token, relay};

const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_PHOTO_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
];

#[derive(Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintForm {
    #[validate(length(min = 5, max = 200, message = "title must be 5-200 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 2000, message = "description must be 10-2000 characters"))]
    pub description: String,

    #[validate(length(min = 1, message = "category is required"))]
    pub category_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug)]
struct Photo {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "status is required"))]
    pub status_id: String,
}

#[post("/api/complaints")]
pub async fn submit_complaint(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?.to_string();
    info!("POST /api/complaints");

    let (form, photo) = read_complaint_form(payload).await?;
    form.validate()?;
    if let Some(photo) = &photo {
        validate_photo(&photo.content_type, photo.bytes.len())?;
    }

    let mut outbound = reqwest::multipart::Form::new()
        .text("title", form.title)
        .text("description", form.description)
        .text("categoryId", form.category_id);
    if let Some(latitude) = form.latitude {
        outbound = outbound.text("latitude", latitude.to_string());
    }
    if let Some(longitude) = form.longitude {
        outbound = outbound.text("longitude", longitude.to_string());
    }
    if let Some(photo) = photo {
        let part = reqwest::multipart::Part::bytes(photo.bytes)
            .file_name(photo.filename)
            .mime_str(&photo.content_type)?;
        outbound = outbound.part("photo", part);
    }

    let resp = client
        .http()
        .post(client.url("/api/Complaint"))
        .bearer_auth(token)
        .multipart(outbound)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[get("/api/complaints")]
pub async fn list_complaints(
    req: HttpRequest,
    client: web::Data<BackendClient>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    info!("GET /api/complaints");

    // The backend scopes the listing: admins see everything, users see their
    // own complaints.
    let resp = client
        .http()
        .get(client.url("/api/Complaint"))
        .bearer_auth(token)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[get("/api/complaints/{id}")]
pub async fn get_complaint(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let id = path.into_inner();
    info!(complaint_id = %id, "GET /api/complaints/{id}");

    let resp = client
        .http()
        .get(client.url(&format!("/api/Complaint/{id}")))
        .bearer_auth(token)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[patch("/api/complaints/{id}/status")]
pub async fn update_complaint_status(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    body.validate()?;
    let id = path.into_inner();
    info!(complaint_id = %id, status_id = %body.status_id, "PATCH /api/complaints/{id}/status");

    // Admin-only on the backend side; the gateway forwards the credential and
    // passes the backend's verdict through.
    let resp = client
        .http()
        .put(client.url(&format!("/api/Complaint/{id}/status")))
        .bearer_auth(token)
        .json(&*body)
        .send()
        .await?;

    Ok(relay(resp).await)
}

#[delete("/api/complaints/{id}")]
pub async fn delete_complaint(
    req: HttpRequest,
    client: web::Data<BackendClient>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let token = bearer_token(&req)?;
    let id = path.into_inner();
    info!(complaint_id = %id, "DELETE /api/complaints/{id}");

    let resp = client
        .http()
        .delete(client.url(&format!("/api/Complaint/{id}")))
        .bearer_auth(token)
        .send()
        .await?;

    Ok(relay(resp).await)
}

/// Collect multipart fields into the complaint form plus the optional photo.
/// The photo stream is bounded while reading so an oversized upload fails
/// before it is buffered whole.
async fn read_complaint_form(mut payload: Multipart) -> Result<(ComplaintForm, Option<Photo>)> {
    let mut form = ComplaintForm::default();
    let mut photo = None;

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| GatewayError::Validation(format!("invalid multipart payload: {e}")))?;
        let name = field.name().to_string();

        match name.as_str() {
            "title" => form.title = read_text_field(&mut field, &name).await?,
            "description" => form.description = read_text_field(&mut field, &name).await?,
            "categoryId" => form.category_id = read_text_field(&mut field, &name).await?,
            "latitude" => form.latitude = Some(read_coord_field(&mut field, &name).await?),
            "longitude" => form.longitude = Some(read_coord_field(&mut field, &name).await?),
            "photo" => {
                // A photo part without a Content-Type cannot pass the
                // allow-list; the empty string fails the mime parse below.
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_default();
                let filename = field
                    .content_disposition()
                    .get_filename()
                    .unwrap_or("photo")
                    .to_string();

                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        GatewayError::Validation(format!("error reading photo: {e}"))
                    })?;
                    if bytes.len() + chunk.len() > MAX_PHOTO_BYTES {
                        return Err(GatewayError::PhotoTooLarge);
                    }
                    bytes.extend_from_slice(&chunk);
                }

                photo = Some(Photo {
                    filename,
                    content_type,
                    bytes,
                });
            }
            // Unknown fields are drained and ignored.
            _ => while field.next().await.is_some() {},
        }
    }

    Ok((form, photo))
}

async fn read_text_field(field: &mut actix_multipart::Field, name: &str) -> Result<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|e| GatewayError::Validation(format!("error reading {name}: {e}")))?;
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf)
        .map_err(|_| GatewayError::Validation(format!("{name} must be valid UTF-8")))
}

async fn read_coord_field(field: &mut actix_multipart::Field, name: &str) -> Result<f64> {
    read_text_field(field, name)
        .await?
        .trim()
        .parse()
        .map_err(|_| GatewayError::Validation(format!("{name} must be a number")))
}

fn validate_photo(content_type: &str, size_bytes: usize) -> Result<()> {
    let mime: mime::Mime = content_type
        .parse()
        .map_err(|_| GatewayError::UnsupportedPhotoType(content_type.to_string()))?;
    if !ALLOWED_PHOTO_TYPES.contains(&mime.essence_str()) {
        return Err(GatewayError::UnsupportedPhotoType(content_type.to_string()));
    }
    if size_bytes > MAX_PHOTO_BYTES {
        return Err(GatewayError::PhotoTooLarge);
    }
    Ok(())
}
