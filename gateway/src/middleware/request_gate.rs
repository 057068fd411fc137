//! Edge request gate.
//!
//! Runs once per incoming request before anything renders. Credential comes
//! from the `token` cookie first, then from `Authorization: Bearer`. The
//! decision itself lives in `auth-policy`; this middleware only supplies the
//! credential and turns the decision into an HTTP redirect or a pass-through.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};

use auth_policy::{
    authorize, classify, decode_claims, evaluate, GateDecision, Role, RouteClass,
    DASHBOARD_PATH, LOGIN_PATH,
};

use crate::session::TOKEN_COOKIE;

/// Request gate middleware.
pub struct RequestGate;

impl<S, B> Transform<S, ServiceRequest> for RequestGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestGateService { service }))
    }
}

pub struct RequestGateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();
        let route = classify(&path);

        // Exempt and public routes bypass the gate without touching the
        // credential.
        if matches!(route, RouteClass::Exempt | RouteClass::Public) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let credential = extract_credential(&req);
        let claims = credential.as_deref().and_then(decode_claims);
        let status = evaluate(claims.as_ref(), chrono::Utc::now().timestamp());
        let role = claims
            .as_ref()
            .map(|c| c.effective_role())
            .unwrap_or(Role::User);

        match authorize(route, status, role) {
            GateDecision::Allow => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            GateDecision::ToLogin => {
                tracing::warn!(
                    path = %path,
                    token_present = credential.is_some(),
                    token_status = ?status,
                    "request gate: no usable credential, redirecting to login"
                );
                let location = format!(
                    "{}?redirect={}",
                    LOGIN_PATH,
                    urlencoding::encode(&path)
                );
                redirect(req, location)
            }
            GateDecision::ToDashboard => {
                tracing::warn!(
                    path = %path,
                    "request gate: non-admin credential on admin route, redirecting to dashboard"
                );
                redirect(req, DASHBOARD_PATH.to_string())
            }
        }
    }
}

/// Cookie first, `Authorization: Bearer` header as the fallback.
fn extract_credential(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn redirect<B: 'static>(
    req: ServiceRequest,
    location: String,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    let (request, _payload) = req.into_parts();
    let response = HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
        .map_into_right_body();
    Box::pin(async move { Ok(ServiceResponse::new(request, response)) })
}
