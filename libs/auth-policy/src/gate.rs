//! Gate policy: the single allow/redirect decision.
//!
//! Both the edge request gate and the client route guard call [`authorize`]
//! with their own credential source, so the policy lives in exactly one
//! place.

use crate::claims::{evaluate, Role, TokenStatus};
use crate::routes::{classify, RouteClass};
use crate::token::decode_claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through.
    Allow,
    /// Missing, malformed, or expired credential on a protected route.
    ToLogin,
    /// Valid credential without the admin role on an admin-only route.
    ToDashboard,
}

/// Pure gate decision from pre-evaluated inputs.
pub fn authorize(route: RouteClass, status: TokenStatus, role: Role) -> GateDecision {
    match route {
        RouteClass::Exempt | RouteClass::Public => GateDecision::Allow,
        RouteClass::Protected { admin_only } => match status {
            TokenStatus::Invalid | TokenStatus::Expired => GateDecision::ToLogin,
            TokenStatus::Active if admin_only && !role.is_admin() => GateDecision::ToDashboard,
            TokenStatus::Active => GateDecision::Allow,
        },
    }
}

/// Full edge-side evaluation from the raw token: classify, decode, evaluate,
/// decide. Exempt and public routes never inspect the token.
pub fn authorize_token(path: &str, token: Option<&str>, now_epoch_secs: i64) -> GateDecision {
    let route = classify(path);
    if matches!(route, RouteClass::Exempt | RouteClass::Public) {
        return GateDecision::Allow;
    }
    let claims = token.and_then(decode_claims);
    let status = evaluate(claims.as_ref(), now_epoch_secs);
    let role = claims
        .as_ref()
        .map(|c| c.effective_role())
        .unwrap_or(Role::User);
    authorize(route, status, role)
}
