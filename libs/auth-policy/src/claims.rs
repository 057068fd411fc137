//! Claims evaluation: expiration state and effective role.

use serde::{Deserialize, Serialize};

use crate::token::Claims;

/// Closed role set. Role strings are normalized here, at the decode boundary,
/// instead of case-folded at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Case-insensitive parse. Anything that is not `"admin"` is an ordinary
    /// user; only the admin/non-admin distinction is observable downstream.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Tri-state credential status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// Parseable and not expired.
    Active,
    /// Parseable but `exp` is in the past.
    Expired,
    /// Missing or unparseable.
    Invalid,
}

impl Claims {
    /// Effective role: the namespaced claim wins over the plain `role` field
    /// when both are present.
    pub fn effective_role(&self) -> Role {
        self.role_claim
            .as_deref()
            .or(self.role.as_deref())
            .map(Role::parse)
            .unwrap_or(Role::User)
    }
}

/// Evaluate decoded claims against the current time (epoch seconds).
///
/// `None` claims mean the codec failed. A missing `exp` field never expires.
pub fn evaluate(claims: Option<&Claims>, now_epoch_secs: i64) -> TokenStatus {
    match claims {
        None => TokenStatus::Invalid,
        Some(claims) => match claims.exp {
            Some(exp) if exp < now_epoch_secs => TokenStatus::Expired,
            _ => TokenStatus::Active,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    fn claims(role: Option<&str>, role_claim: Option<&str>, exp: Option<i64>) -> Claims {
        Claims {
            role: role.map(str::to_owned),
            role_claim: role_claim.map(str::to_owned),
            exp,
            ..Claims::default()
        }
    }

    #[test]
    fn missing_claims_are_invalid() {
        assert_eq!(evaluate(None, NOW), TokenStatus::Invalid);
    }

    #[test]
    fn past_exp_is_expired() {
        let c = claims(Some("user"), None, Some(NOW - 1));
        assert_eq!(evaluate(Some(&c), NOW), TokenStatus::Expired);
    }

    #[test]
    fn future_exp_is_active() {
        let c = claims(Some("user"), None, Some(NOW + 3600));
        assert_eq!(evaluate(Some(&c), NOW), TokenStatus::Active);
    }

    #[test]
    fn exp_equal_to_now_is_active() {
        // Strict `exp < now` comparison.
        let c = claims(None, None, Some(NOW));
        assert_eq!(evaluate(Some(&c), NOW), TokenStatus::Active);
    }

    #[test]
    fn absent_exp_never_expires() {
        let c = claims(Some("admin"), None, None);
        assert_eq!(evaluate(Some(&c), NOW), TokenStatus::Active);
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("Admin"), Role::Admin);
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("user"), Role::User);
        assert_eq!(Role::parse("moderator"), Role::User);
        assert_eq!(Role::parse(""), Role::User);
    }

    #[test]
    fn namespaced_role_wins_over_plain_role() {
        let c = claims(Some("user"), Some("Admin"), None);
        assert_eq!(c.effective_role(), Role::Admin);

        let c = claims(Some("admin"), Some("user"), None);
        assert_eq!(c.effective_role(), Role::User);
    }

    #[test]
    fn plain_role_is_the_fallback() {
        let c = claims(Some("ADMIN"), None, None);
        assert_eq!(c.effective_role(), Role::Admin);
    }

    #[test]
    fn no_role_fields_means_user() {
        let c = claims(None, None, None);
        assert_eq!(c.effective_role(), Role::User);
    }
}
