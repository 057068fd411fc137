//! Bearer-token payload codec.
//!
//! Tokens are three dot-separated base64url segments (`header.payload.sig`).
//! Only the payload segment is read here. The signature is never checked at
//! this layer; the remote backend validates every forwarded credential.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

/// Namespaced role claim key. Takes precedence over the plain `role` field
/// when both are present.
pub const ROLE_CLAIM_KEY: &str =
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Claims carried in the token payload. All fields are optional; unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(
        default,
        rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role_claim: Option<String>,

    /// Expiration instant, epoch seconds. Absent means the token never
    /// expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Decode the payload segment of a bearer token into [`Claims`].
///
/// Returns `None` when the token has fewer than two segments or when the
/// payload segment is not base64url-encoded JSON.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    let bytes = decode_segment(payload)?;
    serde_json::from_slice(&bytes).ok()
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    // Tokens in the wild carry both padded and unpadded payload segments.
    URL_SAFE_NO_PAD.decode(segment.trim_end_matches('=')).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_segment(json: &str) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    fn token_with_payload(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            encode_segment(r#"{"alg":"HS256","typ":"JWT"}"#),
            encode_segment(payload)
        )
    }

    #[test]
    fn decodes_payload_segment() {
        let token = token_with_payload(
            r#"{"sub":"42","email":"citizen@example.com","role":"user","exp":1900000000}"#,
        );
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert_eq!(claims.email.as_deref(), Some("citizen@example.com"));
        assert_eq!(claims.role.as_deref(), Some("user"));
        assert_eq!(claims.exp, Some(1_900_000_000));
    }

    #[test]
    fn decodes_namespaced_role_claim() {
        let token = token_with_payload(&format!(r#"{{"{}":"Admin"}}"#, ROLE_CLAIM_KEY));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role_claim.as_deref(), Some("Admin"));
        assert_eq!(claims.role, None);
    }

    #[test]
    fn ignores_unknown_fields() {
        let token = token_with_payload(r#"{"role":"user","iat":1,"jti":"x","custom":[1,2]}"#);
        assert!(decode_claims(&token).is_some());
    }

    #[test]
    fn accepts_padded_payload_segment() {
        let padded = base64::engine::general_purpose::URL_SAFE.encode(r#"{"role":"user"}"#);
        let token = format!("h.{padded}.s");
        assert!(decode_claims(&token).is_some());
    }

    #[test]
    fn rejects_single_segment() {
        assert_eq!(decode_claims("not-a-token"), None);
    }

    #[test]
    fn rejects_unparseable_payload() {
        // Valid base64 that is not JSON.
        let token = format!("h.{}.s", URL_SAFE_NO_PAD.encode("garbage"));
        assert_eq!(decode_claims(&token), None);
        // Not base64 at all.
        assert_eq!(decode_claims("h.!!not-base64!!.s"), None);
        // Empty payload segment.
        assert_eq!(decode_claims("h..s"), None);
    }

    #[test]
    fn no_signature_is_still_decoded() {
        // The codec never looks at the third segment.
        let token = format!("h.{}.", encode_segment(r#"{"role":"admin"}"#));
        assert!(decode_claims(&token).is_some());
    }
}
