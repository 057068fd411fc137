//! Client-side session mirror.
//!
//! The session is the guard's credential source: user identity + role + the
//! issued token, persisted as JSON in a pluggable backend and duplicated into
//! the `token` cookie so the edge gate can read it. Lifecycle: created on
//! login, rehydrated on startup, destroyed on logout or detected expiration.

use actix_web::cookie::{time::OffsetDateTime, Cookie};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use auth_policy::{decode_claims, evaluate, Role, TokenStatus};

/// Cookie the edge gate reads.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub token: String,
}

impl Session {
    /// Cookie mirror of the token, path `/`, set on login.
    pub fn cookie(&self) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, self.token.clone())
            .path("/")
            .finish()
    }
}

/// Cookie with an immediate past expiry, used to clear the mirror on logout.
pub fn clear_token_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(TOKEN_COOKIE, "").path("/").finish();
    cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
    cookie
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token has no readable claims")]
    InvalidToken,

    #[error("token is expired")]
    ExpiredToken,

    #[error("session persistence failed: {0}")]
    Persistence(#[from] serde_json::Error),
}

/// Persistent storage seam for the session JSON.
pub trait SessionBackend {
    fn load(&self) -> Option<String>;
    fn save(&mut self, raw: &str);
    fn clear(&mut self);
}

/// In-memory backend for tests and for callers that manage persistence
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    raw: Option<String>,
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Option<String> {
        self.raw.clone()
    }

    fn save(&mut self, raw: &str) {
        self.raw = Some(raw.to_string());
    }

    fn clear(&mut self) {
        self.raw = None;
    }
}

/// Session store with an explicit lifecycle over an injected backend.
pub struct SessionStore<B: SessionBackend> {
    backend: B,
    current: Option<Session>,
}

impl<B: SessionBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    /// Create a session from a freshly issued token (login). The token is
    /// decoded, not verified; expired or undecodable tokens are refused.
    pub fn create(&mut self, token: &str, now_epoch_secs: i64) -> Result<Session, SessionError> {
        let claims = decode_claims(token).ok_or(SessionError::InvalidToken)?;
        match evaluate(Some(&claims), now_epoch_secs) {
            TokenStatus::Active => {}
            TokenStatus::Expired => return Err(SessionError::ExpiredToken),
            TokenStatus::Invalid => return Err(SessionError::InvalidToken),
        }

        let session = Session {
            user: SessionUser {
                id: claims.sub.clone().or_else(|| claims.nameid.clone()),
                email: claims.email.clone(),
                role: claims.effective_role(),
            },
            token: token.to_string(),
        };

        self.backend.save(&serde_json::to_string(&session)?);
        self.current = Some(session.clone());
        Ok(session)
    }

    /// Rehydrate from persisted storage (startup). Unreadable or expired
    /// sessions are destroyed rather than surfaced.
    pub fn rehydrate(&mut self, now_epoch_secs: i64) -> Option<&Session> {
        let raw = self.backend.load()?;
        let session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("dropping unreadable persisted session: {e}");
                self.destroy();
                return None;
            }
        };

        let claims = decode_claims(&session.token);
        if evaluate(claims.as_ref(), now_epoch_secs) != TokenStatus::Active {
            tracing::info!("persisted session expired, destroying");
            self.destroy();
            return None;
        }

        self.current = Some(session);
        self.current.as_ref()
    }

    /// Destroy the session (logout or detected expiration).
    pub fn destroy(&mut self) {
        self.backend.clear();
        self.current = None;
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }
}
