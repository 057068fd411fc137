//! Session-based route guard.
//!
//! Second consumer of the gate policy, for views that render after the edge
//! gate has already passed. The credential source is the in-memory session
//! rather than the raw token, so this can diverge from the edge gate's view
//! if persisted storage and the cookie fall out of sync; the edge gate always
//! wins on the next full request.

use auth_policy::{
    authorize, classify, GateDecision, RouteClass, TokenStatus, ADMIN_HOME_PATH, DASHBOARD_PATH,
    LOGIN_PATH,
};

use crate::session::Session;

/// Auth state as observed by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Session resolution still in flight. No decision yet; there is no
    /// timeout, an unresolved state waits forever.
    Loading,
    Anonymous,
    Authenticated(Session),
}

/// What the wrapped view should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    /// Keep showing the loading placeholder.
    Wait,
    /// Render the wrapped subtree.
    Render,
    Navigate(String),
}

/// Guard wrapping a page subtree.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    require_admin: bool,
    fallback: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGuard {
    pub fn new() -> Self {
        Self {
            require_admin: false,
            fallback: LOGIN_PATH.to_string(),
        }
    }

    pub fn admin_only() -> Self {
        Self {
            require_admin: true,
            fallback: LOGIN_PATH.to_string(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Re-check the gate decision from session state. Runs on mount and
    /// whenever session loading completes.
    pub fn check(&self, state: &AuthState, current_path: &str) -> GuardAction {
        let session = match state {
            AuthState::Loading => return GuardAction::Wait,
            AuthState::Anonymous => {
                tracing::debug!(path = %current_path, "route guard: no session, navigating to fallback");
                return GuardAction::Navigate(self.fallback.clone());
            }
            AuthState::Authenticated(session) => session,
        };

        // A session only exists while its token was decodable and unexpired,
        // so the policy sees an active credential here.
        let route = if self.require_admin {
            RouteClass::Protected { admin_only: true }
        } else {
            classify(current_path)
        };

        match authorize(route, TokenStatus::Active, session.user.role) {
            GateDecision::ToLogin => GuardAction::Navigate(self.fallback.clone()),
            GateDecision::ToDashboard => {
                tracing::debug!(path = %current_path, "route guard: non-admin on admin view");
                GuardAction::Navigate(DASHBOARD_PATH.to_string())
            }
            GateDecision::Allow => {
                // Admins do not linger on the user dashboard.
                if session.user.role.is_admin() && current_path.starts_with(DASHBOARD_PATH) {
                    return GuardAction::Navigate(ADMIN_HOME_PATH.to_string());
                }
                GuardAction::Render
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionUser;
    use auth_policy::Role;

    fn session(role: Role) -> Session {
        Session {
            user: SessionUser {
                id: Some("7".to_string()),
                email: None,
                role,
            },
            token: "a.b.c".to_string(),
        }
    }

    #[test]
    fn loading_state_waits_without_navigating() {
        let guard = RouteGuard::admin_only();
        assert_eq!(
            guard.check(&AuthState::Loading, "/admin/users"),
            GuardAction::Wait
        );
    }

    #[test]
    fn anonymous_navigates_to_fallback() {
        let guard = RouteGuard::new();
        assert_eq!(
            guard.check(&AuthState::Anonymous, "/dashboard"),
            GuardAction::Navigate("/login".to_string())
        );

        let guard = RouteGuard::new().with_fallback("/register");
        assert_eq!(
            guard.check(&AuthState::Anonymous, "/dashboard"),
            GuardAction::Navigate("/register".to_string())
        );
    }

    #[test]
    fn non_admin_on_admin_view_navigates_to_dashboard() {
        let guard = RouteGuard::admin_only();
        let state = AuthState::Authenticated(session(Role::User));
        assert_eq!(
            guard.check(&state, "/admin/users"),
            GuardAction::Navigate("/dashboard".to_string())
        );
    }

    #[test]
    fn admin_on_admin_view_renders() {
        let guard = RouteGuard::admin_only();
        let state = AuthState::Authenticated(session(Role::Admin));
        assert_eq!(guard.check(&state, "/admin/users"), GuardAction::Render);
    }

    #[test]
    fn user_on_dashboard_renders() {
        let guard = RouteGuard::new();
        let state = AuthState::Authenticated(session(Role::User));
        assert_eq!(guard.check(&state, "/dashboard/home"), GuardAction::Render);
    }

    #[test]
    fn admin_lingering_on_dashboard_navigates_to_admin_area() {
        let guard = RouteGuard::new();
        let state = AuthState::Authenticated(session(Role::Admin));
        assert_eq!(
            guard.check(&state, "/dashboard"),
            GuardAction::Navigate("/admin".to_string())
        );
        assert_eq!(
            guard.check(&state, "/dashboard/home"),
            GuardAction::Navigate("/admin".to_string())
        );
    }

    #[test]
    fn admin_outside_dashboard_renders() {
        let guard = RouteGuard::new();
        let state = AuthState::Authenticated(session(Role::Admin));
        assert_eq!(guard.check(&state, "/profile"), GuardAction::Render);
    }
}
