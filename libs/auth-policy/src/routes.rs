//! Route classification over fixed prefix sets.
//!
//! Callers supply already-normalized paths; there is no trailing-slash or
//! case normalization here.

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ADMIN_HOME_PATH: &str = "/admin";

/// Prefixes the gate intercepts. Every admin prefix is also protected.
const PROTECTED_PREFIXES: &[&str] = &[ADMIN_HOME_PATH, DASHBOARD_PATH];
const ADMIN_PREFIXES: &[&str] = &[ADMIN_HOME_PATH];

/// Never gated, including nested sub-paths. Checked before anything else to
/// prevent redirect loops.
const EXEMPT_PREFIXES: &[&str] = &[LOGIN_PATH, REGISTER_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login/register tree; allowed before any token inspection.
    Exempt,
    /// Everything outside the protected prefixes.
    Public,
    Protected {
        admin_only: bool,
    },
}

/// Classify a request path against the fixed prefix sets.
pub fn classify(path: &str) -> RouteClass {
    if EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return RouteClass::Exempt;
    }
    if !PROTECTED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return RouteClass::Public;
    }
    RouteClass::Protected {
        admin_only: ADMIN_PREFIXES.iter().any(|p| path.starts_with(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_register_are_exempt() {
        assert_eq!(classify("/login"), RouteClass::Exempt);
        assert_eq!(classify("/register"), RouteClass::Exempt);
        assert_eq!(classify("/login/reset"), RouteClass::Exempt);
    }

    #[test]
    fn paths_outside_protected_prefixes_are_public() {
        assert_eq!(classify("/"), RouteClass::Public);
        assert_eq!(classify("/about"), RouteClass::Public);
        assert_eq!(classify("/api/categories"), RouteClass::Public);
    }

    #[test]
    fn dashboard_tree_is_protected_but_not_admin_only() {
        assert_eq!(
            classify("/dashboard"),
            RouteClass::Protected { admin_only: false }
        );
        assert_eq!(
            classify("/dashboard/home"),
            RouteClass::Protected { admin_only: false }
        );
    }

    #[test]
    fn admin_tree_is_protected_and_admin_only() {
        assert_eq!(classify("/admin"), RouteClass::Protected { admin_only: true });
        assert_eq!(
            classify("/admin/users"),
            RouteClass::Protected { admin_only: true }
        );
    }
}
