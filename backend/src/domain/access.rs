//! Access guard: per-request authentication decision.
//!
//! The guard is a pure function of the request path and the session's
//! current principal. It never talks to the record store and never fails;
//! an anonymous request to a protected path is answered with a redirect to
//! the login page rather than an error status.

use crate::domain::{Principal, Role};

/// Login form page; always reachable.
pub const LOGIN_PATH: &str = "/login";
/// Login form submission endpoint.
pub const LOGIN_SUBMIT_PATH: &str = "/login-submit";
/// Logout endpoint.
pub const LOGOUT_PATH: &str = "/logout";
/// Application root.
pub const ROOT_PATH: &str = "/";
/// Default record listing.
pub const LISTING_PATH: &str = "/user";

/// Authentication state of a client session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

impl AuthState {
    /// Derive the state from the session's principal, if any.
    pub fn of(principal: Option<&Principal>) -> Self {
        match principal {
            Some(_) => Self::Authenticated,
            None => Self::Anonymous,
        }
    }
}

/// Outcome of classifying a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Hand the request to the router.
    Permit,
    /// Answer with a redirect to `location`; the router never sees it.
    Redirect { location: String },
    /// Authenticated, but the principal lacks the required role.
    Deny,
}

impl AccessDecision {
    fn redirect(location: &str) -> Self {
        Self::Redirect {
            location: location.to_owned(),
        }
    }
}

/// Path layout the guard classifies against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    pub login_page: String,
    pub login_submit: String,
    pub logout: String,
    pub root: String,
    pub listing: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login_page: LOGIN_PATH.to_owned(),
            login_submit: LOGIN_SUBMIT_PATH.to_owned(),
            logout: LOGOUT_PATH.to_owned(),
            root: ROOT_PATH.to_owned(),
            listing: LISTING_PATH.to_owned(),
        }
    }
}

/// Classifies each request as permitted, redirected, or denied.
///
/// # Examples
/// ```
/// use user_registry::domain::{AccessDecision, AccessGuard, Principal};
///
/// let guard = AccessGuard::default();
/// assert_eq!(
///     guard.decide("/user", None),
///     AccessDecision::Redirect { location: "/login".into() }
/// );
/// assert_eq!(
///     guard.decide("/user", Some(&Principal::user("user"))),
///     AccessDecision::Permit
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AccessGuard {
    paths: GuardPaths,
    required_role: Role,
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new(GuardPaths::default(), Role::User)
    }
}

impl AccessGuard {
    pub fn new(paths: GuardPaths, required_role: Role) -> Self {
        Self {
            paths,
            required_role,
        }
    }

    pub fn paths(&self) -> &GuardPaths {
        &self.paths
    }

    /// Whether `path` is reachable without authentication.
    pub fn is_public(&self, path: &str) -> bool {
        let path = normalise(path);
        [
            &self.paths.login_page,
            &self.paths.login_submit,
            &self.paths.logout,
        ]
        .into_iter()
        .any(|public| public == path)
    }

    /// Classify a request for `path` made by a session holding `principal`.
    pub fn decide(&self, path: &str, principal: Option<&Principal>) -> AccessDecision {
        if self.is_public(path) {
            return AccessDecision::Permit;
        }

        let Some(principal) = principal else {
            return AccessDecision::redirect(&self.paths.login_page);
        };

        if !principal.has_role(self.required_role) {
            return AccessDecision::Deny;
        }

        if normalise(path) == self.paths.root {
            return AccessDecision::redirect(&self.paths.listing);
        }

        AccessDecision::Permit
    }
}

fn normalise(path: &str) -> &str {
    if path.is_empty() { ROOT_PATH } else { path }
}
