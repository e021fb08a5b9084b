//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! check credentials without knowing where accounts are configured. HTTP
//! handler tests substitute a double instead of wiring configuration.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, Principal};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    ///
    /// A mismatch is reported as [`crate::domain::ErrorCode::Unauthorized`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}

/// Authenticator backed by a single configured account holding the `USER`
/// role.
///
/// # Examples
/// ```
/// use user_registry::domain::ports::{LoginService, StaticAccountLoginService};
/// use user_registry::domain::LoginCredentials;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let service = StaticAccountLoginService::new("user", "pass");
/// let creds = LoginCredentials::try_from_parts("user", "pass").unwrap();
/// let principal = service.authenticate(&creds).await.unwrap();
/// assert_eq!(principal.name(), "user");
/// # });
/// ```
#[derive(Clone)]
pub struct StaticAccountLoginService {
    username: String,
    password: Zeroizing<String>,
}

impl StaticAccountLoginService {
    /// Configure the single accepted account.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Name of the configured account.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

impl std::fmt::Debug for StaticAccountLoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAccountLoginService")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LoginService for StaticAccountLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        if credentials.username() == self.username
            && credentials.password() == self.password.as_str()
        {
            Ok(Principal::user(credentials.username()))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ErrorCode, Role};
    use rstest::rstest;

    #[rstest]
    #[case("user", "pass", true)]
    #[case("user", "wrong", false)]
    #[case("other", "pass", false)]
    #[case("user", "pass ", false)]
    #[tokio::test]
    async fn static_account_matches_exactly(
        #[case] username: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let service = StaticAccountLoginService::new("user", "pass");
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        let result = service.authenticate(&creds).await;
        match (should_succeed, result) {
            (true, Ok(principal)) => {
                assert_eq!(principal.name(), "user");
                assert!(principal.has_role(Role::User));
            }
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(principal)) => panic!("expected failure, got success: {principal:?}"),
        }
    }

    #[rstest]
    fn debug_output_omits_password() {
        let service = StaticAccountLoginService::new("user", "s3cret");
        assert!(!format!("{service:?}").contains("s3cret"));
    }
}
