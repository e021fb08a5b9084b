//! Login and logout handlers.
//!
//! ```text
//! GET  /login[?error|?logout]
//! POST /login-submit   username=..&password=..
//! POST /logout
//! ```
//!
//! Every outcome of a submission is a redirect: back to the login page with
//! `?error` on failure, on to the listing on success.

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::ports::{LoginNotice, View};
use crate::domain::{ErrorCode, LoginCredentials, LISTING_PATH, LOGIN_PATH};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{redirect, render};
use crate::inbound::http::ApiResult;

/// Query flags understood by the login page.
///
/// Flags are bare keys (`?error`), so only presence matters.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

impl LoginPageQuery {
    fn notice(&self) -> Option<LoginNotice> {
        if self.error.is_some() {
            Some(LoginNotice::InvalidCredentials)
        } else if self.logout.is_some() {
            Some(LoginNotice::LoggedOut)
        } else {
            None
        }
    }
}

/// Form body for `POST /login-submit`.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn failed_login_location() -> String {
    format!("{LOGIN_PATH}?error")
}

/// Render the login form.
#[get("/login")]
pub async fn login_page(
    state: web::Data<HttpState>,
    query: web::Query<LoginPageQuery>,
) -> ApiResult<HttpResponse> {
    render(
        state.renderer.as_ref(),
        &View::Login {
            notice: query.notice(),
        },
    )
}

/// Check submitted credentials and bind the principal to the session.
#[post("/login-submit")]
pub async fn login_submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm { username, password } = form.into_inner();
    let Ok(credentials) = LoginCredentials::try_from_parts(&username, &password) else {
        warn!("login rejected: blank credentials");
        return Ok(redirect(failed_login_location()));
    };

    match state.login.authenticate(&credentials).await {
        Ok(principal) => {
            session.persist_principal(&principal)?;
            info!(username = principal.name(), "login succeeded");
            Ok(redirect(LISTING_PATH))
        }
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            warn!(username = credentials.username(), "login rejected");
            Ok(redirect(failed_login_location()))
        }
        Err(error) => Err(error),
    }
}

/// Discard the session and return to the login page.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Some(principal) = session.principal() {
        info!(username = principal.name(), "logout");
    }
    session.purge();
    redirect(format!("{LOGIN_PATH}?logout"))
}

#[cfg(test)]
mod tests {
    //! Handler behaviour with a stubbed login port and the HTML renderer.
    use super::*;
    use crate::domain::ports::{MockLoginService, MockUserRecords};
    use crate::domain::{Error, Principal};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use crate::outbound::HtmlViewRenderer;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::header::LOCATION;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use rstest::rstest;
    use rstest_bdd_macros::{given, then, when};
    use std::sync::Arc;

    /// Login port accepting only `user`/`pass`.
    fn login_port() -> MockLoginService {
        let mut login = MockLoginService::new();
        login.expect_authenticate().returning(|credentials| {
            if credentials.username() == "user" && credentials.password() == "pass" {
                Ok(Principal::user("user"))
            } else {
                Err(Error::unauthorized("invalid credentials"))
            }
        });
        login
    }

    fn state(login: MockLoginService) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MockUserRecords::new()),
            Arc::new(login),
            Arc::new(HtmlViewRenderer::new()),
        ))
    }

    async fn call(login: MockLoginService, req: test::TestRequest) -> ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(state(login))
                .wrap(test_session_middleware())
                .service(login_page)
                .service(login_submit)
                .service(logout),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    fn location(res: &ServiceResponse) -> Option<&str> {
        res.headers().get(LOCATION).and_then(|value| value.to_str().ok())
    }

    /// Submitted `username`/`password` pair.
    #[derive(Clone)]
    struct LoginFields(&'static str, &'static str);

    #[given("valid credentials")]
    fn valid_credentials() -> LoginFields {
        LoginFields("user", "pass")
    }

    #[given("a wrong password")]
    fn a_wrong_password() -> LoginFields {
        LoginFields("user", "nope")
    }

    #[when("the login form is submitted")]
    fn the_login_form_is_submitted(fields: LoginFields) -> test::TestRequest {
        let LoginFields(username, password) = fields;
        test::TestRequest::post()
            .uri("/login-submit")
            .set_form([("username", username), ("password", password)])
    }

    #[then("the browser is sent to the listing with a session")]
    fn the_browser_is_sent_to_the_listing_with_a_session(res: &ServiceResponse) {
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(res), Some("/user"));
        assert!(session_cookie(res).is_some());
    }

    #[then("the browser is sent back to the login page with an error")]
    fn the_browser_is_sent_back_to_the_login_page_with_an_error(res: &ServiceResponse) {
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(res), Some("/login?error"));
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_credentials_sign_in() {
        let req = the_login_form_is_submitted(valid_credentials());
        let res = call(login_port(), req).await;
        the_browser_is_sent_to_the_listing_with_a_session(&res);
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_password_is_rejected() {
        let req = the_login_form_is_submitted(a_wrong_password());
        let res = call(login_port(), req).await;
        the_browser_is_sent_back_to_the_login_page_with_an_error(&res);
    }

    #[rstest]
    #[case(&[("username", "  "), ("password", "pass")])]
    #[case(&[("username", "user")])]
    #[actix_web::test]
    async fn blank_fields_never_reach_the_login_port(#[case] fields: &[(&str, &str)]) {
        let mut login = MockLoginService::new();
        login.expect_authenticate().never();
        let req = test::TestRequest::post()
            .uri("/login-submit")
            .set_form(fields);
        let res = call(login, req).await;
        assert_eq!(location(&res), Some("/login?error"));
    }

    #[rstest]
    #[actix_web::test]
    async fn port_failures_surface_as_errors() {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .returning(|_| Err(Error::internal("account store offline")));
        let res = call(login, the_login_form_is_submitted(valid_credentials())).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    #[case("/login?error", Some("Invalid username and password."))]
    #[case("/login?logout", Some("You have been logged out."))]
    #[case("/login", None)]
    #[actix_web::test]
    async fn login_page_reflects_query_flag(#[case] uri: &str, #[case] notice: Option<&str>) {
        let res = call(
            MockLoginService::new(),
            test::TestRequest::get().uri(uri),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(res).await.to_vec()).expect("utf8");
        assert!(body.contains("action=\"/login-submit\""));
        match notice {
            Some(text) => assert!(body.contains(text)),
            None => assert!(!body.contains("class=\"error\"") && !body.contains("class=\"notice\"")),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_redirects_with_flag() {
        let res = call(
            MockLoginService::new(),
            test::TestRequest::post().uri("/logout"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), Some("/login?logout"));
    }
}
