//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use user_registry::Trace;
use user_registry::domain::UserRecordsService;
use user_registry::domain::ports::StaticAccountLoginService;
use user_registry::inbound::http::access::RequireLogin;
use user_registry::inbound::http::configure;
use user_registry::inbound::http::session_config::SessionSettings;
use user_registry::inbound::http::state::HttpState;
use user_registry::outbound::{HtmlViewRenderer, InMemoryUserRepository};

/// One store, one login service, one renderer, shared by every worker.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let repository = Arc::new(InMemoryUserRepository::new());
    web::Data::new(HttpState::new(
        Arc::new(UserRecordsService::new(repository)),
        Arc::new(StaticAccountLoginService::new(
            config.account_username.as_str(),
            config.account_password.as_str(),
        )),
        Arc::new(HtmlViewRenderer::new()),
    ))
}

// `wrap` is applied outside-in from the last call: tracing sees every
// request, the guard runs with the session already loaded.
fn build_app(
    http_state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .configure(configure)
        .wrap(RequireLogin::default())
        .wrap(session.middleware())
        .wrap(Trace)
}

/// Construct the Actix HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let ServerConfig {
        session, bind_addr, ..
    } = config;

    let server = HttpServer::new(move || build_app(http_state.clone(), session.clone()))
        .bind(bind_addr)?
        .run();

    Ok(server)
}
