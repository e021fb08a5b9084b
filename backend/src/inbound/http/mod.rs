//! HTTP inbound adapter serving the HTML record pages and login flow.

use actix_web::web;

pub mod access;
pub mod auth;
pub mod error;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

pub use error::ApiResult;

/// Register the login, logout, and record routes on `cfg`.
///
/// Middleware is left to the caller; see [`access::RequireLogin`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login_page)
        .service(auth::login_submit)
        .service(auth::logout)
        .configure(users::configure);
}
