//! HTTP server configuration object.

use std::net::SocketAddr;

use user_registry::inbound::http::session_config::SessionSettings;
use zeroize::Zeroizing;

/// Everything `create_server` needs besides the route table.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) account_username: String,
    pub(crate) account_password: Zeroizing<String>,
}

impl ServerConfig {
    /// Bundle session settings, the listener address, and the single
    /// account allowed to sign in.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        account_username: &str,
        account_password: Zeroizing<String>,
    ) -> Self {
        Self {
            session,
            bind_addr,
            account_username: account_username.to_owned(),
            account_password,
        }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
