//! Shared HTTP adapter state.
//!
//! Handlers take this through `web::Data` and only see domain ports, so tests
//! can swap any collaborator for a double.

use std::sync::Arc;

use crate::domain::ports::{LoginService, UserRecords, ViewRenderer};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub records: Arc<dyn UserRecords>,
    pub login: Arc<dyn LoginService>,
    pub renderer: Arc<dyn ViewRenderer>,
}

impl HttpState {
    /// Bundle the ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_registry::domain::ports::StaticAccountLoginService;
    /// use user_registry::domain::UserRecordsService;
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::{HtmlViewRenderer, InMemoryUserRepository};
    ///
    /// let state = HttpState::new(
    ///     Arc::new(UserRecordsService::new(Arc::new(InMemoryUserRepository::new()))),
    ///     Arc::new(StaticAccountLoginService::new("user", "pass")),
    ///     Arc::new(HtmlViewRenderer::new()),
    /// );
    /// let _renderer = state.renderer.clone();
    /// ```
    pub fn new(
        records: Arc<dyn UserRecords>,
        login: Arc<dyn LoginService>,
        renderer: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            records,
            login,
            renderer,
        }
    }
}
