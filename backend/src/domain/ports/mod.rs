//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod user_records;
mod user_repository;
mod view_renderer;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, StaticAccountLoginService};
#[cfg(test)]
pub use user_records::MockUserRecords;
pub use user_records::{CreateOutcome, Lookup, UserRecords};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use view_renderer::MockViewRenderer;
pub use view_renderer::{FormMode, LoginNotice, View, ViewRenderer};
