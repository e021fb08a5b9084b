//! Outbound adapters implementing the driven domain ports.
//!
//! - **memory**: process-local record store.
//! - **html**: HTML view renderer.
//!
//! Adapters translate between domain types and their representation; they
//! hold no business rules.

pub mod html;
pub mod memory;

pub use html::HtmlViewRenderer;
pub use memory::InMemoryUserRepository;
