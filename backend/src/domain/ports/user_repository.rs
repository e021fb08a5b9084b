//! Driven port for the user record store.
//!
//! The store owns id assignment: saving a draft without an id allocates the
//! next unused id, which is never handed out twice for the store's lifetime,
//! even after the record holding it is deleted.
use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user record store adapters.
    pub enum UserPersistenceError {
        /// The backing storage could not complete the operation.
        Storage { message: String } => "user store failed: {message}",
    }
}

/// Keyed collection of user records and its CRUD primitives.
///
/// All operations must be safe to call from concurrently handled requests;
/// id assignment is atomic with respect to other saves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new record or replace the one stored under `draft.id`.
    ///
    /// Returns the stored record with its id populated.
    async fn save(&self, draft: UserDraft) -> Result<User, UserPersistenceError>;

    /// Every stored record in insertion order.
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a record by id; `None` when absent.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Remove the record stored under `id`.
    ///
    /// Returns whether a record was removed; an absent id is not an error.
    async fn delete_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Remove every record. Id allocation is not reset.
    async fn delete_all(&self) -> Result<(), UserPersistenceError>;
}
