//! Driving port for the record-management use-cases behind the router.
//!
//! Each method corresponds to one routed operation. Missing records and
//! failed validation are ordinary outcomes, not errors; `Err` is reserved for
//! the store itself failing.

use async_trait::async_trait;

use crate::domain::{Error, FieldErrors, User, UserForm, UserId};

/// Result of looking a record up by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(User),
    NotFound(UserId),
}

/// Result of a create (or save-with-id) submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was stored; redirect to its view path.
    Created(User),
    /// Nothing was stored; re-render the form with the original submission.
    Invalid { form: UserForm, errors: FieldErrors },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecords: Send + Sync {
    /// Every stored record.
    async fn list(&self) -> Result<Vec<User>, Error>;

    /// Record to display on the view page.
    async fn view(&self, id: UserId) -> Result<Lookup, Error>;

    /// Validate `form` and store it when no field errors are reported.
    async fn create(&self, form: UserForm) -> Result<CreateOutcome, Error>;

    /// Record to pre-fill the edit form with.
    async fn modify_form(&self, id: UserId) -> Result<Lookup, Error>;

    /// Delete by id; absent ids are a silent no-op.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}
