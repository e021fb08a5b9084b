//! Record-management service implementing the [`UserRecords`] driving port.
//!
//! Orchestrates validation and the record store. The service only branches
//! on "field errors present" versus "none"; what the messages say is decided
//! by [`UserForm::validate`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateOutcome, Lookup, UserPersistenceError, UserRecords, UserRepository,
};
use crate::domain::{Error, User, UserForm, UserId};

/// Record service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserRecordsService<R> {
    repo: Arc<R>,
}

impl<R> UserRecordsService<R> {
    /// Create a new service over the given store.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> UserRecordsService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Storage { message } => {
                Error::internal(format!("user store error: {message}"))
            }
        }
    }

    async fn lookup(&self, id: UserId) -> Result<Lookup, Error> {
        let found = self
            .repo
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?;
        Ok(match found {
            Some(user) => Lookup::Found(user),
            None => {
                debug!(%id, "user record not found");
                Lookup::NotFound(id)
            }
        })
    }
}

#[async_trait]
impl<R> UserRecords for UserRecordsService<R>
where
    R: UserRepository + 'static,
{
    async fn list(&self) -> Result<Vec<User>, Error> {
        self.repo
            .find_all()
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn view(&self, id: UserId) -> Result<Lookup, Error> {
        self.lookup(id).await
    }

    async fn create(&self, form: UserForm) -> Result<CreateOutcome, Error> {
        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(
                    fields = ?errors.fields().collect::<Vec<_>>(),
                    "user submission rejected"
                );
                return Ok(CreateOutcome::Invalid { form, errors });
            }
        };

        let replacing = draft.id;
        let user = self
            .repo
            .save(draft)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(id = %user.id(), replaced = replacing.is_some(), "user record saved");
        Ok(CreateOutcome::Created(user))
    }

    async fn modify_form(&self, id: UserId) -> Result<Lookup, Error> {
        self.lookup(id).await
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(%id, removed, "user record delete handled");
        Ok(())
    }
}
