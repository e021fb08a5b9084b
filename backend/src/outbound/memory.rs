//! Process-local [`UserRepository`] adapter.
//!
//! Records live in a mutex-guarded map plus an ordering vector so listings
//! come back in insertion order. Contents vanish when the process exits.
//!
//! Ids are never handed out twice: allocation counts up from 1 and skips any
//! id a caller has already used, so an explicit id far ahead of the counter
//! leaves the ids below it available.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

#[derive(Debug, Default)]
struct Inner {
    /// Last id handed out by [`Inner::allocate`].
    allocated: u64,
    /// Caller-supplied ids above `allocated`; allocation steps over them.
    claimed: HashSet<UserId>,
    records: HashMap<UserId, User>,
    order: Vec<UserId>,
}

impl Inner {
    fn allocate(&mut self) -> Result<UserId, UserPersistenceError> {
        loop {
            let next = self
                .allocated
                .checked_add(1)
                .ok_or_else(|| UserPersistenceError::storage("id space exhausted"))?;
            self.allocated = next;
            let id =
                UserId::new(next).map_err(|err| UserPersistenceError::storage(err.to_string()))?;
            if !self.claimed.remove(&id) {
                return Ok(id);
            }
        }
    }

    /// Record a caller-supplied id so it is never allocated later.
    fn claim(&mut self, id: UserId) {
        if id.get() > self.allocated {
            self.claimed.insert(id);
        }
    }
}

/// In-memory user record store.
///
/// # Examples
/// ```
/// use user_registry::domain::ports::UserRepository;
/// use user_registry::domain::{EmailAddress, UserDraft, Username};
/// use user_registry::outbound::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryUserRepository::new();
/// let draft = UserDraft::new(
///     Username::new("ada").unwrap(),
///     EmailAddress::new("ada@example.com").unwrap(),
/// );
/// let saved = store.save(draft).await.unwrap();
/// assert_eq!(saved.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Mutex<Inner>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, UserPersistenceError> {
        self.inner
            .lock()
            .map_err(|_| UserPersistenceError::storage("record store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, draft: UserDraft) -> Result<User, UserPersistenceError> {
        let mut inner = self.lock()?;
        let id = match draft.id {
            Some(id) => {
                inner.claim(id);
                id
            }
            None => inner.allocate()?,
        };
        let user = draft.into_user(id);
        if inner.records.insert(id, user.clone()).is_none() {
            inner.order.push(id);
        }
        debug!(%id, "stored user record");
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let inner = self.lock()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id).cloned())
            .collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut inner = self.lock()?;
        let removed = inner.records.remove(&id).is_some();
        if removed {
            inner.order.retain(|stored| *stored != id);
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> Result<(), UserPersistenceError> {
        let mut inner = self.lock()?;
        inner.records.clear();
        inner.order.clear();
        Ok(())
    }
}
