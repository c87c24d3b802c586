//! Membership and active-whiteboard bookkeeping.
//!
//! [`Registry`] is the only writer of membership and of each user's
//! `active_whiteboard`. Every mutating operation holds the entity locks of
//! the user and whiteboard it touches, checks its preconditions against the
//! store and commits all of its writes as a single [`Changeset`].
//!
//! After every completed operation, a user whose `active_whiteboard` is `W`
//! is a member of `W`.
//!
//! [`Changeset`]: crate::store::Changeset

mod locks;
mod membership;
mod users;
mod whiteboards;

use std::sync::Arc;

use thiserror::Error;

use crate::models::{User, Whiteboard};
use crate::store::{Store, StoreError};

use locks::EntityLocks;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("User not found")]
    UserNotFound { username: String },

    #[error("Whiteboard not found")]
    WhiteboardNotFound { id: String },

    #[error("Username must not be empty")]
    InvalidUsername,

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound { .. } | Self::WhiteboardNotFound { .. })
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

pub struct Registry {
    store: Arc<dyn Store>,
    locks: EntityLocks,
}

impl Registry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            locks: EntityLocks::default(),
        }
    }

    async fn require_user(&self, username: &str) -> RegistryResult<User> {
        self.store
            .find_user(username)
            .await?
            .ok_or_else(|| RegistryError::UserNotFound {
                username: username.to_owned(),
            })
    }

    async fn require_whiteboard(&self, id: &str) -> RegistryResult<Whiteboard> {
        self.store
            .find_whiteboard(id)
            .await?
            .ok_or_else(|| RegistryError::WhiteboardNotFound { id: id.to_owned() })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::store::InMemoryStore;

    use super::Registry;

    pub(crate) fn registry() -> (Registry, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (Registry::new(store.clone()), store)
    }
}
