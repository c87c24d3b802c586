//! Persistence seam for the registry.
//!
//! A registry operation reads through [`Store::find_user`] and
//! [`Store::find_whiteboard`], then hands every write it makes to
//! [`Store::commit`] as one [`Changeset`]. A store must apply a changeset
//! entirely or not at all.

mod memory;
mod sqlite;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{User, Whiteboard};

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Writes submitted together by one registry operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    pub whiteboards: Vec<Whiteboard>,
    pub users: Vec<User>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn whiteboard(mut self, whiteboard: Whiteboard) -> Self {
        self.whiteboards.push(whiteboard);
        self
    }

    pub fn user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.whiteboards.is_empty() && self.users.is_empty()
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_whiteboard(&self, id: &str) -> StoreResult<Option<Whiteboard>>;

    /// Applies all writes in `changeset` atomically. Whiteboards are written
    /// before users. A whiteboard write replaces its whole member set.
    async fn commit(&self, changeset: Changeset) -> StoreResult<()>;

    async fn save_user(&self, user: User) -> StoreResult<()> {
        self.commit(Changeset::new().user(user)).await
    }

    async fn save_whiteboard(&self, whiteboard: Whiteboard) -> StoreResult<()> {
        self.commit(Changeset::new().whiteboard(whiteboard)).await
    }

    fn generate_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}
