use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::models::{User, Whiteboard};

use super::{Changeset, Store, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, User>,
    whiteboards: HashMap<String, Whiteboard>,
}

/// Process-local store. Every commit is applied under a single lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    fail_commits: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following commit fail with [`StoreError::Unavailable`]
    /// until switched off again.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    pub fn users(&self) -> Vec<User> {
        self.tables().users.values().cloned().collect()
    }

    pub fn whiteboards(&self) -> Vec<Whiteboard> {
        self.tables().whiteboards.values().cloned().collect()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self.tables().users.get(username).cloned())
    }

    async fn find_whiteboard(&self, id: &str) -> StoreResult<Option<Whiteboard>> {
        Ok(self.tables().whiteboards.get(id).cloned())
    }

    async fn commit(&self, changeset: Changeset) -> StoreResult<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("commits disabled".to_owned()));
        }

        let mut tables = self.tables();
        for whiteboard in changeset.whiteboards {
            tables.whiteboards.insert(whiteboard.id.clone(), whiteboard);
        }
        for user in changeset.users {
            tables.users.insert(user.username.clone(), user);
        }
        Ok(())
    }
}
