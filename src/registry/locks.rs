use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum LockKey {
    User(String),
    Whiteboard(String),
}

impl LockKey {
    pub(crate) fn user(username: &str) -> Self {
        Self::User(username.to_owned())
    }

    pub(crate) fn whiteboard(id: &str) -> Self {
        Self::Whiteboard(id.to_owned())
    }
}

type Table = Arc<Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>>;

/// Exclusive locks keyed by entity. Keys are always taken in sorted order,
/// and a key's slot is dropped once nobody holds or waits on it.
#[derive(Debug, Default)]
pub(crate) struct EntityLocks {
    table: Table,
}

impl EntityLocks {
    pub(crate) async fn acquire(&self, mut keys: Vec<LockKey>) -> EntityGuard {
        keys.sort();
        keys.dedup();

        let slots: Vec<_> = {
            let mut table = lock_table(&self.table);
            keys.iter()
                .map(|key| Arc::clone(table.entry(key.clone()).or_default()))
                .collect()
        };

        let mut guards = Vec::with_capacity(slots.len());
        for slot in slots {
            guards.push(slot.lock_owned().await);
        }

        EntityGuard {
            table: Arc::clone(&self.table),
            keys,
            guards,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        lock_table(&self.table).len()
    }
}

pub(crate) struct EntityGuard {
    table: Table,
    keys: Vec<LockKey>,
    guards: Vec<OwnedMutexGuard<()>>,
}

impl Drop for EntityGuard {
    fn drop(&mut self) {
        self.guards.clear();

        let mut table = lock_table(&self.table);
        for key in &self.keys {
            if table.get(key).is_some_and(|slot| Arc::strong_count(slot) == 1) {
                table.remove(key);
            }
        }
    }
}

fn lock_table(table: &Table) -> MutexGuard<'_, HashMap<LockKey, Arc<AsyncMutex<()>>>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}
