use tracing::{debug, info, instrument};

use crate::models::Whiteboard;
use crate::store::Changeset;

use super::locks::LockKey;
use super::{Registry, RegistryResult};

impl Registry {
    /// Joins `username` to the whiteboard and makes it their active one.
    ///
    /// An existing member is left untouched, including their active pointer.
    #[instrument(skip(self))]
    pub async fn join(&self, whiteboard_id: &str, username: &str) -> RegistryResult<Whiteboard> {
        let _guard = self
            .locks
            .acquire(vec![LockKey::whiteboard(whiteboard_id), LockKey::user(username)])
            .await;

        let mut whiteboard = self.require_whiteboard(whiteboard_id).await?;
        let mut user = self.require_user(username).await?;

        if !whiteboard.add_member(username) {
            debug!("already a member");
            return Ok(whiteboard);
        }

        user.active_whiteboard = Some(whiteboard.id.clone());
        self.store
            .commit(Changeset::new().whiteboard(whiteboard.clone()).user(user))
            .await?;

        info!(connected_users = ?whiteboard.members, "joined whiteboard");
        Ok(whiteboard)
    }

    /// Removes `username` from the whiteboard and clears their active
    /// whiteboard, whichever whiteboard it pointed at.
    #[instrument(skip(self))]
    pub async fn leave(&self, whiteboard_id: &str, username: &str) -> RegistryResult<Whiteboard> {
        let _guard = self
            .locks
            .acquire(vec![LockKey::whiteboard(whiteboard_id), LockKey::user(username)])
            .await;

        let mut whiteboard = self.require_whiteboard(whiteboard_id).await?;
        let mut user = self.require_user(username).await?;

        if !whiteboard.remove_member(username) {
            debug!("not a member");
            return Ok(whiteboard);
        }

        // TODO: only clear when it points at this whiteboard, once the intended
        // semantics are confirmed. Today a user who left a background whiteboard
        // also loses the pointer to their current one.
        user.active_whiteboard = None;
        self.store
            .commit(Changeset::new().whiteboard(whiteboard.clone()).user(user))
            .await?;

        info!(connected_users = ?whiteboard.members, "left whiteboard");
        Ok(whiteboard)
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::testing::registry;
    use crate::registry::RegistryError;

    #[tokio::test]
    async fn join_adds_member_and_sets_active() {
        let (registry, _) = registry();
        registry.create_user("alice").await.unwrap();
        registry.create_user("bob").await.unwrap();
        let whiteboard = registry.create_whiteboard("alice").await.unwrap();

        let joined = registry.join(&whiteboard.id, "bob").await.unwrap();

        assert!(joined.is_member("alice"));
        assert!(joined.is_member("bob"));
        assert!(registry.get_user("bob").await.unwrap().is_active_in(&whiteboard.id));
        assert_eq!(registry.get_whiteboard(&whiteboard.id).await.unwrap(), joined);
    }

    #[tokio::test]
    async fn rejoining_changes_nothing() {
        let (registry, _) = registry();
        registry.create_user("alice").await.unwrap();
        let first = registry.create_whiteboard("alice").await.unwrap();
        let second = registry.create_whiteboard("alice").await.unwrap();

        // alice is still a member of `first` but active in `second`
        let rejoined = registry.join(&first.id, "alice").await.unwrap();

        assert_eq!(rejoined, registry.get_whiteboard(&first.id).await.unwrap());
        assert_eq!(rejoined.members.len(), 1);
        assert!(registry.get_user("alice").await.unwrap().is_active_in(&second.id));
    }

    #[tokio::test]
    async fn leave_removes_member_and_clears_active() {
        let (registry, _) = registry();
        registry.create_user("alice").await.unwrap();
        let whiteboard = registry.create_whiteboard("alice").await.unwrap();

        let left = registry.leave(&whiteboard.id, "alice").await.unwrap();

        assert!(left.members.is_empty());
        assert_eq!(left.creator, "alice");
        assert_eq!(registry.get_user("alice").await.unwrap().active_whiteboard, None);
    }

    #[tokio::test]
    async fn leaving_a_background_whiteboard_clears_active() {
        let (registry, _) = registry();
        registry.create_user("alice").await.unwrap();
        let first = registry.create_whiteboard("alice").await.unwrap();
        let second = registry.create_whiteboard("alice").await.unwrap();

        registry.leave(&first.id, "alice").await.unwrap();

        assert_eq!(registry.get_user("alice").await.unwrap().active_whiteboard, None);
        assert!(registry.get_whiteboard(&second.id).await.unwrap().is_member("alice"));
    }

    #[tokio::test]
    async fn leaving_as_non_member_is_a_no_op() {
        let (registry, _) = registry();
        registry.create_user("alice").await.unwrap();
        registry.create_user("bob").await.unwrap();
        let whiteboard = registry.create_whiteboard("alice").await.unwrap();
        let bobs = registry.create_whiteboard("bob").await.unwrap();

        let unchanged = registry.leave(&whiteboard.id, "bob").await.unwrap();

        assert_eq!(unchanged, whiteboard);
        assert!(registry.get_user("bob").await.unwrap().is_active_in(&bobs.id));
    }

    #[tokio::test]
    async fn whiteboard_is_checked_before_user() {
        let (registry, _) = registry();
        registry.create_user("alice").await.unwrap();
        let whiteboard = registry.create_whiteboard("alice").await.unwrap();

        let err = registry.join("missing", "ghost").await.unwrap_err();
        assert!(matches!(err, RegistryError::WhiteboardNotFound { .. }));

        let err = registry.join(&whiteboard.id, "ghost").await.unwrap_err();
        assert!(matches!(err, RegistryError::UserNotFound { .. }));

        let err = registry.leave("missing", "alice").await.unwrap_err();
        assert!(matches!(err, RegistryError::WhiteboardNotFound { .. }));

        let err = registry.leave(&whiteboard.id, "ghost").await.unwrap_err();
        assert!(matches!(err, RegistryError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn failed_join_leaves_state_unchanged() {
        let (registry, store) = registry();
        registry.create_user("alice").await.unwrap();
        registry.create_user("bob").await.unwrap();
        let whiteboard = registry.create_whiteboard("alice").await.unwrap();

        store.fail_commits(true);
        let err = registry.join(&whiteboard.id, "bob").await.unwrap_err();
        assert!(matches!(err, RegistryError::Storage(_)));
        let err = registry.leave(&whiteboard.id, "alice").await.unwrap_err();
        assert!(matches!(err, RegistryError::Storage(_)));
        store.fail_commits(false);

        assert_eq!(registry.get_whiteboard(&whiteboard.id).await.unwrap(), whiteboard);
        assert_eq!(registry.get_user("bob").await.unwrap().active_whiteboard, None);
        assert!(registry.get_user("alice").await.unwrap().is_active_in(&whiteboard.id));
    }
}
