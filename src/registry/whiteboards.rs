use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::models::Whiteboard;
use crate::store::Changeset;

use super::locks::LockKey;
use super::{Registry, RegistryResult};

impl Registry {
    /// Creates a whiteboard, joins its creator to it and makes it the
    /// creator's active whiteboard.
    #[instrument(skip(self))]
    pub async fn create_whiteboard(&self, creator: &str) -> RegistryResult<Whiteboard> {
        let _guard = self.locks.acquire(vec![LockKey::user(creator)]).await;

        let mut user = self.require_user(creator).await?;

        let whiteboard = Whiteboard::new(self.store.generate_id(), creator, OffsetDateTime::now_utc());
        user.active_whiteboard = Some(whiteboard.id.clone());

        self.store
            .commit(Changeset::new().whiteboard(whiteboard.clone()).user(user))
            .await?;

        info!(
            whiteboard_id = %whiteboard.id,
            connected_users = ?whiteboard.members,
            "created whiteboard"
        );
        Ok(whiteboard)
    }

    #[instrument(skip(self))]
    pub async fn get_whiteboard(&self, id: &str) -> RegistryResult<Whiteboard> {
        self.require_whiteboard(id).await
    }
}
