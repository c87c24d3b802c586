use time::OffsetDateTime;
use tracing::{debug, info, instrument};

use crate::models::User;

use super::locks::LockKey;
use super::{Registry, RegistryError, RegistryResult};

impl Registry {
    /// Returns the existing user unchanged if `username` is already taken.
    #[instrument(skip(self))]
    pub async fn create_user(&self, username: &str) -> RegistryResult<User> {
        if username.trim().is_empty() {
            return Err(RegistryError::InvalidUsername);
        }

        let _guard = self.locks.acquire(vec![LockKey::user(username)]).await;

        if let Some(user) = self.store.find_user(username).await? {
            debug!("user already exists");
            return Ok(user);
        }

        let user = User::new(username, OffsetDateTime::now_utc());
        self.store.save_user(user.clone()).await?;

        info!("created user");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> RegistryResult<User> {
        self.require_user(username).await
    }
}
