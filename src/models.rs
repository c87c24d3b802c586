use std::collections::BTreeSet;

use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub active_whiteboard: Option<String>,

    // unique: username
}

impl User {
    pub fn new(username: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            username: username.into(),
            created_at,
            active_whiteboard: None,
        }
    }

    pub fn is_active_in(&self, whiteboard_id: &str) -> bool {
        self.active_whiteboard.as_deref() == Some(whiteboard_id)
    }
}

/// A collaboration session and the users currently connected to it.
///
/// Members serialize as `connected_users`, sorted by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Whiteboard {
    pub id: String,
    pub creator: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "connected_users")]
    pub members: BTreeSet<String>,

    // unique: id
}

impl Whiteboard {
    /// Creates a whiteboard with its creator already joined.
    pub fn new(id: impl Into<String>, creator: impl Into<String>, created_at: OffsetDateTime) -> Self {
        let creator = creator.into();
        Self {
            id: id.into(),
            members: BTreeSet::from([creator.clone()]),
            creator,
            created_at,
        }
    }

    pub fn is_member(&self, username: &str) -> bool {
        self.members.contains(username)
    }

    /// Returns `false` if the user was already a member.
    pub fn add_member(&mut self, username: &str) -> bool {
        self.members.insert(username.to_owned())
    }

    /// Returns `false` if the user was not a member.
    pub fn remove_member(&mut self, username: &str) -> bool {
        self.members.remove(username)
    }
}
