use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::models::{User, Whiteboard};

use super::{Changeset, Store, StoreResult};

const SCHEMA: [&str; 3] = [
    r#"CREATE TABLE IF NOT EXISTS users (
        username TEXT PRIMARY KEY NOT NULL,
        created_at TEXT NOT NULL,
        active_whiteboard TEXT REFERENCES whiteboards(id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS whiteboards (
        id TEXT PRIMARY KEY NOT NULL,
        creator TEXT NOT NULL REFERENCES users(username),
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS whiteboard_users (
        user_id TEXT NOT NULL REFERENCES users(username),
        whiteboard_id TEXT NOT NULL REFERENCES whiteboards(id),
        PRIMARY KEY (user_id, whiteboard_id)
    )"#,
];

#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Creates the tables if they don't exist yet.
    pub async fn migrate(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.db_pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn find_user(&self, username: &str) -> StoreResult<Option<User>> {
        let row: Option<(String, OffsetDateTime, Option<String>)> =
            sqlx::query_as("SELECT username,created_at,active_whiteboard FROM users WHERE username=?")
                .bind(username)
                .fetch_optional(&self.db_pool)
                .await?;

        Ok(row.map(|(username, created_at, active_whiteboard)| User {
            username,
            created_at,
            active_whiteboard,
        }))
    }

    async fn find_whiteboard(&self, id: &str) -> StoreResult<Option<Whiteboard>> {
        let mut tx = self.db_pool.begin().await?;

        let Some((id, creator, created_at)): Option<(String, String, OffsetDateTime)> =
            sqlx::query_as("SELECT id,creator,created_at FROM whiteboards WHERE id=?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
        else {
            return Ok(None);
        };

        let members: Vec<(String,)> =
            sqlx::query_as("SELECT user_id FROM whiteboard_users WHERE whiteboard_id=?")
                .bind(&id)
                .fetch_all(&mut *tx)
                .await?;
        tx.commit().await?;

        Ok(Some(Whiteboard {
            id,
            creator,
            created_at,
            members: members.into_iter().map(|(username,)| username).collect(),
        }))
    }

    async fn commit(&self, changeset: Changeset) -> StoreResult<()> {
        let mut tx = self.db_pool.begin().await?;

        for whiteboard in &changeset.whiteboards {
            sqlx::query("INSERT INTO whiteboards (id,creator,created_at) VALUES (?,?,?) ON CONFLICT(id) DO NOTHING")
                .bind(&whiteboard.id)
                .bind(&whiteboard.creator)
                .bind(whiteboard.created_at)
                .execute(&mut *tx)
                .await?;

            sqlx::query("DELETE FROM whiteboard_users WHERE whiteboard_id=?")
                .bind(&whiteboard.id)
                .execute(&mut *tx)
                .await?;

            for username in &whiteboard.members {
                sqlx::query("INSERT INTO whiteboard_users (user_id,whiteboard_id) VALUES (?,?)")
                    .bind(username)
                    .bind(&whiteboard.id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        for user in &changeset.users {
            sqlx::query(
                "INSERT INTO users (username,created_at,active_whiteboard) VALUES (?,?,?) \
                 ON CONFLICT(username) DO UPDATE SET active_whiteboard=excluded.active_whiteboard",
            )
            .bind(&user.username)
            .bind(user.created_at)
            .bind(&user.active_whiteboard)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
