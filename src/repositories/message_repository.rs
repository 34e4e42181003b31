// repositories/message_repository.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use thiserror::Error;

use crate::models::message::{Message, NewMessage};

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// No connection could be taken from the pool
    #[error("Failed to get client from pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// The database rejected or failed a statement
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for messages.
///
/// Every method is a single atomic unit against the backend. `update_body` and
/// `delete` report a missing row instead of failing, so a row removed by a
/// concurrent request is indistinguishable from one that never existed.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Returns every message ordered by `created_at`, then `id`.
    async fn list_all(&self) -> StoreResult<Vec<Message>>;

    /// Stores a new message with `created_at` and `updated_at` both set to `now`.
    async fn insert(&self, message: NewMessage, now: DateTime<Utc>) -> StoreResult<Message>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Message>>;

    /// Replaces the body and bumps `updated_at`.
    ///
    /// The new `updated_at` is `now`, or one microsecond past the previous value
    /// when the clock has not advanced, so it always strictly increases.
    async fn update_body(
        &self,
        id: i64,
        body: String,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Message>>;

    /// Removes a message. Returns `false` when no row had that id.
    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

const MESSAGE_COLUMNS: &str = "id, body, username, created_at, updated_at";

/// PostgreSQL-backed message store
#[derive(Clone)]
pub struct PgMessageStore {
    pool: Pool,
}

impl PgMessageStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn list_all(&self) -> StoreResult<Vec<Message>> {
        let client = self.pool.get().await?;
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages ORDER BY created_at ASC, id ASC"
        );
        let rows = client.query(query.as_str(), &[]).await?;

        Ok(rows.iter().map(Message::from).collect())
    }

    async fn insert(&self, message: NewMessage, now: DateTime<Utc>) -> StoreResult<Message> {
        let client = self.pool.get().await?;
        let query = format!(
            "INSERT INTO messages (body, username, created_at, updated_at)
             VALUES ($1, $2, $3, $3)
             RETURNING {MESSAGE_COLUMNS}"
        );
        let row = client
            .query_one(query.as_str(), &[&message.body, &message.username, &now])
            .await?;

        Ok(Message::from(&row))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Message>> {
        let client = self.pool.get().await?;
        let query = format!("SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1");
        let row = client.query_opt(query.as_str(), &[&id]).await?;

        Ok(row.as_ref().map(Message::from))
    }

    async fn update_body(
        &self,
        id: i64,
        body: String,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Message>> {
        let client = self.pool.get().await?;
        let query = format!(
            "UPDATE messages
             SET body = $2,
                 updated_at = GREATEST($3, updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
             RETURNING {MESSAGE_COLUMNS}"
        );
        let row = client.query_opt(query.as_str(), &[&id, &body, &now]).await?;

        Ok(row.as_ref().map(Message::from))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM messages WHERE id = $1", &[&id])
            .await?;

        Ok(deleted > 0)
    }
}
