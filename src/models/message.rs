use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use validator::Validate;

/// A persisted message as it appears on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: i64,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Row> for Message {
    /// Expects columns in the order `id, body, username, created_at, updated_at`.
    fn from(row: &Row) -> Self {
        Self {
            id: row.get(0),
            body: row.get(1),
            username: row.get(2),
            created_at: row.get(3),
            updated_at: row.get(4),
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    #[validate(required, length(min = 1))]
    pub body: Option<String>,
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
#[serde(deny_unknown_fields)]
pub struct UpdateMessageRequest {
    #[validate(required, length(min = 1))]
    pub body: Option<String>,
}

/// Fields of a message that has passed validation and is ready to insert.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub body: String,
    pub username: String,
}
