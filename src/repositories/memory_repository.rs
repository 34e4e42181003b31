//! In-process message store for tests and database-less runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::models::message::{Message, NewMessage};
use crate::repositories::message_repository::{MessageStore, StoreResult};

#[derive(Clone, Default)]
pub struct InMemoryMessageStore {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Default)]
struct InMemoryState {
    // Last id handed out; ids are never reused after deletion.
    last_id: i64,
    messages: BTreeMap<i64, Message>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn list_all(&self) -> StoreResult<Vec<Message>> {
        let state = self.state.read().await;
        let mut messages: Vec<Message> = state.messages.values().cloned().collect();
        messages.sort_by_key(|message| (message.created_at, message.id));
        Ok(messages)
    }

    async fn insert(&self, message: NewMessage, now: DateTime<Utc>) -> StoreResult<Message> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let message = Message {
            id: state.last_id,
            body: message.body,
            username: message.username,
            created_at: now,
            updated_at: now,
        };
        state.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Message>> {
        Ok(self.state.read().await.messages.get(&id).cloned())
    }

    async fn update_body(
        &self,
        id: i64,
        body: String,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Message>> {
        let mut state = self.state.write().await;
        let Some(message) = state.messages.get_mut(&id) else {
            return Ok(None);
        };

        message.body = body;
        message.updated_at = now.max(message.updated_at + Duration::microseconds(1));
        Ok(Some(message.clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        Ok(self.state.write().await.messages.remove(&id).is_some())
    }
}
