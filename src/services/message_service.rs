// services/message_service.rs

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;
use validator::Validate;

use crate::{
    models::message::{CreateMessageRequest, Message, NewMessage, UpdateMessageRequest},
    repositories::message_repository::{MessageStore, StoreError},
};

pub const MISSING_CREATE_FIELDS: &str = "Missing 'body' or 'username'";
pub const MISSING_BODY: &str = "Missing 'body'";

#[derive(Error, Debug)]
pub enum ServiceError {
    /// A required field was absent, empty, or the payload was malformed
    #[error("{0}")]
    Validation(&'static str),

    #[error("Message not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Message lifecycle operations over an injected store.
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn MessageStore>,
}

impl MessageService {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Message>, ServiceError> {
        Ok(self.store.list_all().await?)
    }

    /// Validates and stores a new message.
    ///
    /// `None` stands for a payload that could not be read as a create request;
    /// it is reported the same way as a missing field.
    pub async fn create(
        &self,
        payload: Option<CreateMessageRequest>,
    ) -> Result<Message, ServiceError> {
        let new_message = payload
            .filter(|payload| payload.validate().is_ok())
            .and_then(|payload| {
                Some(NewMessage {
                    body: payload.body?,
                    username: payload.username?,
                })
            })
            .ok_or(ServiceError::Validation(MISSING_CREATE_FIELDS))?;

        let message = self.store.insert(new_message, Utc::now()).await?;
        debug!("Created message {} for {}", message.id, message.username);
        Ok(message)
    }

    /// Replaces a message body. An unknown id is reported before a bad payload.
    pub async fn update(
        &self,
        id: i64,
        payload: Option<UpdateMessageRequest>,
    ) -> Result<Message, ServiceError> {
        let body = payload
            .filter(|payload| payload.validate().is_ok())
            .and_then(|payload| payload.body);

        let Some(body) = body else {
            return match self.store.find_by_id(id).await? {
                Some(_) => Err(ServiceError::Validation(MISSING_BODY)),
                None => Err(ServiceError::NotFound),
            };
        };

        let message = self
            .store
            .update_body(id, body, Utc::now())
            .await?
            .ok_or(ServiceError::NotFound)?;
        debug!("Updated message {}", message.id);
        Ok(message)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound);
        }
        debug!("Deleted message {}", id);
        Ok(())
    }
}
