// app_state.rs

use std::sync::Arc;

use crate::{repositories::message_repository::MessageStore, services::message_service::MessageService};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Message operations, backed by the store opened at startup
    pub messages: MessageService,
}

impl AppState {
    /// Creates a new instance of AppState
    ///
    /// # Arguments
    /// * `store` - The storage backend shared by every request
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            messages: MessageService::new(store),
        }
    }
}
