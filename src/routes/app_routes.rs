// routes/app_routes.rs

use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{
    app_state::AppState,
    handlers::message_handlers::{create_message, delete_message, list_messages, update_message},
    repositories::message_repository::MessageStore,
};

pub fn create_router(store: Arc<dyn MessageStore>) -> Router {
    let state = AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/messages", get(list_messages).post(create_message))
        .route("/messages/:id", patch(update_message).delete(delete_message))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}
