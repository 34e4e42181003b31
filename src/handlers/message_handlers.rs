use axum::{
    debug_handler,
    extract::{rejection::JsonRejection, rejection::PathRejection, Path},
    response::{IntoResponse, Response},
    Extension, Json,
};
use hyper::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::error;

use crate::{
    app_state::AppState,
    models::message::{CreateMessageRequest, Message, UpdateMessageRequest},
    services::message_service::ServiceError,
};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::Validation(message) => (StatusCode::BAD_REQUEST, *message),
            ServiceError::NotFound => (StatusCode::NOT_FOUND, "Message not found"),
            ServiceError::Store(e) => {
                error!("Storage failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Reads a request payload, accepting only a JSON object that matches `T` exactly.
fn parse_payload<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Option<T> {
    match payload {
        Ok(Json(value @ Value::Object(_))) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Ids that are not integers can never match a message.
fn parse_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ServiceError> {
    id.map(|Path(id)| id).map_err(|_| ServiceError::NotFound)
}

pub async fn list_messages(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Message>>, ServiceError> {
    let messages = state.messages.list().await?;
    Ok(Json(messages))
}

#[debug_handler]
pub async fn create_message(
    Extension(state): Extension<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), ServiceError> {
    let payload = parse_payload::<CreateMessageRequest>(payload);
    let message = state.messages.create(payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[debug_handler]
pub async fn update_message(
    Extension(state): Extension<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Message>, ServiceError> {
    let id = parse_id(id)?;
    let payload = parse_payload::<UpdateMessageRequest>(payload);
    let message = state.messages.update(id, payload).await?;
    Ok(Json(message))
}

pub async fn delete_message(
    Extension(state): Extension<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
    let id = parse_id(id)?;
    state.messages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
