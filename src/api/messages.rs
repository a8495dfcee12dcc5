use crate::api::AppState;
use crate::api::middleware::Caller;
use crate::api::schemas::messages::{MessageDetail, MessageEnvelope, ReadReceipt, SendMessage, SentMessage};
use crate::domain::access;
use crate::error::Result;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

pub async fn detail(
    Caller(caller): Caller,
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let caller = access::require_identity(caller)?;
    let Path(id) = id?;

    let message = state.message_service.get(&caller, id).await?;
    Ok(Json(MessageEnvelope { message: MessageDetail::from(message) }))
}

pub async fn send(
    Caller(caller): Caller,
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendMessage>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let caller = access::require_identity(caller)?;
    let Json(payload) = payload?;
    let (to_username, body) = payload.into_parts()?;

    let message = state.message_service.send(&caller, &to_username, &body).await?;
    Ok((StatusCode::CREATED, Json(MessageEnvelope { message: SentMessage::from(message) })))
}

pub async fn mark_read(
    Caller(caller): Caller,
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let caller = access::require_identity(caller)?;
    let Path(id) = id?;

    let receipt = state.message_service.mark_read(&caller, id).await?;
    Ok(Json(MessageEnvelope { message: ReadReceipt::from(receipt) }))
}
