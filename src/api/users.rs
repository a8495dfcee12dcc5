use crate::api::AppState;
use crate::api::middleware::Caller;
use crate::api::schemas::users::{InboxMessage, MessageList, OutboxMessage, UserEnvelope, UserList};
use crate::domain::access;
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};

pub async fn list(Caller(caller): Caller, State(state): State<AppState>) -> Result<impl IntoResponse> {
    let caller = access::require_identity(caller)?;
    let users = state.user_service.list(&caller).await?;
    Ok(Json(UserList { users: users.into_iter().map(Into::into).collect() }))
}

pub async fn detail(
    Caller(caller): Caller,
    State(state): State<AppState>,
    username: std::result::Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse> {
    let caller = access::require_identity(caller)?;
    let Path(username) = username?;

    let user = state.user_service.profile(&caller, &username).await?;
    Ok(Json(UserEnvelope { user: user.into() }))
}

pub async fn messages_to(
    Caller(caller): Caller,
    State(state): State<AppState>,
    username: std::result::Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse> {
    let caller = access::require_identity(caller)?;
    let Path(username) = username?;

    let messages = state.user_service.messages_to(&caller, &username).await?;
    Ok(Json(MessageList::<InboxMessage> { messages: messages.into_iter().map(Into::into).collect() }))
}

pub async fn messages_from(
    Caller(caller): Caller,
    State(state): State<AppState>,
    username: std::result::Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse> {
    let caller = access::require_identity(caller)?;
    let Path(username) = username?;

    let messages = state.user_service.messages_from(&caller, &username).await?;
    Ok(Json(MessageList::<OutboxMessage> { messages: messages.into_iter().map(Into::into).collect() }))
}
