use crate::api::AppState;
use crate::api::schemas::auth::{Login, Registration, Token};
use crate::domain::user::NewUser;
use crate::error::Result;
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};

pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Login>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let (username, password) = payload.into_credentials()?;

    let token = state.auth_service.login(&username, &password).await?;
    Ok(Json(Token { token }))
}

pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Registration>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let new_user = NewUser::try_from(payload)?;

    let token = state.auth_service.sign_up(new_user).await?;
    Ok((StatusCode::CREATED, Json(Token { token })))
}
