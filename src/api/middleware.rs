use crate::api::AppState;
use crate::domain::auth::Identity;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let (scheme, token) = headers.get(header::AUTHORIZATION)?.to_str().ok()?.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Authorization guard. Attaches an [`Identity`] to the request when it carries a
/// valid bearer token. Requests without one pass through untouched; handlers decide.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let identity = bearer_token(req.headers()).and_then(|token| match state.auth_service.verify_token(token) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid bearer token");
            None
        }
    });

    if let Some(identity) = identity {
        tracing::Span::current().record("username", identity.username());
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}

/// The identity attached by [`authenticate`], if there is one.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Identity>);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Identity>().cloned()))
    }
}
