use crate::error::AppError;
use crate::services::auth_service::AuthService;
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use crate::services::user_service::UserService;
use axum::body::Body;
use axum::http::{HeaderName, Request};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod health;
pub mod messages;
pub mod middleware;
pub mod schemas;
pub mod users;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub message_service: MessageService,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct ServiceContainer {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub message_service: MessageService,
}

/// Configures and returns the primary application router.
pub fn app_router(services: ServiceContainer) -> Router {
    let state = AppState {
        auth_service: services.auth_service,
        user_service: services.user_service,
        message_service: services.message_service,
    };

    let auth_routes = Router::new().route("/login", post(auth::login)).route("/register", post(auth::register));

    // Guarded routes: the identity is attached here and re-checked by each handler
    let api_routes = Router::new()
        .route("/users", get(users::list))
        .route("/users/{username}", get(users::detail))
        .route("/users/{username}/to", get(users::messages_to))
        .route("/users/{username}/from", get(users::messages_from))
        .route("/messages", post(messages::send))
        .route("/messages/{id}", get(messages::detail))
        .route("/messages/{id}/read", post(messages::mark_read))
        .route_layer(from_fn_with_state(state.clone(), middleware::authenticate));

    Router::new()
        .merge(auth_routes)
        .merge(api_routes)
        .fallback(|| async { AppError::NotFound("Not found".into()) })
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestId>()
                        .and_then(|id| id.header_value().to_str().ok())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                        "username" = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                        let status = response.status();
                        span.record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(HeaderName::from_static("x-request-id"), MakeRequestUuid))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
