//! Router for the login, callback and logout endpoints

use axum::{Router, middleware::from_fn_with_state};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::session_layer;
use super::state::AuthState;

/// Create the router for all authentication endpoints
///
/// - `GET /auth/google` starts a Google login
/// - `GET /auth/google/callback` completes it
/// - `GET /logout` drops the logged-in user
///
/// The session layer is included, so the router works on its own or merged
/// into an application that installs [`session_layer`] itself.
pub fn oauth2_session_router(state: AuthState) -> Router {
    oauth2_session_router_no_trace(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`oauth2_session_router`] without the HTTP tracing middleware.
pub fn oauth2_session_router_no_trace(state: AuthState) -> Router {
    super::oauth2::router()
        .layer(from_fn_with_state(state.clone(), session_layer))
        .with_state(state)
}
