use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::header::SET_COOKIE;

use oauth2_session::Session;

use super::state::AuthState;

/// Session middleware.
///
/// Restores the session named by the request cookie, exposes it to handlers
/// as `Extension<Session>`, and after the handler ran writes it back and adds
/// any `Set-Cookie` headers to the response. Requests that already carry a
/// session from an outer layer pass straight through.
///
/// ```no_run
/// use axum::{Router, middleware::from_fn_with_state, routing::get};
/// use oauth2_session_axum::{AuthState, session_layer};
///
/// fn app(state: AuthState) -> Router {
///     Router::new()
///         .route("/", get(|| async { "hi" }))
///         .layer(from_fn_with_state(state, session_layer))
/// }
/// ```
pub async fn session_layer(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if req.extensions().get::<Session>().is_some() {
        return next.run(req).await;
    }

    let session = match state.sessions.load(req.headers()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to load session: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    req.extensions_mut().insert(session.clone());
    let mut response = next.run(req).await;

    match state.sessions.commit(&session).await {
        Ok(headers) => {
            for value in headers.get_all(SET_COOKIE) {
                response.headers_mut().append(SET_COOKIE, value.clone());
            }
            response
        }
        Err(e) => {
            tracing::error!("Failed to save session: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
