use axum::{
    Extension, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    routing::get,
};

use oauth2_session::{
    AuthResponse, Session, complete_oauth2_authorization, prepare_oauth2_auth_request,
};

use super::config::{O2S_LOGIN_FAILURE_URL, O2S_REDIRECT_USER, redirect_found};
use super::error::IntoResponseError;
use super::state::AuthState;

pub(super) fn router() -> Router<AuthState> {
    Router::new()
        .route("/auth/google", get(google_auth))
        .route("/auth/google/callback", get(google_callback))
        .route("/logout", get(logout))
}

async fn google_auth(
    State(state): State<AuthState>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let redirect_uri = state.redirect_uri(&headers).into_response_error()?;
    let auth_url = prepare_oauth2_auth_request(state.provider.as_ref(), &redirect_uri);
    Ok(redirect_found(auth_url.as_str()))
}

async fn google_callback(
    State(state): State<AuthState>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
    Query(query): Query<AuthResponse>,
) -> Result<Response, (StatusCode, String)> {
    let redirect_uri = state.redirect_uri(&headers).into_response_error()?;

    match complete_oauth2_authorization(state.provider.as_ref(), &query, &redirect_uri).await {
        Ok(profile) => {
            session.login(&profile).await.into_response_error()?;
            Ok(redirect_found(O2S_REDIRECT_USER))
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Ok(redirect_found(O2S_LOGIN_FAILURE_URL))
        }
    }
}

async fn logout(Extension(session): Extension<Session>) -> Response {
    session.logout().await;
    redirect_found(O2S_REDIRECT_USER)
}
