use axum::{Router, middleware::from_fn_with_state, routing::get};

use oauth2_session_axum::{AuthState, oauth2_session_router, session_layer};

use crate::handlers::{index, login_failed};

pub(crate) fn app(state: AuthState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_failed))
        .merge(oauth2_session_router(state.clone()))
        .layer(from_fn_with_state(state, session_layer))
}
