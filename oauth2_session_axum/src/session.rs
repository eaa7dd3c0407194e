use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use http::{Method, StatusCode, request::Parts};

use oauth2_session::{Profile, Session};

use super::config::{O2S_REDIRECT_ANON, redirect_found};

pub struct AuthRedirect {
    method: Method,
}

impl AuthRedirect {
    fn new(method: Method) -> Self {
        Self { method }
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        if self.method == Method::GET {
            redirect_found(O2S_REDIRECT_ANON)
        } else {
            tracing::debug!("Unauthorized");
            (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}

/// Authenticated user, available as an Axum extractor
///
/// Requires [`session_layer`](crate::session_layer). Unauthenticated `GET`
/// requests are redirected to the login route, other methods get `401`.
/// Use `Option<AuthUser>` for pages that serve both.
///
/// ```no_run
/// use axum::{routing::get, Router};
/// use oauth2_session_axum::AuthUser;
///
/// async fn protected_handler(user: AuthUser) -> String {
///     format!("Hello, {}!", user.display_name)
/// }
///
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler));
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Provider-assigned user id
    pub id: String,
    pub display_name: String,
    /// First email address of the profile
    pub email: String,
    /// First photo url of the profile
    pub photo: String,
    pub profile: Profile,
}

impl From<Profile> for AuthUser {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.clone(),
            display_name: profile.display_name.clone(),
            email: profile.primary_email().unwrap_or_default().to_string(),
            photo: profile.primary_photo().unwrap_or_default().to_string(),
            profile,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let method = parts.method.clone();

        let Some(session) = parts.extensions.get::<Session>().cloned() else {
            tracing::error!("No session in request extensions; is session_layer installed?");
            return Err(AuthRedirect::new(method));
        };

        match session.user().await {
            Ok(Some(profile)) => Ok(AuthUser::from(profile)),
            Ok(None) => Err(AuthRedirect::new(method)),
            Err(e) => {
                tracing::error!("Failed to restore user from session: {}", e);
                Err(AuthRedirect::new(method))
            }
        }
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthUser as FromRequestParts<S>>::from_request_parts(parts, state).await;
        Ok(result.ok())
    }
}
