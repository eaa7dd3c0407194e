//! Fixed locations used by the auth routes

/// Where a successful login lands
pub const O2S_REDIRECT_USER: &str = "/";

/// Where unauthenticated page requests are sent to start a login
pub const O2S_REDIRECT_ANON: &str = "/auth/google";

/// Where a failed login lands
pub const O2S_LOGIN_FAILURE_URL: &str = "/login";

/// Issue a `302 Found` redirect.
pub fn redirect_found(location: &str) -> axum::response::Response {
    use axum::response::IntoResponse;
    use http::{StatusCode, header::LOCATION};

    tracing::debug!("Redirecting to {}", location);
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{StatusCode, header::LOCATION};

    #[test]
    fn test_redirect_found() {
        let response = redirect_found("/login");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/login");
    }
}
