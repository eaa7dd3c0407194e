use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::config::{GOOGLE_SCOPES, GoogleConfig};
use super::errors::OAuth2Error;
use super::provider::IdentityProvider;
use super::types::{GoogleUserInfo, Profile, TokenResponse};

/// Google OAuth 2.0 client
pub struct GoogleProvider {
    config: Arc<GoogleConfig>,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(config: Arc<GoogleConfig>) -> Result<Self, OAuth2Error> {
        let client = get_client(config.http_timeout)?;
        Ok(Self { config, client })
    }

    async fn exchange_code_for_token(
        &self,
        code: &str,
        redirect_uri: &Url,
    ) -> Result<String, OAuth2Error> {
        let response = self
            .client
            .post(self.config.token_url.as_str())
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::OK => {
                tracing::debug!("Token Exchange Response: {:#?}", response);
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::debug!("Token Exchange failed: {} {}", status, body);
                return Err(OAuth2Error::TokenExchange(status.to_string()));
            }
        };

        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;
        let response_json: TokenResponse = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

        Ok(response_json.access_token)
    }

    async fn fetch_user_data_from_google(
        &self,
        access_token: &str,
    ) -> Result<GoogleUserInfo, OAuth2Error> {
        let response = self
            .client
            .get(self.config.userinfo_url.as_str())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OAuth2Error::FetchUserInfo(response.status().to_string()));
        }

        let response_body = response
            .text()
            .await
            .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

        tracing::debug!("Response Body: {:#?}", response_body);
        let user_data: GoogleUserInfo = serde_json::from_str(&response_body)
            .map_err(|e| OAuth2Error::Serde(format!("Failed to deserialize response body: {e}")))?;

        Ok(user_data)
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    fn authorization_url(&self, redirect_uri: &Url) -> Url {
        let mut url = self.config.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", redirect_uri.as_str())
            .append_pair("scope", &GOOGLE_SCOPES.join(" "));
        url
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &Url) -> Result<Profile, OAuth2Error> {
        let access_token = self.exchange_code_for_token(code, redirect_uri).await?;
        let userinfo = self.fetch_user_data_from_google(&access_token).await?;
        Profile::try_from(userinfo)
    }
}

/// Creates a configured HTTP client for OAuth2 operations.
///
/// - `timeout`: upper bound for every provider round trip.
/// - `pool_idle_timeout`: 90 seconds, how long an idle connection stays pooled.
/// - `pool_max_idle_per_host`: 32 idle connections per host.
fn get_client(timeout: Duration) -> Result<reqwest::Client, OAuth2Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| OAuth2Error::HttpClient(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Form, Json, Router,
        extract::State,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;

    const GOOD_CODE: &str = "good-code";
    const ACCESS_TOKEN: &str = "ya29.access_token_value";

    async fn mock_token(Form(form): Form<HashMap<String, String>>) -> impl IntoResponse {
        let valid = form.get("code").map(String::as_str) == Some(GOOD_CODE)
            && form.get("grant_type").map(String::as_str) == Some("authorization_code")
            && form.get("client_id").map(String::as_str) == Some("test-client")
            && form.get("client_secret").map(String::as_str) == Some("test-secret")
            && form.contains_key("redirect_uri");
        if valid {
            (
                StatusCode::OK,
                Json(json!({
                    "access_token": ACCESS_TOKEN,
                    "expires_in": 3599,
                    "scope": "openid email profile",
                    "token_type": "Bearer"
                })),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_grant" })),
            )
        }
    }

    async fn mock_userinfo(
        State(body): State<Arc<Value>>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        let expected = format!("Bearer {ACCESS_TOKEN}");
        let authorized = headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            == Some(expected.as_str());
        if authorized {
            (StatusCode::OK, Json(body.as_ref().clone()))
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({})))
        }
    }

    /// Spawn a mock provider on an ephemeral port and return its base url
    async fn start_mock_provider(userinfo: Value) -> String {
        let app = Router::new()
            .route("/oauth2/token", post(mock_token))
            .route("/oauth2/userinfo", get(mock_userinfo))
            .with_state(Arc::new(userinfo));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock provider");
        });
        format!("http://{addr}")
    }

    fn provider_for(base_url: &str) -> GoogleProvider {
        provider_with_timeout(base_url, "5")
    }

    fn provider_with_timeout(base_url: &str, timeout_secs: &str) -> GoogleProvider {
        let base = base_url.to_string();
        let timeout_secs = timeout_secs.to_string();
        let config = GoogleConfig::from_lookup(&move |key: &str| match key {
            "GOOGLE_CLIENT_ID" => Some("test-client".to_string()),
            "GOOGLE_CLIENT_SECRET" => Some("test-secret".to_string()),
            "OAUTH2_TOKEN_URL" => Some(format!("{base}/oauth2/token")),
            "OAUTH2_USERINFO_URL" => Some(format!("{base}/oauth2/userinfo")),
            "OAUTH2_HTTP_TIMEOUT_SECS" => Some(timeout_secs.clone()),
            _ => None,
        })
        .expect("config");
        GoogleProvider::new(Arc::new(config)).expect("provider")
    }

    fn redirect_uri() -> Url {
        Url::parse("http://localhost:3000/auth/google/callback").unwrap()
    }

    fn full_userinfo() -> Value {
        json!({
            "sub": "1234567890",
            "name": "Ada Lovelace",
            "picture": "http://x/a.png",
            "email": "ada@example.com",
            "email_verified": true
        })
    }

    #[test]
    fn test_authorization_url_parameters() {
        let provider = provider_for("http://127.0.0.1:1");
        let url = provider.authorization_url(&redirect_uri());

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["client_id"], "test-client");
        assert_eq!(params["redirect_uri"], redirect_uri().as_str());

        let scopes: Vec<&str> = params["scope"].split(' ').collect();
        assert!(scopes.contains(&"profile"));
        assert!(scopes.contains(&"email"));
    }

    #[tokio::test]
    async fn test_exchange_code_success() {
        let base = start_mock_provider(full_userinfo()).await;
        let provider = provider_for(&base);

        let profile = provider
            .exchange_code(GOOD_CODE, &redirect_uri())
            .await
            .expect("exchange should succeed");

        assert_eq!(profile.display_name, "Ada Lovelace");
        assert_eq!(profile.primary_email(), Some("ada@example.com"));
        assert_eq!(profile.primary_photo(), Some("http://x/a.png"));
    }

    #[tokio::test]
    async fn test_exchange_code_rejected_by_provider() {
        let base = start_mock_provider(full_userinfo()).await;
        let provider = provider_for(&base);

        let result = provider.exchange_code("bad-code", &redirect_uri()).await;
        assert!(matches!(result, Err(OAuth2Error::TokenExchange(_))));
    }

    #[tokio::test]
    async fn test_exchange_code_incomplete_profile() {
        let base = start_mock_provider(json!({
            "sub": "1234567890",
            "name": "No Photo",
            "email": "nophoto@example.com"
        }))
        .await;
        let provider = provider_for(&base);

        let result = provider.exchange_code(GOOD_CODE, &redirect_uri()).await;
        assert!(matches!(result, Err(OAuth2Error::IncompleteProfile(_))));
    }

    #[tokio::test]
    async fn test_exchange_code_unreachable_provider() {
        // Port 1 is never listening
        let provider = provider_for("http://127.0.0.1:1");
        let result = provider.exchange_code(GOOD_CODE, &redirect_uri()).await;
        assert!(matches!(result, Err(OAuth2Error::TokenExchange(_))));
    }

    #[tokio::test]
    async fn test_exchange_code_hanging_provider_times_out() {
        // Given a token endpoint that answers only after 10 seconds
        async fn hanging_token() -> StatusCode {
            tokio::time::sleep(std::time::Duration::from_secs(10)).await;
            StatusCode::OK
        }
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("local addr");
        let app = Router::new().route("/oauth2/token", post(hanging_token));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock provider");
        });
        let provider = provider_with_timeout(&format!("http://{addr}"), "1");

        // When exchanging a code
        let started = std::time::Instant::now();
        let result = provider.exchange_code(GOOD_CODE, &redirect_uri()).await;

        // Then the client gives up after its timeout
        assert!(matches!(result, Err(OAuth2Error::TokenExchange(_))));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_token_response_deserialization() {
        let json_data = json!({
            "access_token": "ya29.access_token_value",
            "expires_in": 3599,
            "scope": "openid email profile",
            "token_type": "Bearer"
        });
        let token_response: TokenResponse = serde_json::from_value(json_data).unwrap();
        assert_eq!(token_response.access_token, "ya29.access_token_value");
    }
}
