use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("Cannot resolve redirect uri: {0}")]
    RedirectUri(String),

    #[error("Provider returned error: {0}")]
    ProviderDenied(String),

    #[error("Authorization code missing from callback")]
    MissingCode,

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch user info error: {0}")]
    FetchUserInfo(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Incomplete profile: {0}")]
    IncompleteProfile(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
