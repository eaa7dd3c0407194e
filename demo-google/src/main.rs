use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oauth2_session_axum::{AuthConfig, AuthState};

mod app;
mod handlers;
mod server;

use crate::server::{HTTP_PORT, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AuthConfig::from_env()?;
    let state = AuthState::from_config(config)?;
    state.sessions.init().await?;

    let http_server = spawn_http_server(HTTP_PORT, app::app(state));
    http_server.await??;
    Ok(())
}
