use anyhow::Result;
use inquiry_auth::{CredentialManager, OAuthClient, TokenStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inquiry_server::config::{Channel, LogFormat};
use inquiry_server::{create_router, services, AppState, Configuration};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}

async fn build_state(configuration: &Configuration) -> Result<AppState> {
    let token_store = TokenStore::new(configuration.credentials.token_path.clone())?;
    let mut credentials = CredentialManager::new(token_store)
        .with_env_token(configuration.credentials.token.clone())
        .provider_timeout(configuration.server.upstream_timeout());
    if let Some(oauth) = &configuration.oauth {
        credentials = credentials.with_provider(Arc::new(OAuthClient::new(oauth)?));
    }
    let credentials = Arc::new(credentials);

    let forwarder = services::build_forwarder(configuration, credentials.clone())?;

    // Only the spreadsheet channel needs a credential; acquire it before serving
    if configuration.forwarding.channel == Channel::Sheets {
        let status = credentials.authorize().await;
        tracing::info!(?status, "Credential manager ready");
        if configuration.forwarding.spreadsheet_id.is_none() {
            tracing::warn!("forwarding.spreadsheet_id is not set, submissions will fail");
        }
    }

    Ok(AppState {
        forwarder,
        credentials,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let configuration = Configuration::new()?;
    init_tracing(configuration.server.log_format);
    tracing::info!(
        channel = %configuration.forwarding.channel,
        "Configuration loaded"
    );

    let state = build_state(&configuration).await?;
    let app = create_router(state, configuration.server.static_root());

    let addr = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Inquiry server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
