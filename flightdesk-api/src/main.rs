use std::sync::Arc;
use anyhow::Context;
use flightdesk_api::{app, app_config::Config, AppState};
use flightdesk_notify::{build_sender, Notifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightdesk_api=debug,flightdesk_notify=debug,flightdesk_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    config.validate().context("Invalid config")?;
    tracing::info!(
        recipient = %config.notifier.recipient,
        transport = ?config.mail.transport,
        "Starting flightdesk on port {}",
        config.server.port
    );

    let sender = build_sender(&config.mail).context("Failed to configure mail transport")?;
    let app_state = AppState {
        notifier: Arc::new(Notifier::new(config.notifier.clone(), sender)),
        redirect: config.redirect.clone(),
    };

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.server.host, config.server.port))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app(app_state)).await?;
    Ok(())
}
