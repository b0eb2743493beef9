use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use qwreport_core::config::RelayConfig;
use qwreport_discord::{DiscordAdapter, DiscordReactor};
use qwreport_pipeline::{EventDispatcher, MessageProcessor, WebhookForwarder};

mod app;
mod http;

/// Relay QuakeWorld Hub game links from a Discord channel to a webhook.
#[derive(Debug, Parser)]
#[command(name = "qwreport", version)]
struct Cli {
    /// Path to the TOML config file (default: $QWREPORT_CONFIG, then ./qwreport.toml).
    #[arg(long, short)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "qwreport=info,qwreport_gateway=info,qwreport_discord=info,qwreport_pipeline=info"
                    .into()
            }),
        )
        .init();

    // config: --config > QWREPORT_CONFIG env > ./qwreport.toml
    let cli = Cli::parse();
    let config_path = cli.config.or_else(|| std::env::var("QWREPORT_CONFIG").ok());
    let config = RelayConfig::load(config_path.as_deref())
        .context("missing or invalid configuration (need bot token, webhook URL, channel)")?;

    info!(
        channel = %config.discord.watched_channel,
        timeout_secs = config.webhook.timeout_secs,
        reactions = config.discord.ack_reactions,
        "configuration loaded"
    );

    // relay pipeline: forwarder -> processor -> dispatcher
    let forwarder = Arc::new(WebhookForwarder::from_config(&config.webhook));
    let processor = Arc::new(MessageProcessor::new(
        config.discord.watched_channel.clone(),
        forwarder,
    ));
    let reactor = Arc::new(DiscordReactor::new(&config.discord.bot_token));
    let dispatcher = Arc::new(
        EventDispatcher::new(processor, reactor).with_reactions(config.discord.ack_reactions),
    );

    let adapter = DiscordAdapter::new(&config.discord, Arc::clone(&dispatcher));
    let discord = tokio::spawn(adapter.run());
    info!("Discord bot started");

    let addr: SocketAddr = format!("{}:{}", config.keepalive.bind, config.keepalive.port)
        .parse()
        .context("invalid keepalive bind address")?;

    let state = Arc::new(app::AppState::new(config));
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP keepalive listening on {}", addr);

    tokio::select! {
        served = axum::serve(listener, router).into_future() => {
            served.context("keepalive server failed")?;
        }
        joined = discord => {
            joined
                .context("Discord task panicked")?
                .context("Discord login failed")?;
        }
    }

    Ok(())
}
