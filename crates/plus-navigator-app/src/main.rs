// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plus Navigator — desktop host for the status-bar channel.
//
// Entry point. Initialises logging, loads config, builds the platform
// status-bar service, and serves the channel over stdin/stdout.

mod data_dir;
mod stdio;

use std::process::ExitCode;
use std::sync::Arc;

use plus_navigator_bridge::{NativeStatusBarService, platform_service};
use plus_navigator_channel::host::DEFAULT_QUEUE_DEPTH;
use plus_navigator_channel::{ChannelHost, Dispatcher, MethodChannel};
use plus_navigator_core::NavigatorConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries replies, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Plus Navigator starting");

    let dir = data_dir::data_dir();
    let config = NavigatorConfig::load_or_init(&dir);

    let service: Arc<dyn NativeStatusBarService> = Arc::from(platform_service(&config));
    tracing::info!(
        platform = service.platform_name(),
        channel = %config.channel_name,
        "status bar bridge ready"
    );

    let channel: Arc<MethodChannel> = Arc::new(MethodChannel::new(config.channel_name.clone()));
    channel.set_handler(Arc::new(Dispatcher::new(service)));

    let (client, host) = ChannelHost::spawn(channel.clone(), DEFAULT_QUEUE_DEPTH);
    let served = stdio::serve_lines(
        client,
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await;

    channel.clear_handler();
    if let Err(e) = host.await {
        tracing::error!(error = %e, "channel host task failed");
    }

    match served {
        Ok(()) => {
            tracing::info!("input closed, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "stdio transport failed");
            ExitCode::FAILURE
        }
    }
}
