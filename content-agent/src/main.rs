// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{Context, Result};
use clap::Parser;
use content_agent::app::{create_router, AppState, VERSION};
use content_agent::config::AppConfig;
use content_agent::services::cms::CmsClient;
use content_agent::services::logging::{init_tracing, redact_token};
use std::net::SocketAddr;
use std::sync::Arc;

/// Content and search API for the marketing site
#[derive(Parser, Debug)]
#[command(version = VERSION)]
struct Cli {
    /// Address to listen on; overrides BIND_ADDR
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let bind_addr = cli.bind.unwrap_or(config.bind_addr);

    let token = config
        .cms
        .api_token
        .as_deref()
        .map(redact_token)
        .unwrap_or_else(|| "none".to_string());
    tracing::info!(
        cms_url = %config.cms.base_url,
        token = %token,
        revalidate_secs = config.cms.revalidate_secs,
        site_url = %config.site_url,
        asset_base_url = %config.asset_base_url.as_deref().unwrap_or("none"),
        "configuration loaded"
    );

    let cms = Arc::new(CmsClient::new(config.cms.clone()).context("Failed to build CMS client")?);
    let app = create_router(AppState::new(cms));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("content-agent v{} listening on {}", VERSION, bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
