// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Runtime configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;

/// Default cache lifetime hint passed along with CMS requests, in seconds.
pub const DEFAULT_REVALIDATE_SECS: u64 = 300;

/// Connection settings for the headless CMS.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Base URL without a trailing slash, e.g. `https://cms.example.com`
    pub base_url: String,
    /// Bearer token; requests go out unauthenticated when absent
    pub api_token: Option<String>,
    pub revalidate_secs: u64,
}

impl CmsConfig {
    pub fn new(base_url: &str, api_token: Option<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
        }
    }
}

/// Whole-service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cms: CmsConfig,
    pub site_url: String,
    /// CDN base for media; passed through untouched
    pub asset_base_url: Option<String>,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cms_url =
            env::var("CMS_API_URL").unwrap_or_else(|_| "http://localhost:1337".to_string());
        let api_token = env::var("CMS_API_TOKEN").ok();
        let revalidate_secs = env::var("CMS_REVALIDATE_SECS")
            .unwrap_or_else(|_| DEFAULT_REVALIDATE_SECS.to_string())
            .parse()
            .context("CMS_REVALIDATE_SECS must be a valid number")?;

        let mut cms = CmsConfig::new(&cms_url, api_token);
        cms.revalidate_secs = revalidate_secs;

        Ok(Self {
            cms,
            site_url: trim_base_url(
                &env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            asset_base_url: optional_base_url(env::var("ASSET_BASE_URL").ok()),
            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
                .parse()
                .context("BIND_ADDR must be a socket address like 0.0.0.0:3000")?,
        })
    }
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn optional_base_url(raw: Option<String>) -> Option<String> {
    raw.map(|v| trim_base_url(&v)).filter(|v| !v.is_empty())
}
