// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! HTTP client for the headless CMS.
//!
//! The CMS validates queries strictly: a populate spec naming a relation that
//! was renamed or removed fails the whole request with a 400. When the error
//! body carries one of the known "invalid key" messages the client retries
//! once with `populate=*` instead.

use crate::config::{CmsConfig, DEFAULT_REVALIDATE_SECS};
use crate::error::{CmsError, Result};
use crate::models::envelope::{normalize_response, ContentEnvelope};
use crate::models::query::ContentQuery;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use serde_json::Value;

/// Error message the CMS emits when a query touches the `content` key.
pub const INVALID_CONTENT_KEY_SIGNATURE: &str = "Invalid key content";
/// Generic prefix of the CMS's unknown-key validation errors.
pub const INVALID_KEY_SIGNATURE: &str = "Invalid key";

/// Per-call transport options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// How long a cached response may be reused, sent as `Cache-Control: max-age`.
    pub revalidate_secs: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
        }
    }
}

/// Outcome of a single request: a body or a failed status.
enum Attempt {
    Success(ContentEnvelope),
    Failed {
        status: u16,
        status_text: String,
        body: String,
    },
}

/// Authenticated CMS client producing normalized envelopes
pub struct CmsClient {
    http: reqwest::Client,
    config: CmsConfig,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Transport options derived from configuration.
    pub fn default_options(&self) -> FetchOptions {
        FetchOptions {
            revalidate_secs: self.config.revalidate_secs,
        }
    }

    /// Full request URL for a resource path and query.
    pub fn request_url(&self, path: &str, query: &ContentQuery) -> String {
        let query_string = query.to_query_string();
        let path = api_path(path);
        if query_string.is_empty() {
            format!("{}{}", self.config.base_url, path)
        } else {
            format!("{}{}?{}", self.config.base_url, path, query_string)
        }
    }

    /// Fetch a resource and return it as a normalized envelope.
    ///
    /// Non-success responses that match a known validation signature are
    /// retried once with the populate spec replaced by `*`. Anything else
    /// fails with [`CmsError::Http`] carrying the original status.
    pub async fn fetch_api(
        &self,
        path: &str,
        query: &ContentQuery,
        options: FetchOptions,
    ) -> Result<ContentEnvelope> {
        let (status, status_text, body) = match self.attempt(path, query, options).await? {
            Attempt::Success(envelope) => return Ok(envelope),
            Attempt::Failed {
                status,
                status_text,
                body,
            } => (status, status_text, body),
        };

        if should_retry_with_populate_all(status, &body, query) {
            tracing::warn!(
                path,
                status,
                "CMS rejected query keys, retrying with populate=*"
            );
            let relaxed = query.with_populate_all();
            match self.attempt(path, &relaxed, options).await {
                Ok(Attempt::Success(envelope)) => return Ok(envelope),
                Ok(Attempt::Failed { status, .. }) => {
                    tracing::warn!(path, status, "fallback query also failed");
                }
                Err(e) => tracing::warn!(path, error = %e, "fallback query also failed"),
            }
        }

        Err(CmsError::Http {
            status,
            status_text,
            body,
        })
    }

    async fn attempt(
        &self,
        path: &str,
        query: &ContentQuery,
        options: FetchOptions,
    ) -> Result<Attempt> {
        let url = self.request_url(path, query);
        tracing::debug!(method = "GET", %url, "CMS request");

        let mut request = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, cache_control(options));
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%url, status = status.as_u16(), "CMS returned error status");
            return Ok(Attempt::Failed {
                status: status.as_u16(),
                status_text,
                body,
            });
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        Ok(Attempt::Success(ContentEnvelope::from_value(
            normalize_response(body),
        )))
    }
}

/// Namespace a resource path under `/api`.
pub fn api_path(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('/');
    if trimmed == "api" || trimmed.starts_with("api/") {
        format!("/{}", trimmed)
    } else {
        format!("/api/{}", trimmed)
    }
}

/// Decide whether a failed response deserves one `populate=*` retry.
pub fn should_retry_with_populate_all(status: u16, body: &str, query: &ContentQuery) -> bool {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));

    let content_key_error = message
        .as_deref()
        .is_some_and(|m| m.contains(INVALID_CONTENT_KEY_SIGNATURE))
        || body.contains(INVALID_CONTENT_KEY_SIGNATURE);
    if content_key_error {
        return true;
    }

    status == 400 && body.contains(INVALID_KEY_SIGNATURE) && query.populate.is_some()
}

fn cache_control(options: FetchOptions) -> String {
    if options.revalidate_secs == 0 {
        "no-cache".to_string()
    } else {
        format!("max-age={}", options.revalidate_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::{Filter, Populate};

    fn client() -> CmsClient {
        CmsClient::new(CmsConfig::new("http://cms.local/", None)).unwrap()
    }

    #[test]
    fn test_api_path_prefixes_once() {
        assert_eq!(api_path("blog-posts"), "/api/blog-posts");
        assert_eq!(api_path("/blog-posts"), "/api/blog-posts");
        assert_eq!(api_path("/api/blog-posts"), "/api/blog-posts");
        assert_eq!(api_path("api/global"), "/api/global");
        assert_eq!(api_path("apiary"), "/api/apiary");
    }

    #[test]
    fn test_request_url() {
        let client = client();
        let query = ContentQuery::new().filter(Filter::eq("slug", "hello"));
        assert_eq!(
            client.request_url("blog-posts", &query),
            "http://cms.local/api/blog-posts?filters[slug][$eq]=hello"
        );
        assert_eq!(
            client.request_url("global", &ContentQuery::new()),
            "http://cms.local/api/global"
        );
    }

    #[test]
    fn test_retry_on_invalid_key_with_populate() {
        let query = ContentQuery::new().populate(Populate::list(&["author"]));
        let body = r#"{"data":null,"error":{"status":400,"name":"ValidationError","message":"Invalid key author"}}"#;
        assert!(should_retry_with_populate_all(400, body, &query));
    }

    #[test]
    fn test_no_retry_without_populate() {
        let query = ContentQuery::new().filter(Filter::eq("slug", "x"));
        let body = r#"{"error":{"message":"Invalid key author"}}"#;
        assert!(!should_retry_with_populate_all(400, body, &query));
    }

    #[test]
    fn test_no_retry_for_other_errors() {
        let query = ContentQuery::new().populate(Populate::All);
        assert!(!should_retry_with_populate_all(
            400,
            r#"{"error":{"message":"Bad pagination"}}"#,
            &query
        ));
        assert!(!should_retry_with_populate_all(
            500,
            "Invalid key author",
            &query
        ));
        assert!(!should_retry_with_populate_all(404, "Not Found", &query));
    }

    #[test]
    fn test_content_key_error_retries_on_any_status() {
        let query = ContentQuery::new();
        assert!(should_retry_with_populate_all(
            500,
            r#"{"error":{"message":"Invalid key content"}}"#,
            &query
        ));
        assert!(should_retry_with_populate_all(
            400,
            "plain text: Invalid key content",
            &query
        ));
    }

    #[test]
    fn test_cache_control_header() {
        assert_eq!(cache_control(FetchOptions::default()), "max-age=300");
        assert_eq!(
            cache_control(FetchOptions { revalidate_secs: 0 }),
            "no-cache"
        );
    }
}
