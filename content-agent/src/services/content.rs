// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Typed accessors for the site's CMS collections.
//!
//! Some collections have been published under different names over the life
//! of the backend, so each one is looked up through an ordered list of
//! candidate resource names; the first name that answers wins.

use crate::error::{CmsError, Result};
use crate::models::content::GlobalData;
use crate::models::envelope::ContentEnvelope;
use crate::models::query::{ContentQuery, Filter, Populate};
use crate::services::cms::{CmsClient, FetchOptions};
use serde_json::{json, Map, Value};
use std::sync::Arc;

pub const BLOG_POST_ENDPOINTS: &[&str] = &["blog-posts", "blog-post", "articles", "posts"];
pub const CATEGORY_ENDPOINTS: &[&str] = &["categories", "blog-categories"];
pub const FAQ_ENDPOINTS: &[&str] = &["faqs", "faq"];
pub const PAGES_ENDPOINT: &str = "pages";
pub const GLOBAL_ENDPOINT: &str = "global";

/// Try `candidates` in order and return the first envelope that comes back.
pub async fn fetch_first(
    cms: &CmsClient,
    resource: &str,
    candidates: &[&str],
    query: &ContentQuery,
    options: FetchOptions,
) -> Result<ContentEnvelope> {
    let mut last = String::from("no candidates");
    for candidate in candidates {
        match cms.fetch_api(candidate, query, options).await {
            Ok(envelope) => return Ok(envelope),
            Err(e) => {
                tracing::debug!(resource, candidate, error = %e, "candidate endpoint failed");
                last = e.to_string();
            }
        }
    }
    Err(CmsError::NoEndpoint {
        resource: resource.to_string(),
        last,
    })
}

fn blog_populate() -> Populate {
    Populate::list(&["categories", "coverImage"])
}

/// CMS-backed blog, category, FAQ, page and global lookups
pub struct ContentService {
    cms: Arc<CmsClient>,
}

impl ContentService {
    pub fn new(cms: Arc<CmsClient>) -> Self {
        Self { cms }
    }

    /// A page of blog posts, newest first, optionally restricted to a category slug.
    pub async fn blog_posts(
        &self,
        page: u32,
        page_size: u32,
        category: Option<&str>,
    ) -> Result<ContentEnvelope> {
        let mut query = ContentQuery::new()
            .populate(blog_populate())
            .sort("publishedAt:desc")
            .paginate(page.max(1), page_size.max(1));
        if let Some(slug) = category.filter(|s| !s.is_empty()) {
            query = query.filter(Filter::relation("categories", Filter::eq("slug", slug)));
        }

        fetch_first(
            &self.cms,
            "blog posts",
            BLOG_POST_ENDPOINTS,
            &query,
            self.cms.default_options(),
        )
        .await
    }

    pub async fn blog_post_by_slug(&self, slug: &str) -> Result<Value> {
        let mut deep = Map::new();
        deep.insert("categories".to_string(), json!(true));
        deep.insert("coverImage".to_string(), json!(true));
        deep.insert("seo".to_string(), json!({ "populate": "*" }));

        let query = ContentQuery::new()
            .filter(Filter::eq("slug", slug))
            .populate(Populate::Deep(deep));

        fetch_first(
            &self.cms,
            "blog post",
            BLOG_POST_ENDPOINTS,
            &query,
            self.cms.default_options(),
        )
        .await?
        .first_entry()
        .ok_or_else(|| CmsError::NotFound(format!("blog/{}", slug)))
    }

    pub async fn categories(&self) -> Result<Vec<Value>> {
        let query = ContentQuery::new().sort("name:asc");
        let envelope = fetch_first(
            &self.cms,
            "categories",
            CATEGORY_ENDPOINTS,
            &query,
            self.cms.default_options(),
        )
        .await?;
        Ok(envelope.entries())
    }

    pub async fn faqs(&self) -> Result<Vec<Value>> {
        let envelope = fetch_first(
            &self.cms,
            "faqs",
            FAQ_ENDPOINTS,
            &ContentQuery::new().paginate(1, 100),
            self.cms.default_options(),
        )
        .await?;
        Ok(envelope.entries())
    }

    pub async fn page_by_slug(&self, slug: &str) -> Result<Value> {
        let query = ContentQuery::new()
            .filter(Filter::eq("slug", slug))
            .populate(Populate::All);
        self.cms
            .fetch_api(PAGES_ENDPOINT, &query, self.cms.default_options())
            .await?
            .first_entry()
            .ok_or_else(|| CmsError::NotFound(format!("pages/{}", slug)))
    }

    /// Site-wide data; never fails, falls back to [`GlobalData::fallback`].
    pub async fn global_data(&self) -> GlobalData {
        let mut deep = Map::new();
        deep.insert("navbar".to_string(), json!({ "populate": "*" }));
        deep.insert("footer".to_string(), json!({ "populate": "*" }));
        deep.insert("contact".to_string(), json!("*"));
        let query = ContentQuery::new().populate(Populate::Deep(deep));

        let envelope = match self
            .cms
            .fetch_api(GLOBAL_ENDPOINT, &query, self.cms.default_options())
            .await
        {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "global data unavailable, using defaults");
                return GlobalData::fallback();
            }
        };

        match envelope.first_entry().map(serde_json::from_value::<GlobalData>) {
            Some(Ok(global)) => global,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "global data malformed, using defaults");
                GlobalData::fallback()
            }
            None => {
                tracing::warn!("global data empty, using defaults");
                GlobalData::fallback()
            }
        }
    }
}
