// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Site search across the static catalog, blog posts, CMS pages and FAQs.
//!
//! Each source runs concurrently behind its own failure boundary: a source
//! that errors contributes nothing and the others still answer. Results are
//! merged, ranked (title matches first, newer first among dated results) and
//! paginated in memory.

use crate::error::Result;
use crate::models::query::{ContentQuery, Filter, Populate};
use crate::models::search::{ResultType, SearchParams, SearchResponse, SearchResult};
use crate::services::catalog::{search_static_pages, StaticPage, STATIC_PAGES};
use crate::services::cms::CmsClient;
use crate::services::content::{fetch_first, BLOG_POST_ENDPOINTS, FAQ_ENDPOINTS, PAGES_ENDPOINT};
use crate::services::excerpt::{extract_excerpt, DEFAULT_EXCERPT_LENGTH};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde_json::Value;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound on CMS hits pulled per source for local re-ranking.
pub const SOURCE_FETCH_LIMIT: u32 = 50;

/// Merges search hits from every content source
pub struct SearchAggregator {
    cms: Arc<CmsClient>,
    pages: &'static [StaticPage],
}

impl SearchAggregator {
    pub fn new(cms: Arc<CmsClient>) -> Self {
        Self::with_pages(cms, STATIC_PAGES)
    }

    pub fn with_pages(cms: Arc<CmsClient>, pages: &'static [StaticPage]) -> Self {
        Self { cms, pages }
    }

    /// Run a search. Never fails: an empty query or a failing source
    /// just yields fewer results.
    pub async fn search(&self, params: &SearchParams) -> SearchResponse {
        if params.query.trim().is_empty() {
            return SearchResponse::empty("", params.page, params.page_size);
        }

        let merged = self.collect(params).await;
        let ranked = rank_results(merged, &params.query);
        let total = ranked.len();

        tracing::debug!(
            query = %params.query,
            search_type = %params.search_type,
            total,
            "search completed"
        );

        SearchResponse {
            results: paginate(ranked, params.page, params.page_size),
            total,
            query: params.query.clone(),
            page: params.page,
            page_size: params.page_size,
        }
    }

    /// [`search`](Self::search) behind a panic boundary. On an internal
    /// failure the caller still gets an empty, well-formed response together
    /// with the correlation id that was logged.
    pub async fn search_or_empty(&self, params: &SearchParams) -> (SearchResponse, Option<Uuid>) {
        match AssertUnwindSafe(self.search(params)).catch_unwind().await {
            Ok(response) => (response, None),
            Err(panic) => {
                let correlation_id = Uuid::now_v7();
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(
                    %correlation_id,
                    reason = %reason,
                    "search failed, returning empty results"
                );
                (
                    SearchResponse::empty(&params.query, params.page, params.page_size),
                    Some(correlation_id),
                )
            }
        }
    }

    async fn collect(&self, params: &SearchParams) -> Vec<SearchResult> {
        let query = params.query.as_str();
        let search_type = params.search_type;

        let static_pages = async {
            if search_type.includes_static_pages() {
                search_static_pages(self.pages, query)
            } else {
                Vec::new()
            }
        };
        let blog = async {
            if !search_type.includes_blog() {
                return Vec::new();
            }
            self.search_blog(query).await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "blog search source failed");
                Vec::new()
            })
        };
        let cms_pages = async {
            if search_type.includes_cms_pages() {
                self.search_cms_pages(query).await
            } else {
                Vec::new()
            }
        };
        let faqs = async {
            if !search_type.includes_faqs() {
                return Vec::new();
            }
            self.search_faqs(query).await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "faq search source failed");
                Vec::new()
            })
        };

        let (static_pages, blog, cms_pages, faqs) =
            tokio::join!(static_pages, blog, cms_pages, faqs);

        let mut merged = static_pages;
        merged.extend(blog);
        merged.extend(cms_pages);
        merged.extend(faqs);
        merged
    }

    async fn search_blog(&self, query: &str) -> Result<Vec<SearchResult>> {
        let content_query = ContentQuery::new()
            .filter(Filter::or(vec![
                Filter::contains_i("title", query),
                Filter::contains_i("excerpt", query),
                Filter::contains_i("content", query),
            ]))
            .populate(Populate::list(&["categories", "coverImage"]))
            .sort("publishedAt:desc")
            .paginate(1, SOURCE_FETCH_LIMIT);

        let envelope = fetch_first(
            &self.cms,
            "blog posts",
            BLOG_POST_ENDPOINTS,
            &content_query,
            self.cms.default_options(),
        )
        .await?;

        Ok(envelope.entries().iter().filter_map(blog_result).collect())
    }

    /// Both page strategies run in turn; their hits are unioned by id.
    async fn search_cms_pages(&self, query: &str) -> Vec<SearchResult> {
        let strategies = [
            Filter::or(vec![
                Filter::contains_i("metadata.metaTitle", query),
                Filter::contains_i("metadata.metaDescription", query),
                Filter::contains_i("shortName", query),
            ]),
            Filter::contains_i("slug", query),
        ];

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for filter in strategies {
            let content_query = ContentQuery::new()
                .filter(filter)
                .populate(Populate::list(&["metadata"]))
                .paginate(1, SOURCE_FETCH_LIMIT);

            let envelope = match self
                .cms
                .fetch_api(PAGES_ENDPOINT, &content_query, self.cms.default_options())
                .await
            {
                Ok(envelope) => envelope,
                // 400/404 mean the pages content type has not been created yet
                Err(e) if matches!(e.status(), Some(400) | Some(404)) => {
                    tracing::debug!(error = %e, "page search strategy rejected");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "page search strategy failed");
                    continue;
                }
            };

            for result in envelope.entries().iter().filter_map(page_result) {
                if seen.insert(result.id.clone()) {
                    results.push(result);
                }
            }
        }
        results
    }

    async fn search_faqs(&self, query: &str) -> Result<Vec<SearchResult>> {
        let content_query = ContentQuery::new()
            .filter(Filter::or(vec![
                Filter::contains_i("question", query),
                Filter::contains_i("answer", query),
            ]))
            .paginate(1, SOURCE_FETCH_LIMIT);

        let envelope = fetch_first(
            &self.cms,
            "faqs",
            FAQ_ENDPOINTS,
            &content_query,
            self.cms.default_options(),
        )
        .await?;

        Ok(envelope.entries().iter().filter_map(faq_result).collect())
    }
}

fn entry_id(entry: &Value) -> Option<String> {
    match &entry["id"] {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn published_at(entry: &Value) -> Option<DateTime<Utc>> {
    entry["publishedAt"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
}

/// Map a flattened blog entry into a search hit.
pub fn blog_result(entry: &Value) -> Option<SearchResult> {
    let id = entry_id(entry)?;
    let title = non_empty_str(&entry["title"])?.to_string();
    let excerpt = non_empty_str(&entry["excerpt"])
        .map(str::to_string)
        .unwrap_or_else(|| extract_excerpt(&entry["content"], DEFAULT_EXCERPT_LENGTH));
    let slug = non_empty_str(&entry["slug"]).map(str::to_string).unwrap_or_else(|| id.clone());
    let category = non_empty_str(&entry["categories"][0]["name"])
        .or_else(|| non_empty_str(&entry["category"]["name"]))
        .map(str::to_string);

    Some(SearchResult {
        id: format!("blog-{}", id),
        title,
        excerpt,
        url: format!("/blog/{}", slug),
        result_type: ResultType::Blog,
        published_at: published_at(entry),
        category,
    })
}

/// Map a flattened CMS page entry into a search hit.
pub fn page_result(entry: &Value) -> Option<SearchResult> {
    let id = entry_id(entry)?;
    let slug = non_empty_str(&entry["slug"])?;
    let title = non_empty_str(&entry["metadata"]["metaTitle"])
        .or_else(|| non_empty_str(&entry["shortName"]))
        .or_else(|| non_empty_str(&entry["heading"]))
        .unwrap_or(slug)
        .to_string();
    let excerpt = non_empty_str(&entry["metadata"]["metaDescription"])
        .unwrap_or_default()
        .to_string();

    Some(SearchResult {
        id: format!("page-{}", id),
        title,
        excerpt,
        url: format!("/{}", slug.trim_start_matches('/')),
        result_type: ResultType::Page,
        published_at: published_at(entry),
        category: None,
    })
}

/// Map a flattened FAQ entry into a search hit.
pub fn faq_result(entry: &Value) -> Option<SearchResult> {
    let id = entry_id(entry)?;
    let question = non_empty_str(&entry["question"])?.to_string();

    Some(SearchResult {
        id: format!("faq-{}", id),
        title: question,
        excerpt: extract_excerpt(&entry["answer"], DEFAULT_EXCERPT_LENGTH),
        url: format!("/faq#faq-{}", id),
        result_type: ResultType::Faq,
        published_at: None,
        category: non_empty_str(&entry["category"]).map(str::to_string),
    })
}

/// Title matches first; within each group dated results are ordered newest
/// first among the positions dated results already hold.
pub fn rank_results(results: Vec<SearchResult>, query: &str) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    let (mut ranked, mut rest): (Vec<_>, Vec<_>) = results
        .into_iter()
        .partition(|r| r.title.to_lowercase().contains(&needle));

    order_dated_slots(&mut ranked);
    order_dated_slots(&mut rest);
    ranked.extend(rest);
    ranked
}

fn order_dated_slots(results: &mut [SearchResult]) {
    let slots: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.published_at.is_some())
        .map(|(i, _)| i)
        .collect();

    let mut dated: Vec<SearchResult> = slots.iter().map(|&i| results[i].clone()).collect();
    dated.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    for (slot, result) in slots.into_iter().zip(dated) {
        results[slot] = result;
    }
}

/// Slice out one 1-based page.
pub fn paginate(results: Vec<SearchResult>, page: usize, page_size: usize) -> Vec<SearchResult> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    results.into_iter().skip(start).take(page_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmsConfig;
    use crate::models::search::SearchType;
    use chrono::TimeZone;
    use serde_json::json;

    fn result(id: &str, title: &str, excerpt: &str, date: Option<(i32, u32, u32)>) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            url: format!("/{}", id),
            result_type: ResultType::Page,
            published_at: date.map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            category: None,
        }
    }

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    fn unreachable_cms() -> Arc<CmsClient> {
        // Nothing listens on the discard port, so every CMS call fails fast
        Arc::new(CmsClient::new(CmsConfig::new("http://127.0.0.1:9", None)).unwrap())
    }

    fn params(query: &str, search_type: SearchType) -> SearchParams {
        SearchParams {
            query: query.to_string(),
            page: 1,
            page_size: 10,
            search_type,
        }
    }

    #[test]
    fn test_title_match_ranks_first() {
        let ranked = rank_results(
            vec![
                result("b", "Growth Tips", "run an audit every quarter", None),
                result("a", "Free Audit Guide", "", None),
            ],
            "audit",
        );
        assert_eq!(ids(&ranked), vec!["a", "b"]);
    }

    #[test]
    fn test_dated_results_newest_first_within_group() {
        let ranked = rank_results(
            vec![
                result("old", "Audit 2022", "", Some((2022, 1, 1))),
                result("undated", "Audit basics", "", None),
                result("new", "Audit 2024", "", Some((2024, 6, 1))),
                result("other", "Other", "audit", Some((2025, 1, 1))),
            ],
            "audit",
        );
        assert_eq!(ids(&ranked), vec!["new", "undated", "old", "other"]);
    }

    #[test]
    fn test_ranking_is_stable_without_dates() {
        let ranked = rank_results(
            vec![
                result("1", "SEO", "x", None),
                result("2", "Ads", "x", None),
                result("3", "Reels", "x", None),
            ],
            "x",
        );
        assert_eq!(ids(&ranked), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_paginate_second_page() {
        let results: Vec<_> = (0..25)
            .map(|i| result(&i.to_string(), "t", "", None))
            .collect();
        let page = paginate(results, 2, 10);
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, "10");
        assert_eq!(page[9].id, "19");
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let results: Vec<_> = (0..5).map(|i| result(&i.to_string(), "t", "", None)).collect();
        assert!(paginate(results, 3, 10).is_empty());
    }

    #[test]
    fn test_blog_result_mapping() {
        let entry = json!({
            "id": 12,
            "title": "Reels That Convert",
            "slug": "reels-that-convert",
            "publishedAt": "2024-05-01T10:00:00.000Z",
            "content": [{ "type": "paragraph", "children": [{ "type": "text", "text": "Short video wins." }] }],
            "categories": [{ "id": 1, "name": "Video" }]
        });
        let hit = blog_result(&entry).unwrap();
        assert_eq!(hit.id, "blog-12");
        assert_eq!(hit.url, "/blog/reels-that-convert");
        assert_eq!(hit.excerpt, "Short video wins.");
        assert_eq!(hit.category.as_deref(), Some("Video"));
        assert_eq!(hit.result_type, ResultType::Blog);
        assert!(hit.published_at.is_some());
    }

    #[test]
    fn test_blog_result_prefers_explicit_excerpt() {
        let entry = json!({ "id": 1, "title": "T", "excerpt": "Given", "content": "Other" });
        assert_eq!(blog_result(&entry).unwrap().excerpt, "Given");
        assert!(blog_result(&json!({ "id": 2 })).is_none());
    }

    #[test]
    fn test_page_result_mapping() {
        let entry = json!({
            "id": 4,
            "slug": "instagram-growth",
            "shortName": "Instagram Growth",
            "metadata": { "metaDescription": "Grow on Instagram" }
        });
        let hit = page_result(&entry).unwrap();
        assert_eq!(hit.id, "page-4");
        assert_eq!(hit.title, "Instagram Growth");
        assert_eq!(hit.excerpt, "Grow on Instagram");
        assert_eq!(hit.url, "/instagram-growth");
    }

    #[test]
    fn test_faq_result_mapping() {
        let entry = json!({ "id": 3, "question": "Do you require contracts?", "answer": "<p>No, month to month.</p>" });
        let hit = faq_result(&entry).unwrap();
        assert_eq!(hit.id, "faq-3");
        assert_eq!(hit.url, "/faq#faq-3");
        assert_eq!(hit.excerpt, "No, month to month.");
        assert_eq!(hit.result_type, ResultType::Faq);
    }

    #[tokio::test]
    async fn test_empty_query_returns_empty_response() {
        let aggregator = SearchAggregator::new(unreachable_cms());
        let mut p = params("", SearchType::All);
        p.page = 2;
        let response = aggregator.search(&p).await;
        assert!(response.results.is_empty());
        assert_eq!(response.total, 0);
        assert_eq!(response.query, "");
        assert_eq!(response.page, 2);
        assert_eq!(response.page_size, 10);
    }

    #[tokio::test]
    async fn test_whitespace_query_skips_every_source() {
        let server = wiremock::MockServer::start().await;
        let cms = Arc::new(CmsClient::new(CmsConfig::new(&server.uri(), None)).unwrap());
        let aggregator = SearchAggregator::new(cms);

        let response = aggregator.search(&params("   ", SearchType::All)).await;

        assert!(response.results.is_empty());
        assert_eq!(response.total, 0);
        assert_eq!(response.query, "");
        let received = server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_failing_cms_sources_keep_static_results() {
        let aggregator = SearchAggregator::new(unreachable_cms());
        let response = aggregator.search(&params("contracting", SearchType::All)).await;
        assert!(response.total >= 1);
        assert!(response.results.iter().all(|r| r.id.starts_with("static-")));
        assert!(response.results.iter().all(|r| r.result_type != ResultType::Blog));
    }

    #[tokio::test]
    async fn test_blog_only_search_skips_static_catalog() {
        let aggregator = SearchAggregator::new(unreachable_cms());
        let response = aggregator.search(&params("contracting", SearchType::Blog)).await;
        assert_eq!(response.total, 0);
        assert_eq!(response.query, "contracting");
    }

    #[tokio::test]
    async fn test_search_or_empty_passes_through_results() {
        let aggregator = SearchAggregator::new(unreachable_cms());
        let (response, correlation_id) = aggregator
            .search_or_empty(&params("pricing", SearchType::Page))
            .await;
        assert!(correlation_id.is_none());
        assert!(response.total >= 1);
    }
}
