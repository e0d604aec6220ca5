// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Kind of content a search hit points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Blog,
    Page,
    Faq,
}

/// Which sources a search request covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    All,
    Blog,
    Page,
    Faq,
}

impl SearchType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(SearchType::All),
            "blog" => Some(SearchType::Blog),
            "page" => Some(SearchType::Page),
            "faq" => Some(SearchType::Faq),
            _ => None,
        }
    }

    pub fn includes_static_pages(&self) -> bool {
        matches!(self, SearchType::All | SearchType::Page)
    }

    pub fn includes_blog(&self) -> bool {
        matches!(self, SearchType::All | SearchType::Blog)
    }

    pub fn includes_cms_pages(&self) -> bool {
        matches!(self, SearchType::All | SearchType::Page)
    }

    pub fn includes_faqs(&self) -> bool {
        matches!(self, SearchType::All | SearchType::Faq)
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchType::All => write!(f, "all"),
            SearchType::Blog => write!(f, "blog"),
            SearchType::Page => write!(f, "page"),
            SearchType::Faq => write!(f, "faq"),
        }
    }
}

/// Raw query parameters of `GET /api/search`.
///
/// Every field is an optional string so that malformed input never rejects
/// the request; [`SearchParams::parse`] applies the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RawSearchParams {
    /// Free-text query
    pub q: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Results per page (default 10, max 100)
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    /// One of all, blog, page, faq (default all)
    #[serde(rename = "type")]
    pub result_type: Option<String>,
}

/// Validated search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub page: usize,
    pub page_size: usize,
    pub search_type: SearchType,
}

impl SearchParams {
    pub fn parse(raw: &RawSearchParams) -> Self {
        let page = raw
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let page_size = raw
            .page_size
            .as_deref()
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let search_type = raw
            .result_type
            .as_deref()
            .and_then(SearchType::parse)
            .unwrap_or_default();

        Self {
            query: raw.q.as_deref().unwrap_or("").trim().to_string(),
            page,
            page_size,
            search_type,
        }
    }
}

/// One hit, in the shape shared by every source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Source-prefixed id, e.g. `blog-12` or `static-3`
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub url: String,
    #[serde(rename = "type")]
    pub result_type: ResultType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body of `GET /api/search`; well-formed even when every source failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    /// Number of ranked results before pagination
    pub total: usize,
    pub query: String,
    pub page: usize,
    pub page_size: usize,
}

impl SearchResponse {
    pub fn empty(query: &str, page: usize, page_size: usize) -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            query: query.to_string(),
            page,
            page_size,
        }
    }
}
