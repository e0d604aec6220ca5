// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, search and version handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::content::{
    Contact, Footer, FooterColumn, GlobalData, NavLink, Navbar, SocialLink,
};
use crate::models::envelope::{ContentEnvelope, Meta, Pagination};
use crate::models::search::{
    RawSearchParams, ResultType, SearchParams, SearchResponse, SearchResult,
};
use crate::models::version::VersionResponse;
use crate::routes::content::{self, content_router, ContentState};
use crate::services::cms::CmsClient;
use crate::services::content::ContentService;
use crate::services::search::SearchAggregator;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `CONTENT_AGENT_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("CONTENT_AGENT_VERSION");

/// Response header carrying the id logged when a search failed internally.
pub const SEARCH_CORRELATION_HEADER: &str = "x-search-correlation-id";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchAggregator>,
    pub content: Arc<ContentService>,
}

impl AppState {
    /// Wire every service onto one CMS client.
    pub fn new(cms: Arc<CmsClient>) -> Self {
        Self {
            search: Arc::new(SearchAggregator::new(cms.clone())),
            content: Arc::new(ContentService::new(cms)),
        }
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/version",
    responses((status = 200, description = "Service name and version", body = VersionResponse))
)]
pub async fn version_handler() -> Json<VersionResponse> {
    Json(VersionResponse {
        agent: "content-agent".to_string(),
        version: VERSION.to_string(),
    })
}

/// GET /api/search - Site-wide search.
///
/// Always answers 200 with a well-formed body. Unparsable parameters fall
/// back to their defaults instead of rejecting the request.
#[utoipa::path(
    get,
    path = "/api/search",
    params(RawSearchParams),
    responses((status = 200, description = "Ranked, paginated results; empty on failure", body = SearchResponse))
)]
pub async fn search_handler(
    State(state): State<AppState>,
    query: Result<Query<RawSearchParams>, QueryRejection>,
) -> Response {
    let raw = match query {
        Ok(Query(raw)) => raw,
        Err(e) => {
            tracing::debug!(error = %e, "unreadable search parameters, using defaults");
            RawSearchParams::default()
        }
    };
    let params = SearchParams::parse(&raw);

    let (body, correlation_id) = state.search.search_or_empty(&params).await;

    let mut response = Json(body).into_response();
    if let Some(id) = correlation_id {
        if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(SEARCH_CORRELATION_HEADER), value);
        }
    }
    response
}

// ---------------------------------------------------------------------------
// OpenAPI
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        version_handler,
        search_handler,
        content::blog_list_handler,
        content::blog_post_handler,
        content::categories_handler,
        content::faqs_handler,
        content::page_handler,
        content::global_handler,
    ),
    components(schemas(
        VersionResponse,
        SearchResponse,
        SearchResult,
        ResultType,
        ContentEnvelope,
        Meta,
        Pagination,
        GlobalData,
        Navbar,
        NavLink,
        Footer,
        FooterColumn,
        SocialLink,
        Contact,
    )),
    tags((name = "content-agent", description = "Site content and search API"))
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router.
pub fn create_router(state: AppState) -> Router {
    let content_state = ContentState {
        content: state.content.clone(),
    };

    Router::new()
        .route("/version", get(version_handler))
        .route("/api/search", get(search_handler))
        .with_state(state)
        .merge(content_router().with_state(content_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
