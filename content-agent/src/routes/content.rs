// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Read-only content routes backed by the CMS.
//!
//! Pages built on these routes must keep rendering while the CMS is down, so
//! list routes answer with empty lists, single-entry routes with 404 and the
//! global route with the built-in defaults.

use crate::models::content::GlobalData;
use crate::models::envelope::ContentEnvelope;
use crate::services::content::ContentService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use utoipa::IntoParams;

/// State for content routes.
#[derive(Clone)]
pub struct ContentState {
    pub content: Arc<ContentService>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BlogListParams {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Posts per page (default 9)
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
    /// Category slug
    pub category: Option<String>,
}

const DEFAULT_BLOG_PAGE_SIZE: u32 = 9;

/// Create the router with all content routes.
pub fn content_router() -> Router<ContentState> {
    Router::new()
        .route("/api/blog", get(blog_list_handler))
        .route("/api/blog/{slug}", get(blog_post_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/faqs", get(faqs_handler))
        .route("/api/pages/{slug}", get(page_handler))
        .route("/api/global", get(global_handler))
}

/// GET /api/blog - A page of blog posts, newest first.
#[utoipa::path(
    get,
    path = "/api/blog",
    params(BlogListParams),
    responses((status = 200, description = "Blog posts; empty when the CMS is unavailable", body = ContentEnvelope))
)]
pub async fn blog_list_handler(
    State(state): State<ContentState>,
    Query(params): Query<BlogListParams>,
) -> Json<ContentEnvelope> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_BLOG_PAGE_SIZE);

    match state
        .content
        .blog_posts(page, page_size, params.category.as_deref())
        .await
    {
        Ok(envelope) => Json(envelope),
        Err(e) => {
            tracing::warn!(error = %e, "blog list unavailable");
            Json(ContentEnvelope::empty())
        }
    }
}

/// GET /api/blog/{slug} - A single blog post.
#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post"),
        (status = 404, description = "No such post, or the CMS is unavailable")
    )
)]
pub async fn blog_post_handler(
    State(state): State<ContentState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    state
        .content
        .blog_post_by_slug(&slug)
        .await
        .map(Json)
        .map_err(|e| {
            if !e.is_not_found() {
                tracing::warn!(slug = %slug, error = %e, "blog post lookup failed");
            }
            (StatusCode::NOT_FOUND, format!("Blog post '{slug}' not found"))
        })
}

/// GET /api/categories - Blog categories.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "Categories; empty when the CMS is unavailable"))
)]
pub async fn categories_handler(State(state): State<ContentState>) -> Json<Vec<Value>> {
    Json(state.content.categories().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "categories unavailable");
        Vec::new()
    }))
}

/// GET /api/faqs - Frequently asked questions.
#[utoipa::path(
    get,
    path = "/api/faqs",
    responses((status = 200, description = "FAQs; empty when the CMS is unavailable"))
)]
pub async fn faqs_handler(State(state): State<ContentState>) -> Json<Vec<Value>> {
    Json(state.content.faqs().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "faqs unavailable");
        Vec::new()
    }))
}

/// GET /api/pages/{slug} - A CMS-managed page.
#[utoipa::path(
    get,
    path = "/api/pages/{slug}",
    params(("slug" = String, Path, description = "Page slug")),
    responses(
        (status = 200, description = "The page"),
        (status = 404, description = "No such page, or the CMS is unavailable")
    )
)]
pub async fn page_handler(
    State(state): State<ContentState>,
    Path(slug): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    state
        .content
        .page_by_slug(&slug)
        .await
        .map(Json)
        .map_err(|e| {
            if !e.is_not_found() {
                tracing::warn!(slug = %slug, error = %e, "page lookup failed");
            }
            (StatusCode::NOT_FOUND, format!("Page '{slug}' not found"))
        })
}

/// GET /api/global - Navigation, footer and contact data.
#[utoipa::path(
    get,
    path = "/api/global",
    responses((status = 200, description = "Global site data, or the built-in defaults", body = GlobalData))
)]
pub async fn global_handler(State(state): State<ContentState>) -> Json<GlobalData> {
    Json(state.content.global_data().await)
}
