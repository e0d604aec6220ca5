// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Content and search backend for the marketing site.
//!
//! Fetches blog posts, pages, FAQs and global navigation data from a headless
//! CMS, normalizing its responses, and serves a site-wide search that merges
//! the static page catalog with CMS content.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
