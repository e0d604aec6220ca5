// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Static marketing pages that live in the site itself rather than the CMS.

use crate::models::search::{ResultType, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPage {
    pub title: &'static str,
    pub excerpt: &'static str,
    pub category: &'static str,
    pub url: &'static str,
}

const fn page(
    title: &'static str,
    excerpt: &'static str,
    category: &'static str,
    url: &'static str,
) -> StaticPage {
    StaticPage {
        title,
        excerpt,
        category,
        url,
    }
}

pub static STATIC_PAGES: &[StaticPage] = &[
    page(
        "Social Media Management",
        "Done-for-you posting, scheduling and engagement across every major platform.",
        "Services",
        "/services/social-media-management",
    ),
    page(
        "Content Creation",
        "Branded graphics, short-form video and captions produced by our in-house team.",
        "Services",
        "/services/content-creation",
    ),
    page(
        "Paid Social Advertising",
        "Targeted ad campaigns on Facebook, Instagram and LinkedIn with monthly optimisation.",
        "Services",
        "/services/paid-social",
    ),
    page(
        "Community Management",
        "We reply to comments, messages and reviews so your customers always hear back.",
        "Services",
        "/services/community-management",
    ),
    page(
        "Analytics & Reporting",
        "Monthly reports that tie reach, engagement and leads back to your goals.",
        "Services",
        "/services/analytics-reporting",
    ),
    page(
        "Contracting & Trades",
        "Social media for contractors, builders and trades businesses that want more local jobs.",
        "Industries",
        "/industries/contracting",
    ),
    page(
        "Real Estate",
        "Listing showcases, agent branding and neighbourhood content for realtors.",
        "Industries",
        "/industries/real-estate",
    ),
    page(
        "Restaurants & Hospitality",
        "Menus, specials and events that fill tables and keep regulars coming back.",
        "Industries",
        "/industries/restaurants",
    ),
    page(
        "Health & Wellness",
        "Compliant, trustworthy content for clinics, gyms and wellness studios.",
        "Industries",
        "/industries/health-wellness",
    ),
    page(
        "Our Process",
        "Discovery call, free audit, strategy, onboarding and monthly reviews.",
        "Company",
        "/process",
    ),
    page(
        "Pricing",
        "Simple monthly packages with no long-term contracts.",
        "Company",
        "/pricing",
    ),
    page(
        "About Us",
        "A small team of marketers helping local businesses grow online.",
        "Company",
        "/about",
    ),
    page(
        "Free Social Media Audit",
        "Get a free review of your profiles with quick wins you can apply today.",
        "Company",
        "/contact",
    ),
    page(
        "Frequently Asked Questions",
        "Answers about contracts, onboarding, content approval and reporting.",
        "Company",
        "/faq",
    ),
    page(
        "Privacy Policy",
        "How we collect, use and protect your information.",
        "Legal",
        "/privacy-policy",
    ),
    page(
        "Terms of Service",
        "The terms that apply when you use our website and services.",
        "Legal",
        "/terms-of-service",
    ),
];

/// Case-insensitive substring search over title, excerpt, category and url.
pub fn search_static_pages(pages: &[StaticPage], query: &str) -> Vec<SearchResult> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    pages
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            [p.title, p.excerpt, p.category, p.url]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .map(|(i, p)| SearchResult {
            id: format!("static-{}", i),
            title: p.title.to_string(),
            excerpt: p.excerpt.to_string(),
            url: p.url.to_string(),
            result_type: ResultType::Page,
            published_at: None,
            category: Some(p.category.to_string()),
        })
        .collect()
}
