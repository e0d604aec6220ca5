// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<NavLink>,
}

impl NavLink {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            children: Vec::new(),
        }
    }

    fn with_children(label: &str, href: &str, children: Vec<NavLink>) -> Self {
        Self {
            children,
            ..Self::new(label, href)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Navbar {
    pub links: Vec<NavLink>,
    pub cta: Option<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FooterColumn {
    pub title: String,
    #[serde(default)]
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Footer {
    pub columns: Vec<FooterColumn>,
    pub social_links: Vec<SocialLink>,
    pub copyright: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Site-wide navigation, footer and contact data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalData {
    pub site_name: String,
    #[serde(default)]
    pub site_description: String,
    #[serde(default)]
    pub navbar: Navbar,
    #[serde(default)]
    pub footer: Footer,
    #[serde(default)]
    pub contact: Contact,
}

impl GlobalData {
    /// Complete default record served when the CMS is unreachable or
    /// returns something that cannot be decoded.
    pub fn fallback() -> Self {
        let services = vec![
            NavLink::new("Social Media Management", "/services/social-media-management"),
            NavLink::new("Content Creation", "/services/content-creation"),
            NavLink::new("Paid Social Advertising", "/services/paid-social"),
            NavLink::new("Community Management", "/services/community-management"),
            NavLink::new("Analytics & Reporting", "/services/analytics-reporting"),
        ];
        let industries = vec![
            NavLink::new("Contracting & Trades", "/industries/contracting"),
            NavLink::new("Real Estate", "/industries/real-estate"),
            NavLink::new("Restaurants & Hospitality", "/industries/restaurants"),
            NavLink::new("Health & Wellness", "/industries/health-wellness"),
        ];

        Self {
            site_name: "Social Media Management".to_string(),
            site_description:
                "Done-for-you social media management for local and growing businesses."
                    .to_string(),
            navbar: Navbar {
                links: vec![
                    NavLink::with_children("Services", "/services", services.clone()),
                    NavLink::with_children("Industries", "/industries", industries.clone()),
                    NavLink::new("Process", "/process"),
                    NavLink::new("Pricing", "/pricing"),
                    NavLink::new("Blog", "/blog"),
                    NavLink::new("FAQ", "/faq"),
                ],
                cta: Some(NavLink::new("Get a Free Audit", "/contact")),
            },
            footer: Footer {
                columns: vec![
                    FooterColumn {
                        title: "Services".to_string(),
                        links: services,
                    },
                    FooterColumn {
                        title: "Industries".to_string(),
                        links: industries,
                    },
                    FooterColumn {
                        title: "Company".to_string(),
                        links: vec![
                            NavLink::new("About", "/about"),
                            NavLink::new("Process", "/process"),
                            NavLink::new("Pricing", "/pricing"),
                            NavLink::new("Contact", "/contact"),
                        ],
                    },
                    FooterColumn {
                        title: "Legal".to_string(),
                        links: vec![
                            NavLink::new("Privacy Policy", "/privacy-policy"),
                            NavLink::new("Terms of Service", "/terms-of-service"),
                        ],
                    },
                ],
                social_links: vec![
                    SocialLink {
                        platform: "instagram".to_string(),
                        url: "https://www.instagram.com/".to_string(),
                    },
                    SocialLink {
                        platform: "facebook".to_string(),
                        url: "https://www.facebook.com/".to_string(),
                    },
                    SocialLink {
                        platform: "linkedin".to_string(),
                        url: "https://www.linkedin.com/".to_string(),
                    },
                ],
                copyright: "All rights reserved.".to_string(),
            },
            contact: Contact {
                email: "hello@example.com".to_string(),
                phone: None,
                address: None,
            },
        }
    }
}
