// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Error types for talking to the CMS.

/// Errors raised by the CMS fetch layer.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// The CMS answered with a non-success status and no fallback query helped.
    #[error("CMS request failed: HTTP {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("CMS transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response carried a body that is not JSON.
    #[error("failed to decode CMS response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Every candidate resource name failed.
    #[error("no CMS endpoint answered for {resource}: {last}")]
    NoEndpoint { resource: String, last: String },

    /// A single-entry lookup matched nothing.
    #[error("CMS content not found: {0}")]
    NotFound(String),
}

impl CmsError {
    /// HTTP status carried by the error, when the CMS produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CmsError::Http { status, .. } => Some(*status),
            CmsError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CmsError::NotFound(_)) || self.status() == Some(404)
    }
}

/// Convenience alias used across the CMS services.
pub type Result<T> = std::result::Result<T, CmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http_includes_status_and_text() {
        let err = CmsError::Http {
            status: 400,
            status_text: "Bad Request".to_string(),
            body: "{}".to_string(),
        };
        assert_eq!(err.to_string(), "CMS request failed: HTTP 400 Bad Request");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn display_no_endpoint() {
        let err = CmsError::NoEndpoint {
            resource: "blog posts".to_string(),
            last: "HTTP 404".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no CMS endpoint answered for blog posts: HTTP 404"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn not_found_detection() {
        assert!(CmsError::NotFound("blog/missing".to_string()).is_not_found());
        let http_404 = CmsError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            body: String::new(),
        };
        assert!(http_404.is_not_found());
        let http_500 = CmsError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: String::new(),
        };
        assert!(!http_500.is_not_found());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CmsError>();
    }
}
