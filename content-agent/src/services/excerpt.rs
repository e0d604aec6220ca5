// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Plain-text excerpts from CMS rich content.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static NBSP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(nbsp|#160|#x[aA]0);").expect("valid regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#x[0-9a-fA-F]+|[a-zA-Z][a-zA-Z0-9]*);").expect("valid regex")
});
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Extract the first non-empty paragraph of `content` as plain text,
/// truncated to `max_len` characters on a word boundary.
///
/// `content` is either a string (markdown or HTML) or an array of blocks
/// such as `{type: "paragraph", children: [{type: "text", text: "..."}]}`.
pub fn extract_excerpt(content: &Value, max_len: usize) -> String {
    let paragraph = match content {
        Value::String(text) => PARAGRAPH_BREAK_RE
            .split(text)
            .map(clean_text)
            .find(|p| !p.is_empty()),
        Value::Array(blocks) => blocks
            .iter()
            .filter(|b| b["type"].as_str() == Some("paragraph"))
            .map(|b| {
                let mut raw = String::new();
                collect_text(b, &mut raw);
                clean_text(&raw)
            })
            .find(|p| !p.is_empty()),
        _ => None,
    };

    paragraph
        .map(|p| truncate_on_word(&p, max_len))
        .unwrap_or_default()
}

fn collect_text(node: &Value, out: &mut String) {
    if let Some(text) = node["text"].as_str() {
        out.push_str(text);
    }
    if let Some(children) = node["children"].as_array() {
        for child in children {
            collect_text(child, out);
        }
    }
}

/// Remove tags and entities, collapse whitespace. Non-breaking spaces
/// become plain spaces; every other entity is dropped.
pub fn clean_text(raw: &str) -> String {
    let without_tags = TAG_RE.replace_all(raw, " ");
    let spaced = NBSP_RE.replace_all(&without_tags, " ");
    let without_entities = ENTITY_RE.replace_all(&spaced, "");
    without_entities.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to at most `max_len` characters at the last whole word, then add `...`.
pub fn truncate_on_word(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let cut = text
        .char_indices()
        .nth(max_len)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let head = &text[..cut];
    let next_is_break = text[cut..].chars().next().is_some_and(char::is_whitespace);

    let kept = if next_is_break {
        head
    } else {
        match head.rfind(char::is_whitespace) {
            Some(i) if i > 0 => &head[..i],
            // one long token, hard cut
            _ => head,
        }
    };

    format!("{}...", kept.trim_end())
}
