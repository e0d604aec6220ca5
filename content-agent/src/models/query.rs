// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Typed CMS queries and their bracket-nested query-string encoding.
//!
//! The CMS parses deep objects out of keys such as
//! `filters[slug][$eq]=foo`, `populate[coverImage][populate]=*`,
//! `sort[0]=publishedAt:desc` and `pagination[pageSize]=10`. Keys are written
//! verbatim, values are form-encoded.

use serde_json::{json, Map, Value};

/// A predicate tree rendered into the CMS filter syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `{field: {"$eq": value}}`
    Eq(String, Value),
    /// Case-insensitive substring match, `{field: {"$containsi": value}}`
    ContainsI(String, String),
    Or(Vec<Filter>),
    And(Vec<Filter>),
    /// Filter applied to a related entry, `{relation: inner}`
    Relation(String, Box<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn contains_i(field: &str, value: &str) -> Self {
        Filter::ContainsI(field.to_string(), value.to_string())
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Or(filters)
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::And(filters)
    }

    pub fn relation(name: &str, inner: Filter) -> Self {
        Filter::Relation(name.to_string(), Box::new(inner))
    }

    /// Render into the JSON tree the CMS expects. Dotted field names
    /// (`metadata.metaTitle`) become nested objects.
    pub fn to_value(&self) -> Value {
        match self {
            Filter::Eq(field, value) => nest_path(field, json!({ "$eq": value })),
            Filter::ContainsI(field, value) => nest_path(field, json!({ "$containsi": value })),
            Filter::Or(items) => {
                json!({ "$or": items.iter().map(Filter::to_value).collect::<Vec<_>>() })
            }
            Filter::And(items) => {
                json!({ "$and": items.iter().map(Filter::to_value).collect::<Vec<_>>() })
            }
            Filter::Relation(name, inner) => nest_path(name, inner.to_value()),
        }
    }
}

fn nest_path(path: &str, leaf: Value) -> Value {
    path.split('.').rev().fold(leaf, |acc, segment| {
        let mut map = Map::new();
        map.insert(segment.to_string(), acc);
        Value::Object(map)
    })
}

/// Which related entries the CMS should embed in the response.
#[derive(Debug, Clone, PartialEq)]
pub enum Populate {
    /// `populate=*`
    All,
    /// `populate[0]=categories&populate[1]=coverImage`
    List(Vec<String>),
    /// Arbitrary nested object, e.g. `populate[seo][populate]=*`
    Deep(Map<String, Value>),
}

impl Populate {
    pub fn list<S: AsRef<str>>(fields: &[S]) -> Self {
        Populate::List(fields.iter().map(|f| f.as_ref().to_string()).collect())
    }

    pub fn to_value(&self) -> Value {
        match self {
            Populate::All => Value::String("*".to_string()),
            Populate::List(fields) => {
                Value::Array(fields.iter().cloned().map(Value::String).collect())
            }
            Populate::Deep(map) => Value::Object(map.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

/// A complete request description for one CMS resource call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentQuery {
    pub filters: Option<Filter>,
    pub populate: Option<Populate>,
    pub sort: Vec<String>,
    pub pagination: Option<PageRequest>,
    /// Any further top-level parameters (`fields`, `publicationState`, ...)
    pub extra: Map<String, Value>,
}

impl ContentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters = Some(filter);
        self
    }

    pub fn populate(mut self, populate: Populate) -> Self {
        self.populate = Some(populate);
        self
    }

    pub fn sort(mut self, order: &str) -> Self {
        self.sort.push(order.to_string());
        self
    }

    pub fn paginate(mut self, page: u32, page_size: u32) -> Self {
        self.pagination = Some(PageRequest { page, page_size });
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Same query with the populate specification replaced by the wildcard.
    pub fn with_populate_all(&self) -> Self {
        Self {
            populate: Some(Populate::All),
            ..self.clone()
        }
    }

    /// Encode as a query string (without the leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();

        if let Some(filters) = &self.filters {
            encode_pairs("filters", &filters.to_value(), &mut pairs);
        }
        if let Some(populate) = &self.populate {
            encode_pairs("populate", &populate.to_value(), &mut pairs);
        }
        if !self.sort.is_empty() {
            let sort = Value::Array(self.sort.iter().cloned().map(Value::String).collect());
            encode_pairs("sort", &sort, &mut pairs);
        }
        if let Some(page) = self.pagination {
            let pagination = json!({ "page": page.page, "pageSize": page.page_size });
            encode_pairs("pagination", &pagination, &mut pairs);
        }
        for (key, value) in &self.extra {
            encode_pairs(key, value, &mut pairs);
        }

        pairs.join("&")
    }
}

/// Encode an arbitrary JSON value as bracket-nested query pairs.
pub fn encode_query(value: &Value) -> String {
    let mut pairs = Vec::new();
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                encode_pairs(key, v, &mut pairs);
            }
        }
        Value::Null => {}
        other => encode_pairs("", other, &mut pairs),
    }
    pairs.join("&")
}

fn encode_pairs(prefix: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                encode_pairs(&format!("{}[{}]", prefix, key), v, out);
            }
        }
        Value::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                encode_pairs(&format!("{}[{}]", prefix, i), v, out);
            }
        }
        Value::Null => out.push(format!("{}=", prefix)),
        Value::String(s) => out.push(format!("{}={}", prefix, encode_value(s))),
        // numbers and booleans
        other => out.push(format!("{}={}", prefix, other)),
    }
}

fn encode_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_filter_encoding() {
        let query = ContentQuery::new().filter(Filter::eq("slug", "hello-world"));
        assert_eq!(query.to_query_string(), "filters[slug][$eq]=hello-world");
    }

    #[test]
    fn test_or_filter_encoding_uses_indices() {
        let query = ContentQuery::new().filter(Filter::or(vec![
            Filter::contains_i("title", "audit"),
            Filter::contains_i("excerpt", "audit"),
        ]));
        assert_eq!(
            query.to_query_string(),
            "filters[$or][0][title][$containsi]=audit&filters[$or][1][excerpt][$containsi]=audit"
        );
    }

    #[test]
    fn test_dotted_field_nests() {
        let filter = Filter::contains_i("metadata.metaTitle", "growth");
        assert_eq!(
            filter.to_value(),
            json!({ "metadata": { "metaTitle": { "$containsi": "growth" } } })
        );
    }

    #[test]
    fn test_relation_filter() {
        let filter = Filter::relation("categories", Filter::eq("slug", "tips"));
        assert_eq!(
            filter.to_value(),
            json!({ "categories": { "slug": { "$eq": "tips" } } })
        );
    }

    #[test]
    fn test_full_query_order() {
        let query = ContentQuery::new()
            .filter(Filter::eq("slug", "foo"))
            .populate(Populate::list(&["categories", "coverImage"]))
            .sort("publishedAt:desc")
            .paginate(1, 10);
        assert_eq!(
            query.to_query_string(),
            "filters[slug][$eq]=foo\
             &populate[0]=categories&populate[1]=coverImage\
             &sort[0]=publishedAt%3Adesc\
             &pagination[page]=1&pagination[pageSize]=10"
        );
    }

    #[test]
    fn test_deep_populate() {
        let mut deep = Map::new();
        deep.insert("coverImage".to_string(), json!({ "populate": "*" }));
        let query = ContentQuery::new().populate(Populate::Deep(deep));
        assert_eq!(query.to_query_string(), "populate[coverImage][populate]=*");
    }

    #[test]
    fn test_populate_all_replaces_only_populate() {
        let query = ContentQuery::new()
            .filter(Filter::eq("slug", "foo"))
            .populate(Populate::list(&["seo"]))
            .paginate(2, 5);
        let relaxed = query.with_populate_all();
        assert_eq!(relaxed.populate, Some(Populate::All));
        assert_eq!(relaxed.filters, query.filters);
        assert_eq!(relaxed.pagination, query.pagination);
    }

    #[test]
    fn test_values_are_encoded_keys_are_not() {
        let query = ContentQuery::new().filter(Filter::contains_i("title", "social media & ads"));
        assert_eq!(
            query.to_query_string(),
            "filters[title][$containsi]=social+media+%26+ads"
        );
    }

    #[test]
    fn test_encode_query_scalars_and_null() {
        let encoded = encode_query(&json!({ "a": null, "b": true, "c": 3, "d": [] }));
        assert_eq!(encoded, "a=&b=true&c=3");
    }

    #[test]
    fn test_empty_query_is_empty_string() {
        assert_eq!(ContentQuery::new().to_query_string(), "");
    }
}
