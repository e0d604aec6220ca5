// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

/// Pagination block reported by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Normalized CMS response. Always carries both `data` and `meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContentEnvelope {
    /// A single entry, a list of entries, or null
    pub data: Value,
    pub meta: Meta,
}

impl ContentEnvelope {
    /// Envelope with no entries, used as the safe default on fetch failures.
    pub fn empty() -> Self {
        Self {
            data: Value::Array(Vec::new()),
            meta: Meta {
                pagination: Some(Pagination::default()),
            },
        }
    }

    /// Build from an already normalized body. Missing keys fall back to
    /// defaults, a malformed `meta` is dropped rather than failing the call.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self {
                data: value,
                meta: Meta::default(),
            };
        };
        let data = map.remove("data").unwrap_or(Value::Null);
        let meta = map
            .remove("meta")
            .and_then(|m| serde_json::from_value(m).ok())
            .unwrap_or_default();
        Self { data, meta }
    }

    /// Entries as flat objects. `{id, attributes: {...}}` entries are merged
    /// into one object; a single-object `data` yields one entry.
    pub fn entries(&self) -> Vec<Value> {
        match &self.data {
            Value::Array(items) => items.iter().map(flatten_entry).collect(),
            Value::Object(_) => vec![flatten_entry(&self.data)],
            _ => Vec::new(),
        }
    }

    pub fn first_entry(&self) -> Option<Value> {
        self.entries().into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Wrap whatever the CMS returned into the `{data, meta}` shape.
pub fn normalize_response(body: Value) -> Value {
    if let Value::Object(map) = &body {
        if map.contains_key("data") || map.contains_key("meta") {
            return body;
        }
    }
    match body {
        Value::Array(items) => {
            let len = items.len();
            json!({
                "data": items,
                "meta": { "pagination": { "page": 1, "pageSize": len, "total": len } }
            })
        }
        Value::Object(_) => json!({
            "data": [body],
            "meta": { "pagination": { "page": 1, "pageSize": 1, "total": 1 } }
        }),
        other => json!({ "data": other, "meta": {} }),
    }
}

/// Merge a nested `attributes` object into its entry.
pub fn flatten_entry(entry: &Value) -> Value {
    let Value::Object(map) = entry else {
        return entry.clone();
    };
    let Some(Value::Object(attributes)) = map.get("attributes") else {
        return entry.clone();
    };

    let mut flat: Map<String, Value> = attributes.clone();
    for (key, value) in map {
        if key != "attributes" {
            flat.insert(key.clone(), value.clone());
        }
    }
    // Relations come back as {data: [...]} in the nested form
    for value in flat.values_mut() {
        if let Value::Object(inner) = value {
            if inner.len() == 1 {
                if let Some(data) = inner.get("data") {
                    *value = match data {
                        Value::Array(items) => {
                            Value::Array(items.iter().map(flatten_entry).collect())
                        }
                        Value::Object(_) => flatten_entry(data),
                        other => other.clone(),
                    };
                }
            }
        }
    }
    Value::Object(flat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_body_passes_through() {
        let body = json!({ "data": [{ "id": 1 }], "meta": { "pagination": { "page": 2 } } });
        assert_eq!(normalize_response(body.clone()), body);

        let meta_only = json!({ "meta": {} });
        assert_eq!(normalize_response(meta_only.clone()), meta_only);
    }

    #[test]
    fn test_array_is_wrapped_with_pagination() {
        let wrapped = normalize_response(json!([{ "id": 1 }, { "id": 2 }]));
        assert_eq!(wrapped["data"].as_array().map(Vec::len), Some(2));
        assert_eq!(wrapped["meta"]["pagination"]["page"], 1);
        assert_eq!(wrapped["meta"]["pagination"]["pageSize"], 2);
        assert_eq!(wrapped["meta"]["pagination"]["total"], 2);
    }

    #[test]
    fn test_bare_object_is_wrapped_in_list() {
        let wrapped = normalize_response(json!({ "id": 7, "title": "Hi" }));
        assert_eq!(wrapped["data"], json!([{ "id": 7, "title": "Hi" }]));
        assert_eq!(wrapped["meta"]["pagination"]["total"], 1);
    }

    #[test]
    fn test_scalar_and_null_bodies() {
        assert_eq!(normalize_response(Value::Null), json!({ "data": null, "meta": {} }));
        assert_eq!(normalize_response(json!("oops")), json!({ "data": "oops", "meta": {} }));
    }

    #[test]
    fn test_envelope_always_has_data_and_meta() {
        for body in [
            json!([1, 2]),
            json!({ "id": 1 }),
            json!({ "data": null }),
            json!({ "meta": { "pagination": "broken" } }),
            json!(42),
        ] {
            let envelope = ContentEnvelope::from_value(normalize_response(body));
            let serialized = serde_json::to_value(&envelope).unwrap();
            assert!(serialized.get("data").is_some());
            assert!(serialized.get("meta").is_some());
        }
    }

    #[test]
    fn test_flatten_entry_with_attributes() {
        let entry = json!({
            "id": 3,
            "attributes": {
                "title": "Post",
                "categories": { "data": [{ "id": 9, "attributes": { "name": "Tips" } }] }
            }
        });
        let flat = flatten_entry(&entry);
        assert_eq!(flat["id"], 3);
        assert_eq!(flat["title"], "Post");
        assert_eq!(flat["categories"][0]["name"], "Tips");
        assert_eq!(flat["categories"][0]["id"], 9);
    }

    #[test]
    fn test_flat_entries_pass_through() {
        let envelope = ContentEnvelope::from_value(json!({
            "data": { "id": 1, "title": "Single" },
            "meta": {}
        }));
        let entries = envelope.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["title"], "Single");
    }

    #[test]
    fn test_empty_envelope() {
        let envelope = ContentEnvelope::empty();
        assert!(envelope.is_empty());
        assert_eq!(envelope.meta.pagination.map(|p| p.total), Some(0));
    }
}
