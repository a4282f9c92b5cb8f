//! Request descriptors and response payloads.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// HTTP verbs used by the Smartlead API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read or list.
    Get,
    /// Create, update or trigger an action.
    Post,
    /// Remove.
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// One API call: verb, path, query parameters and an optional body.
///
/// Parameters set to `null` (an absent `Option`) are dropped before
/// transmission. The remote treats a missing key and a `null` differently,
/// so absent values must never be sent. Falsy values such as `0`, `false`
/// and `""` are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Map<String, Value>,
    body: Option<Map<String, Value>>,
}

impl RequestDescriptor {
    /// Create a descriptor for `method` against `path` (relative to the base URL).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Map::new(),
            body: None,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a query parameter. `None` is dropped.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.query.insert(key.into(), value);
        }
        self
    }

    /// Add a single body field. `None` is dropped.
    pub fn body_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.body
                .get_or_insert_with(Map::new)
                .insert(key.into(), value);
        }
        self
    }

    /// Merge the fields of a serializable struct into the body.
    ///
    /// The value must serialize to a JSON object; `null` fields are dropped.
    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let fields = match serde_json::to_value(body)? {
            Value::Object(fields) => fields,
            other => {
                return Err(Error::Validation(format!(
                    "request body must be a JSON object, got {}",
                    other
                )))
            }
        };
        let target = self.body.get_or_insert_with(Map::new);
        for (key, value) in fields {
            if !value.is_null() {
                target.insert(key, value);
            }
        }
        Ok(self)
    }

    /// HTTP verb.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, without `null` values.
    pub fn query_params(&self) -> &Map<String, Value> {
        &self.query
    }

    /// Body fields, without `null` values.
    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }

    /// Query parameters rendered for the wire.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(key, value)| (key.clone(), format_query_value(value)))
            .collect()
    }
}

/// Render a JSON value as a query-string value.
///
/// Strings are sent as-is and other scalars as their JSON text. Arrays and
/// objects use compact JSON, so `[1, 2, 3]` becomes `[1,2,3]`.
pub fn format_query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A decoded response body.
///
/// Only the lead export endpoint is allowed to produce [`Payload::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON object or array.
    Json(Value),
    /// Raw text, returned verbatim.
    Text(String),
}

impl Payload {
    /// Take the JSON value, failing on a text payload.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Text(_) => Err(Error::UnexpectedText),
        }
    }

    /// Take the body as text. JSON payloads are re-serialized.
    pub fn into_text(self) -> String {
        match self {
            Payload::Json(value) => value.to_string(),
            Payload::Text(text) => text,
        }
    }

    /// Borrow the JSON value, if any.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// Whether the body was kept as raw text.
    pub fn is_text(&self) -> bool {
        matches!(self, Payload::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_params_are_dropped() {
        let request = RequestDescriptor::get("campaigns/1/statistics")
            .query("offset", 0)
            .query("email_sequence_number", None::<u32>)
            .query("email_status", None::<String>)
            .query("include", false)
            .query("name", "");

        let params = request.query_params();
        assert_eq!(params.len(), 3);
        assert!(!params.contains_key("email_sequence_number"));
        assert!(!params.contains_key("email_status"));
        assert_eq!(params["offset"], json!(0));
        assert_eq!(params["include"], json!(false));
        assert_eq!(params["name"], json!(""));
    }

    #[test]
    fn test_absent_body_fields_are_dropped() {
        #[derive(Serialize)]
        struct Body {
            name: String,
            client_id: Option<u64>,
            max_per_day: u32,
        }

        let request = RequestDescriptor::post("campaigns/create")
            .json_body(&Body {
                name: "Q3".into(),
                client_id: None,
                max_per_day: 0,
            })
            .unwrap()
            .body_field("warmup_enabled", false)
            .body_field("bcc", None::<String>);

        let body = request.body().unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(body["name"], json!("Q3"));
        assert_eq!(body["max_per_day"], json!(0));
        assert_eq!(body["warmup_enabled"], json!(false));
        assert!(!body.contains_key("client_id"));
        assert!(!body.contains_key("bcc"));
    }

    #[test]
    fn test_absent_only_body_sends_no_body() {
        let request = RequestDescriptor::post("campaigns/1/leads/2/pause")
            .body_field("client_id", None::<u64>);
        assert_eq!(request.body(), None);

        let request = request.body_field("pause_lead", false);
        assert_eq!(request.body().map(|b| b.len()), Some(1));
    }

    #[test]
    fn test_json_body_requires_object() {
        let err = RequestDescriptor::post("x").json_body(&[1, 2]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_list_params_are_compact() {
        assert_eq!(format_query_value(&json!([1, 2, 3])), "[1,2,3]");
        assert_eq!(format_query_value(&json!(["a", "b"])), r#"["a","b"]"#);
        assert_eq!(format_query_value(&json!([])), "[]");

        let request = RequestDescriptor::get("leads").query("ids", json!([1, 2, 3]));
        assert_eq!(
            request.query_pairs(),
            vec![("ids".to_string(), "[1,2,3]".to_string())]
        );
    }

    #[test]
    fn test_scalar_query_values() {
        assert_eq!(format_query_value(&json!("a b")), "a b");
        assert_eq!(format_query_value(&json!(42)), "42");
        assert_eq!(format_query_value(&json!(true)), "true");
        assert_eq!(format_query_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_payload_accessors() {
        let json = Payload::Json(json!({"ok": true}));
        assert!(!json.is_text());
        assert_eq!(json.as_json(), Some(&json!({"ok": true})));
        assert_eq!(json.into_json().unwrap(), json!({"ok": true}));

        let text = Payload::Text("id,email\n1,a@b.c\n".into());
        assert!(text.is_text());
        assert!(matches!(
            text.clone().into_json(),
            Err(Error::UnexpectedText)
        ));
        assert_eq!(text.into_text(), "id,email\n1,a@b.c\n");
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_reqwest(), reqwest::Method::DELETE);
    }
}
