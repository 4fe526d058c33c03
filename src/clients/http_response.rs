//! HTTP response types for the Threads API SDK.
//!
//! This module provides the [`HttpResponse`] type for accessing Graph API
//! response data.

use std::collections::HashMap;

/// A parsed response from the Graph API.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded JSON body (`{}` when the body is empty).
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the Meta trace id for this request, if present.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.header("x-fb-trace-id").or_else(|| {
            self.body
                .pointer("/error/fbtrace_id")
                .and_then(serde_json::Value::as_str)
        })
    }

    /// Returns the human-readable error message of a failed response.
    ///
    /// Uses `error.message` from the Graph API error envelope, then a plain
    /// string `error` field, then the serialized body.
    #[must_use]
    pub fn error_message(&self) -> String {
        let error = self.body.get("error");
        error
            .and_then(|e| e.get("message"))
            .and_then(serde_json::Value::as_str)
            .or_else(|| error.and_then(serde_json::Value::as_str))
            .map_or_else(|| self.body.to_string(), str::to_string)
    }
}
