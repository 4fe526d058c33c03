//! HTTP request types for the Threads API SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Graph API.

use std::fmt;

/// HTTP methods used by the Threads Graph API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for reading resources.
    Get,
    /// HTTP POST method for creating containers, publishing, and token exchange.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// An HTTP request to be sent to the Graph API.
///
/// Graph API parameters travel in the query string, including on POST. The
/// only form-encoded body is the authorization code exchange.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use threads_api::clients::{HttpRequest, HttpMethod};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "me")
///     .query_param("fields", "id,username")
///     .access_token("token")
///     .build();
///
/// assert_eq!(request.path, "me");
/// assert!(format!("{request:?}").contains("*****"));
/// ```
#[derive(Clone)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The path (relative to the Graph API base URL) for this request.
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Form-encoded body fields, if any.
    pub form: Option<Vec<(String, String)>>,
    /// Access token appended as the final query parameter.
    pub access_token: Option<String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("http_method", &self.http_method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("form", &self.form.as_ref().map(Vec::len))
            .field("access_token", &self.access_token.as_ref().map(|_| "*****"))
            .finish()
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                http_method: method,
                path: path.into(),
                query: Vec::new(),
                form: None,
                access_token: None,
            },
        }
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Adds a query parameter only when a value is present.
    #[must_use]
    pub fn optional_query_param<V: Into<String>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query_param(key, value),
            None => self,
        }
    }

    /// Adds a single form body field.
    #[must_use]
    pub fn form_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .form
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Sets the access token used to authenticate the request.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.request.access_token = Some(token.into());
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        self.request
    }
}
