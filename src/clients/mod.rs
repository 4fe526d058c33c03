//! HTTP client types for Threads Graph API communication.
//!
//! This module provides the transport layer shared by the OAuth flow and the
//! API facade. It handles URL composition, request/response processing, and
//! the mutual-TLS identity used for token exchange.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for Graph API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST)
//! - [`build_graph_api_url`]: Percent-encoded URL composition
//!
//! # Example
//!
//! ```rust,ignore
//! use threads_api::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "me")
//!     .query_param("fields", "username")
//!     .access_token(&credentials.access_token)
//!     .build();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Failure Behavior
//!
//! Requests are sent exactly once. Non-2xx responses become
//! [`HttpError::Response`] carrying the Graph API error message and trace id;
//! connection failures become [`HttpError::Network`].

mod errors;
mod graph_url;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError};
pub use graph_url::build_graph_api_url;
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
