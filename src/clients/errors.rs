//! HTTP-specific error types for the Threads API SDK.
//!
//! This module contains error types for the transport layer.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the Graph API
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! Requests are sent exactly once. The SDK never retries a failed request.
//!
//! # Example
//!
//! ```rust,ignore
//! use threads_api::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(HttpError::Network(e)) => {
//!         println!("Network error: {}", e);
//!     }
//!     Err(HttpError::InvalidBody { code, reason }) => {
//!         println!("Unreadable {} response: {}", code, reason);
//!     }
//!     Err(HttpError::ClientCertificate { path, reason }) => {
//!         println!("Cannot load {}: {}", path.display(), reason);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// The message is the Graph API's `error.message` when the body carries the
/// standard error envelope, and the raw body otherwise.
///
/// # Example
///
/// ```rust
/// use threads_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 400,
///     message: "Invalid OAuth access token.".to_string(),
///     error_reference: Some("AbCdEf".to_string()),
/// };
///
/// assert!(error.to_string().contains("400"));
/// ```
#[derive(Debug, Error)]
#[error("Graph API responded with status {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error message reported by the API.
    pub message: String,
    /// Trace id for error reporting (from the `x-fb-trace-id` header or `error.fbtrace_id`).
    pub error_reference: Option<String>,
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust,ignore
/// use threads_api::HttpError;
///
/// let result = client.request(request).await;
/// match result {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Response(e)) => { /* handle API error */ }
///     Err(HttpError::Network(e)) => { /* handle network error */ }
///     Err(HttpError::InvalidBody { .. }) => { /* non-JSON success body */ }
///     Err(HttpError::ClientCertificate { .. }) => { /* fix configuration */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response whose body is not JSON.
    #[error("Graph API responded with status {code} but the body is not valid JSON: {reason}")]
    InvalidBody {
        /// The HTTP status code of the response.
        code: u16,
        /// The decoder's description of the problem.
        reason: String,
    },

    /// The mutual-TLS certificate or key could not be loaded.
    #[error("Cannot load client certificate from '{}': {reason}", path.display())]
    ClientCertificate {
        /// The file that failed to load.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },
}

// Verify HttpError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
};
