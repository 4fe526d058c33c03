//! Error types for the Threads API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use threads_api::{AppId, ConfigError};
//!
//! let result = AppId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAppId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Application id cannot be empty.
    #[error("App id cannot be empty. Please provide a valid Threads app id (THREADS_APP_ID).")]
    EmptyAppId,

    /// Application secret cannot be empty.
    #[error("App secret cannot be empty. Please provide a valid Threads app secret (THREADS_API_SECRET).")]
    EmptyAppSecret,

    /// Redirect URI is invalid.
    #[error("Invalid redirect URI '{url}'. Please provide an absolute URL with scheme (e.g., 'https://myapp.example.com/callback').")]
    InvalidRedirectUri {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A base URL override is invalid.
    #[error("Invalid base URL '{url}'. Please provide an absolute http(s) URL.")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Scopes are invalid.
    #[error("Invalid scopes: {reason}")]
    InvalidScopes {
        /// The reason the scopes are invalid.
        reason: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Mutual-TLS client certificate paths are missing.
    #[error("Missing client certificate: both THREADS_SSL_CERT_FILEPATH and THREADS_SSL_KEY_FILEPATH must be set for OAuth token exchange.")]
    MissingClientCertificate,
}
