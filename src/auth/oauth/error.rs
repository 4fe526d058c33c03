//! OAuth-specific error types for the Threads API SDK.
//!
//! This module contains error types for the authorization code flow and the
//! token lifecycle (exchange and refresh).
//!
//! # Error Types
//!
//! - [`OAuthError::TokenExpired`]: The token was already expired, so no request was made
//! - [`OAuthError::StateMismatch`]: OAuth state parameter doesn't match expected
//! - [`OAuthError::InvalidCallback`]: Callback URL is malformed or lacks a code
//! - [`OAuthError::AuthorizationDenied`]: The user or provider refused authorization
//! - [`OAuthError::MissingResponseField`]: Token response lacks a required field
//! - [`OAuthError::TokenExchangeFailed`]: Token endpoint returned a non-success status
//! - [`OAuthError::ShortLivedTokenNotRefreshable`]: Refresh attempted on a short-lived token
//! - [`OAuthError::HttpError`]: Wrapped HTTP client error
//!
//! # Example
//!
//! ```rust
//! use threads_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::MissingResponseField { field: "user_id" };
//! assert!(error.to_string().contains("user_id"));
//! assert!(error.is_authentication_error());
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur during OAuth operations.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
///
/// # Example
///
/// ```rust
/// use threads_api::auth::oauth::OAuthError;
///
/// fn handle_oauth_error(err: OAuthError) {
///     match err {
///         OAuthError::TokenExpired => {
///             eprintln!("Token expired: send the user through authorization again");
///         }
///         OAuthError::StateMismatch { .. } => {
///             eprintln!("CSRF: state mismatch");
///         }
///         OAuthError::TokenExchangeFailed { status, message } => {
///             eprintln!("Token exchange failed ({}): {}", status, message);
///         }
///         other => eprintln!("OAuth error: {}", other),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The access token expired before the exchange or refresh was attempted.
    ///
    /// No network call was made. The user must authorize the app again.
    #[error("The access token has expired, so it cannot be exchanged or refreshed. Reauthenticate the user with Threads.")]
    TokenExpired,

    /// A long-lived token operation was attempted with a short-lived token.
    ///
    /// Only long-lived tokens can be refreshed. Exchange the short-lived token
    /// with `fetch_long_lived_token` instead.
    #[error("Only long-lived access tokens can be refreshed; exchange the short-lived token with fetch_long_lived_token first")]
    ShortLivedTokenNotRefreshable,

    /// The token endpoint response did not include a required field.
    #[error("Response from the Threads API did not include the expected `{field}` key")]
    MissingResponseField {
        /// The missing field name.
        field: &'static str,
    },

    /// A token endpoint response field has the wrong type or an unusable value.
    #[error("Response from the Threads API has an invalid `{field}` value: {reason}")]
    InvalidResponseField {
        /// The offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// OAuth state parameter mismatch.
    ///
    /// The state parameter in the callback does not match the expected state
    /// that was generated by `authorization_url()`. This is a security measure
    /// against CSRF attacks.
    #[error("State parameter mismatch: expected '{expected}', received '{received}'")]
    StateMismatch {
        /// The expected state value that was generated.
        expected: String,
        /// The state value received in the callback.
        received: String,
    },

    /// Callback URL is invalid or malformed.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// Description of what's invalid about the callback.
        reason: String,
    },

    /// The provider redirected back with an `error` instead of a code.
    #[error("Authorization denied ({error}): {}", description.as_deref().unwrap_or("no description"))]
    AuthorizationDenied {
        /// The `error` parameter from the callback.
        error: String,
        /// The `error_description` parameter, if present.
        description: Option<String>,
    },

    /// Token endpoint request failed.
    ///
    /// The request to a token endpoint returned a non-success HTTP status.
    #[error("Token exchange failed with status {status}: {message}")]
    TokenExchangeFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },

    /// Wrapped HTTP client error.
    ///
    /// An error occurred during HTTP communication, such as a network failure
    /// or an unreadable client certificate.
    #[error(transparent)]
    HttpError(#[from] HttpError),
}

impl OAuthError {
    /// Returns `true` for failures where the provider did not authenticate the
    /// user: a malformed or denied callback, a state mismatch, or a token
    /// response that is missing fields or was rejected.
    #[must_use]
    pub const fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            Self::MissingResponseField { .. }
                | Self::InvalidResponseField { .. }
                | Self::StateMismatch { .. }
                | Self::InvalidCallback { .. }
                | Self::AuthorizationDenied { .. }
                | Self::TokenExchangeFailed { .. }
        )
    }
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
