//! Error types for Threads API operations.
//!
//! # Error Categories
//!
//! - [`ApiError::TokenExpired`]: The credentials expired, so no request was made
//! - [`ApiError::InvalidParameter`]: The caller's arguments were rejected before any request
//! - [`ApiError::MissingId`], [`ApiError::UnknownStatus`], [`ApiError::UnknownPublishingError`]:
//!   The API answered, but not in the expected shape
//! - [`ApiError::Http`]: Transport failure or non-2xx response
//!
//! # Example
//!
//! ```rust
//! use threads_api::ApiError;
//!
//! let error = ApiError::UnknownStatus { status: "QUEUED".to_string() };
//! assert!(error.is_response_shape());
//! assert!(!ApiError::TokenExpired.is_response_shape());
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur when calling the Threads API.
///
/// # Thread Safety
///
/// `ApiError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The credentials' access token has expired.
    ///
    /// Raised before any network call. Refresh the token or send the user
    /// through authorization again.
    #[error("The access token has expired. Refresh it or reauthenticate the user with Threads.")]
    TokenExpired,

    /// A caller-supplied argument failed validation.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// What was wrong with the arguments.
        reason: String,
    },

    /// A create or publish response did not contain an `id`.
    #[error("Response from the Threads API did not include an `id`: {response}")]
    MissingId {
        /// The response body as received.
        response: serde_json::Value,
    },

    /// A container status response carried an unrecognized status.
    #[error("Unknown container status '{status}'")]
    UnknownStatus {
        /// The status string as received.
        status: String,
    },

    /// A container status response carried an unrecognized error kind.
    #[error("Unknown publishing error '{error}'")]
    UnknownPublishingError {
        /// The error string as received.
        error: String,
    },

    /// Wrapped HTTP client error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ApiError {
    pub(crate) fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Returns `true` when the API responded but the body did not have the
    /// expected shape.
    #[must_use]
    pub const fn is_response_shape(&self) -> bool {
        matches!(
            self,
            Self::MissingId { .. }
                | Self::UnknownStatus { .. }
                | Self::UnknownPublishingError { .. }
                | Self::Http(HttpError::InvalidBody { .. })
        )
    }
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
