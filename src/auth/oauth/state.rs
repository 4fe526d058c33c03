//! State parameter handling for OAuth CSRF protection.
//!
//! This module provides the [`StateParam`] type for generating and parsing
//! OAuth state parameters used for CSRF protection during the authorization flow.
//!
//! # Formats
//!
//! - **Simple nonce**: Generated via [`StateParam::new()`], a 30-character
//!   alphanumeric string.
//! - **Structured with data**: Generated via [`StateParam::with_data()`], embeds
//!   a nonce and custom JSON data in a base64-encoded string so the data comes
//!   back with the callback.
//! - **Raw string**: Created via [`StateParam::from_raw()`], typically to
//!   restore a state value the caller stored between redirect and callback.
//!
//! # Example
//!
//! ```rust
//! use threads_api::auth::oauth::StateParam;
//! use serde::{Serialize, Deserialize};
//!
//! let state = StateParam::new();
//! assert_eq!(state.as_ref().len(), 30);
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct FlowData {
//!     return_url: String,
//! }
//!
//! let state = StateParam::with_data(&FlowData { return_url: "/home".to_string() });
//! let restored = StateParam::from_raw(state.as_ref());
//! let data: Option<FlowData> = restored.extract_data();
//! assert_eq!(data.unwrap().return_url, "/home");
//! ```

use base64::prelude::*;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// OAuth state parameter for CSRF protection and data preservation.
///
/// # Thread Safety
///
/// `StateParam` is `Send + Sync`, making it safe to share across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

#[derive(Serialize, Deserialize)]
struct StructuredState<T> {
    nonce: String,
    data: T,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    /// The length of generated nonces.
    pub const NONCE_LENGTH: usize = 30;

    /// Creates a new state parameter with a random 30-character alphanumeric nonce.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value: generate_nonce(),
        }
    }

    /// Creates a state parameter with embedded custom data.
    ///
    /// The state is a base64-encoded JSON object holding a fresh nonce and
    /// the provided data.
    #[must_use]
    pub fn with_data<T: Serialize>(data: &T) -> Self {
        let structured = StructuredState {
            nonce: generate_nonce(),
            data,
        };
        let json = serde_json::to_string(&structured).unwrap_or_default();

        Self {
            value: BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes()),
        }
    }

    /// Wraps an existing state string, such as one restored from a session store.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// Extracts the embedded data from a structured state.
    ///
    /// Returns `None` if the state carries no data or the data does not
    /// deserialize to `T`.
    #[must_use]
    pub fn extract_data<T: DeserializeOwned>(&self) -> Option<T> {
        let decoded = BASE64_URL_SAFE_NO_PAD.decode(self.value.as_bytes()).ok()?;
        let structured: StructuredState<T> = serde_json::from_slice(&decoded).ok()?;
        Some(structured.data)
    }

    /// Compares a received state value against this one in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        constant_time_compare(&self.value, received)
    }
}

fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(StateParam::NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Compares two strings without leaking where they differ through timing.
pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
