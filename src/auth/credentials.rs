//! Credential records for authenticated Threads API calls.
//!
//! This module provides the [`Credentials`] type, which holds the user id,
//! granted scopes, and access token produced by the OAuth flow, together with
//! the token's expiration instant.
//!
//! # Persistence
//!
//! The SDK never stores credentials itself. [`Credentials::to_json`] and
//! [`Credentials::from_json`] give callers a stable flat JSON form:
//!
//! ```json
//! {
//!   "user_id": "userid",
//!   "scopes": ["scope1", "scope2"],
//!   "short_lived": false,
//!   "access_token": "accesstoken",
//!   "expiration": "2024-06-30T00:00:00+00:00"
//! }
//! ```

use crate::auth::Scopes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A freshly issued access token and its expiration instant.
///
/// Returned by the long-lived token exchange and by token refresh, and
/// applied to existing [`Credentials`] with [`Credentials::apply_token_grant`].
#[derive(Clone, PartialEq, Eq)]
pub struct TokenGrant {
    /// The new access token.
    pub access_token: String,
    /// When the new token expires.
    pub expiration: DateTime<Utc>,
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"*****")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// The authenticated state needed to call the Threads API on behalf of a user.
///
/// Credentials start out short-lived after the authorization code exchange
/// and become long-lived once exchanged. Only long-lived credentials can be
/// refreshed.
///
/// # Thread Safety
///
/// `Credentials` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use threads_api::{Credentials, Scopes};
/// use chrono::{Duration, Utc};
///
/// let credentials = Credentials::new(
///     "1234567890",
///     Scopes::all(),
///     false,
///     "access-token",
///     Utc::now() + Duration::days(60),
/// );
///
/// assert!(!credentials.expired());
/// assert!(!format!("{credentials:?}").contains("access-token"));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// The Threads user id the token was issued for.
    pub user_id: String,

    /// The scopes requested when the token was issued.
    pub scopes: Scopes,

    /// Whether the token is still the short-lived one from the code exchange.
    pub short_lived: bool,

    /// The access token used to authenticate API calls.
    pub access_token: String,

    /// When the access token expires (always UTC).
    #[serde(with = "iso8601")]
    pub expiration: DateTime<Utc>,
}

impl Credentials {
    /// Creates a new credential record.
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        scopes: Scopes,
        short_lived: bool,
        access_token: impl Into<String>,
        expiration: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            scopes,
            short_lived,
            access_token: access_token.into(),
            expiration,
        }
    }

    /// Returns the whole number of seconds until the token expires, or `0`
    /// if it already has.
    #[must_use]
    pub fn expires_in(&self) -> u64 {
        seconds_until(self.expiration)
    }

    /// Returns `true` if the token has expired.
    ///
    /// A token with less than one second remaining counts as expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires_in() == 0
    }

    /// Replaces the token and expiration with a new grant and marks the
    /// credentials long-lived.
    pub fn apply_token_grant(&mut self, grant: TokenGrant) {
        self.access_token = grant.access_token;
        self.expiration = grant.expiration;
        self.short_lived = false;
    }

    /// Serializes the credentials to their JSON text form.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses credentials from their JSON text form.
    ///
    /// Any RFC 3339 offset is accepted for `expiration`; the value is
    /// normalized to UTC.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the text is not valid JSON, a field
    /// is missing, or the expiration is not an RFC 3339 timestamp.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("scopes", &self.scopes)
            .field("short_lived", &self.short_lived)
            .field("access_token", &"*****")
            .field("expiration", &self.expiration)
            .finish()
    }
}

// Verify Credentials is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credentials>();
};

pub(crate) fn seconds_until(instant: DateTime<Utc>) -> u64 {
    u64::try_from((instant - Utc::now()).num_seconds()).unwrap_or(0)
}

/// ISO-8601 timestamps with an explicit `+00:00` offset.
mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
