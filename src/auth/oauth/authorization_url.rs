//! OAuth authorization URL generation.
//!
//! This module provides the [`authorization_url`] function for generating the
//! Threads authorization URL and the [`AuthorizationRequest`] struct
//! containing the URL and state parameter.
//!
//! # Example
//!
//! ```rust
//! use threads_api::{ThreadsConfig, AppId, AppSecret, RedirectUri};
//! use threads_api::auth::oauth::authorization_url;
//!
//! let config = ThreadsConfig::builder()
//!     .app_id(AppId::new("1234").unwrap())
//!     .app_secret(AppSecret::new("secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
//!     .scopes("threads_basic,threads_content_publish".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let request = authorization_url(&config);
//! assert!(request.auth_url.starts_with("https://threads.net/oauth/authorize?response_type=code"));
//! assert!(request.auth_url.contains("scope=threads_basic%2Cthreads_content_publish"));
//! ```

use crate::auth::oauth::state::StateParam;
use crate::config::ThreadsConfig;

/// Result of initiating OAuth authorization.
///
/// # Important
///
/// The `state` value **must** be stored by your application and passed to
/// [`complete_authorization`](crate::auth::oauth::complete_authorization)
/// when handling the callback. This is essential for CSRF protection.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    /// The full authorization URL to redirect the user to.
    pub auth_url: String,

    /// The state parameter generated for this authorization request.
    pub state: StateParam,
}

/// Builds the authorization URL with a fresh random state.
///
/// No network call is made.
#[must_use]
pub fn authorization_url(config: &ThreadsConfig) -> AuthorizationRequest {
    authorization_url_with_state(config, StateParam::new())
}

/// Builds the authorization URL with a caller-provided state.
///
/// Use together with [`StateParam::with_data`] to carry data through the
/// redirect round trip.
#[must_use]
pub fn authorization_url_with_state(
    config: &ThreadsConfig,
    state: StateParam,
) -> AuthorizationRequest {
    let params = [
        ("response_type", "code".to_string()),
        ("client_id", config.app_id().as_ref().to_string()),
        ("redirect_uri", config.redirect_uri().as_ref().to_string()),
        ("scope", config.scopes().to_string()),
        ("state", state.to_string()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let auth_url = format!("{}?{}", config.authorization_url(), query_string);

    AuthorizationRequest { auth_url, state }
}

// Verify AuthorizationRequest is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthorizationRequest>();
};
