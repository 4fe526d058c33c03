//! OAuth callback handling and authorization code exchange.
//!
//! After the user authorizes the app, Threads redirects them to the
//! configured redirect URI with `code` and `state` query parameters. This
//! module:
//!
//! 1. Parses the callback URL into an [`AuthCallback`]
//! 2. Verifies the state parameter matches to prevent CSRF attacks
//! 3. Exchanges the authorization code for a short-lived token
//! 4. Optionally exchanges that for a long-lived token and returns [`Credentials`]
//!
//! # Example
//!
//! ```rust,ignore
//! use threads_api::auth::oauth::complete_authorization;
//!
//! // Full URL of the request Threads redirected the user to
//! let callback_url = "https://myapp.example.com/callback?code=AQB...&state=abc";
//!
//! // Retrieve the expected state from the user's session
//! let expected_state = session.get::<String>("oauth_state")?;
//!
//! let credentials = complete_authorization(&config, callback_url, &expected_state, true).await?;
//! ```

use chrono::{DateTime, Utc};
use std::fmt;

use crate::auth::credentials::Credentials;
use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::long_lived::fetch_long_lived_token;
use crate::auth::oauth::state::constant_time_compare;
use crate::auth::oauth::token_request;
use crate::clients::{HttpMethod, HttpRequest};
use crate::config::ThreadsConfig;

/// Query parameters Threads appends to the redirect URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthCallback {
    /// The authorization code.
    pub code: String,
    /// The echoed state parameter, if present.
    pub state: Option<String>,
}

impl AuthCallback {
    /// Parses the full callback URL.
    ///
    /// # Errors
    ///
    /// - [`OAuthError::InvalidCallback`] if the URL cannot be parsed or has no `code`
    /// - [`OAuthError::AuthorizationDenied`] if the provider sent an `error` parameter
    ///
    /// # Example
    ///
    /// ```rust
    /// use threads_api::auth::oauth::AuthCallback;
    ///
    /// let callback = AuthCallback::parse(
    ///     "https://myapp.example.com/callback?code=AQBx&state=abc#_",
    /// ).unwrap();
    /// assert_eq!(callback.code, "AQBx");
    /// assert_eq!(callback.state.as_deref(), Some("abc"));
    /// ```
    pub fn parse(callback_url: &str) -> Result<Self, OAuthError> {
        let url = url::Url::parse(callback_url).map_err(|e| OAuthError::InvalidCallback {
            reason: format!("Cannot parse callback URL: {e}"),
        })?;

        let mut code = None;
        let mut state = None;
        let mut error = None;
        let mut description = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                "error_description" => description = Some(value.into_owned()),
                "error_reason" if description.is_none() => description = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            return Err(OAuthError::AuthorizationDenied { error, description });
        }

        let code = code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| OAuthError::InvalidCallback {
                reason: "Callback URL does not include an authorization code".to_string(),
            })?;

        Ok(Self { code, state })
    }
}

/// A short-lived token returned by the authorization code exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct ShortLivedToken {
    /// The Threads user id the token was issued for.
    pub user_id: String,
    /// The short-lived access token.
    pub access_token: String,
    /// When the token expires.
    pub expiration: DateTime<Utc>,
}

impl fmt::Debug for ShortLivedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortLivedToken")
            .field("user_id", &self.user_id)
            .field("access_token", &"*****")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Exchanges the authorization code in a callback URL for a short-lived token.
///
/// # Arguments
///
/// * `config` - Threads SDK configuration
/// * `callback_url` - The full URL Threads redirected the user to
/// * `expected_state` - The state stored when the authorization URL was generated
///
/// # Errors
///
/// - [`OAuthError::AuthorizationDenied`]: The callback carries an `error`
/// - [`OAuthError::InvalidCallback`]: The callback URL is malformed or lacks a code
/// - [`OAuthError::StateMismatch`]: The echoed state doesn't match
/// - [`OAuthError::TokenExchangeFailed`]: The token endpoint rejected the code
/// - [`OAuthError::MissingResponseField`]: `access_token` or `user_id` is missing
/// - [`OAuthError::InvalidResponseField`]: `access_token` or `user_id` has the wrong type
/// - [`OAuthError::HttpError`]: Network or client certificate failure
pub async fn fetch_user_id_and_token(
    config: &ThreadsConfig,
    callback_url: &str,
    expected_state: &str,
) -> Result<ShortLivedToken, OAuthError> {
    let callback = AuthCallback::parse(callback_url)?;

    let received = callback.state.as_deref().unwrap_or_default();
    if !constant_time_compare(received, expected_state) {
        return Err(OAuthError::StateMismatch {
            expected: expected_state.to_string(),
            received: received.to_string(),
        });
    }

    let request = HttpRequest::builder(HttpMethod::Post, "oauth/access_token")
        .form_param("client_id", config.app_id().as_ref())
        .form_param("client_secret", config.app_secret().as_ref())
        .form_param("grant_type", "authorization_code")
        .form_param("redirect_uri", config.redirect_uri().as_ref())
        .form_param("code", callback.code)
        .build();

    let response = token_request::send(config, request).await?;
    let access_token = token_request::string_field(&response.body, "access_token")?;
    let user_id = token_request::id_field(&response.body, "user_id")?;

    tracing::info!(user_id = %user_id, "Exchanged authorization code for short-lived token");

    Ok(ShortLivedToken {
        user_id,
        access_token,
        expiration: Utc::now() + config.short_lived_token_lifetime(),
    })
}

/// Completes the authorization flow and returns credentials.
///
/// Exchanges the code for a short-lived token and, when `long_lived` is
/// `true`, immediately exchanges that for a long-lived token. The credentials
/// carry the scopes from `config`.
///
/// # Errors
///
/// Any error from [`fetch_user_id_and_token`], and when `long_lived` is set,
/// any error from [`fetch_long_lived_token`].
pub async fn complete_authorization(
    config: &ThreadsConfig,
    callback_url: &str,
    expected_state: &str,
    long_lived: bool,
) -> Result<Credentials, OAuthError> {
    let token = fetch_user_id_and_token(config, callback_url, expected_state).await?;

    let mut credentials = Credentials::new(
        token.user_id,
        config.scopes().clone(),
        true,
        token.access_token,
        token.expiration,
    );

    if !long_lived {
        return Ok(credentials);
    }

    let grant =
        fetch_long_lived_token(config, &credentials.access_token, credentials.expiration).await?;
    credentials.apply_token_grant(grant);

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extracts_code_and_state() {
        let callback =
            AuthCallback::parse("https://myapp.example.com/callback?code=abc123&state=xyz")
                .unwrap();
        assert_eq!(callback.code, "abc123");
        assert_eq!(callback.state.as_deref(), Some("xyz"));
    }

    #[test]
    fn test_parse_ignores_fragment_suffix() {
        let callback =
            AuthCallback::parse("https://myapp.example.com/callback?code=abc123&state=s#_")
                .unwrap();
        assert_eq!(callback.code, "abc123");
    }

    #[test]
    fn test_parse_without_code_is_invalid() {
        let result = AuthCallback::parse("https://myapp.example.com/callback?state=xyz");
        assert!(matches!(result, Err(OAuthError::InvalidCallback { .. })));
    }

    #[test]
    fn test_parse_rejects_non_url() {
        let result = AuthCallback::parse("not a url");
        assert!(matches!(result, Err(OAuthError::InvalidCallback { .. })));
    }

    #[test]
    fn test_parse_reports_provider_error() {
        let result = AuthCallback::parse(
            "https://myapp.example.com/callback?error=access_denied&error_reason=user_denied&error_description=Permissions+error",
        );
        match result {
            Err(OAuthError::AuthorizationDenied { error, description }) => {
                assert_eq!(error, "access_denied");
                assert_eq!(description.as_deref(), Some("Permissions error"));
            }
            other => panic!("expected AuthorizationDenied, got {other:?}"),
        }
    }

    #[test]
    fn test_short_lived_token_debug_masks_token() {
        let token = ShortLivedToken {
            user_id: "42".to_string(),
            access_token: "short-secret".to_string(),
            expiration: Utc::now(),
        };
        let debug = format!("{token:?}");
        assert!(debug.contains("42"));
        assert!(!debug.contains("short-secret"));
    }
}
