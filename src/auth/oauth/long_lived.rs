//! Long-lived token exchange and refresh.
//!
//! Short-lived tokens last about an hour. Exchanging one yields a long-lived
//! token valid for about 60 days, which can be refreshed any time before it
//! expires.
//!
//! - [`fetch_long_lived_token`]: Exchange a valid short-lived token
//! - [`refresh_long_lived_token`]: Refresh a valid long-lived token
//! - [`refresh_credentials`]: Refresh and apply the result in place
//!
//! Both operations check the expiration first and fail with
//! [`OAuthError::TokenExpired`] without contacting the API.
//!
//! # Example
//!
//! ```rust,ignore
//! use threads_api::auth::oauth::refresh_credentials;
//!
//! if credentials.expires_in() < 7 * 24 * 60 * 60 {
//!     refresh_credentials(&config, &mut credentials).await?;
//!     store(credentials.to_json()?);
//! }
//! ```

use chrono::{DateTime, Utc};

use crate::auth::credentials::{Credentials, TokenGrant};
use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::token_request;
use crate::clients::{HttpMethod, HttpRequest};
use crate::config::ThreadsConfig;

/// Grant type for exchanging a short-lived token.
const EXCHANGE_GRANT_TYPE: &str = "th_exchange_token";

/// Grant type for refreshing a long-lived token.
const REFRESH_GRANT_TYPE: &str = "th_refresh_token";

/// Exchanges a short-lived access token for a long-lived one.
///
/// # Arguments
///
/// * `config` - Threads SDK configuration
/// * `access_token` - The short-lived access token
/// * `expiration` - When the short-lived token expires
///
/// # Errors
///
/// - [`OAuthError::TokenExpired`] if `expiration` is not in the future
/// - [`OAuthError::TokenExchangeFailed`] if the endpoint rejects the token
/// - [`OAuthError::MissingResponseField`] if `access_token` or `expires_in` is missing
/// - [`OAuthError::HttpError`] for network or client certificate failures
pub async fn fetch_long_lived_token(
    config: &ThreadsConfig,
    access_token: &str,
    expiration: DateTime<Utc>,
) -> Result<TokenGrant, OAuthError> {
    if expiration <= Utc::now() {
        return Err(OAuthError::TokenExpired);
    }

    let request = HttpRequest::builder(HttpMethod::Get, "access_token")
        .query_param("grant_type", EXCHANGE_GRANT_TYPE)
        .query_param("client_secret", config.app_secret().as_ref())
        .access_token(access_token)
        .build();

    let response = token_request::send(config, request).await?;
    let grant = token_request::parse_token_grant(&response)?;

    tracing::info!(expiration = %grant.expiration, "Exchanged short-lived token for long-lived token");

    Ok(grant)
}

/// Refreshes a long-lived access token.
///
/// # Errors
///
/// - [`OAuthError::ShortLivedTokenNotRefreshable`] if `credentials.short_lived` is set
/// - [`OAuthError::TokenExpired`] if the credentials have expired
/// - [`OAuthError::TokenExchangeFailed`] if the endpoint rejects the token
/// - [`OAuthError::MissingResponseField`] if `access_token` or `expires_in` is missing
/// - [`OAuthError::HttpError`] for network or client certificate failures
pub async fn refresh_long_lived_token(
    config: &ThreadsConfig,
    credentials: &Credentials,
) -> Result<TokenGrant, OAuthError> {
    if credentials.short_lived {
        return Err(OAuthError::ShortLivedTokenNotRefreshable);
    }

    if credentials.expired() {
        return Err(OAuthError::TokenExpired);
    }

    let request = HttpRequest::builder(HttpMethod::Get, "refresh_access_token")
        .query_param("grant_type", REFRESH_GRANT_TYPE)
        .access_token(&credentials.access_token)
        .build();

    let response = token_request::send(config, request).await?;
    let grant = token_request::parse_token_grant(&response)?;

    tracing::info!(
        user_id = %credentials.user_id,
        expiration = %grant.expiration,
        "Refreshed long-lived token"
    );

    Ok(grant)
}

/// Refreshes a long-lived token and applies the new grant to `credentials`.
///
/// On error the credentials are left unchanged.
///
/// # Errors
///
/// Same as [`refresh_long_lived_token`].
pub async fn refresh_credentials(
    config: &ThreadsConfig,
    credentials: &mut Credentials,
) -> Result<(), OAuthError> {
    let grant = refresh_long_lived_token(config, credentials).await?;
    credentials.apply_token_grant(grant);
    Ok(())
}
