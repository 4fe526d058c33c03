//! Configuration types for the Threads API SDK.
//!
//! This module provides the core configuration types used to initialize
//! the SDK for OAuth and API communication with Threads.
//!
//! # Overview
//!
//! - [`ThreadsConfig`]: The main configuration struct holding all SDK settings
//! - [`ThreadsConfigBuilder`]: A builder for constructing [`ThreadsConfig`] instances,
//!   optionally pre-filled from environment variables
//! - [`AppId`], [`AppSecret`], [`RedirectUri`]: Validated credential newtypes
//! - [`BaseUrl`]: A validated endpoint base URL
//! - [`ClientCertificate`]: Mutual-TLS certificate and key paths
//!
//! # Environment Variables
//!
//! [`ThreadsConfigBuilder::from_env`] reads:
//!
//! | Variable | Setting |
//! |---|---|
//! | `THREADS_APP_ID` | app id (required) |
//! | `THREADS_API_SECRET` | app secret (required) |
//! | `THREADS_REDIRECT_URI` | redirect URI (required) |
//! | `THREADS_GRAPH_API_VERSION` | optional version path segment, e.g. `v1.0` |
//! | `THREADS_SSL_CERT_FILEPATH` | client certificate PEM (required unless `CI` is set) |
//! | `THREADS_SSL_KEY_FILEPATH` | client key PEM (required unless `CI` is set) |
//!
//! # Example
//!
//! ```rust
//! use threads_api::{ThreadsConfig, AppId, AppSecret, RedirectUri};
//!
//! let config = ThreadsConfig::builder()
//!     .app_id(AppId::new("my-app-id").unwrap())
//!     .app_secret(AppSecret::new("my-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.graph_api_base_url().as_ref(), "https://graph.threads.net/");
//! ```

mod newtypes;

pub use newtypes::{AppId, AppSecret, BaseUrl, ClientCertificate, RedirectUri};

use chrono::Duration;

use crate::auth::Scopes;
use crate::error::ConfigError;

/// Default host of the Threads Graph API.
pub const DEFAULT_GRAPH_API_HOST: &str = "https://graph.threads.net/";

/// Default OAuth authorization page.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://threads.net/oauth/authorize";

/// Configuration for the Threads API SDK.
///
/// Holds the app credentials, requested scopes, and transport settings
/// needed by the OAuth flow and the API facade. Built once at process start
/// and passed by reference; there is no global state.
///
/// # Thread Safety
///
/// `ThreadsConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ThreadsConfig {
    app_id: AppId,
    app_secret: AppSecret,
    redirect_uri: RedirectUri,
    scopes: Scopes,
    client_certificate: Option<ClientCertificate>,
    graph_api_base_url: BaseUrl,
    authorization_url: String,
    short_lived_token_lifetime: Duration,
    user_agent_prefix: Option<String>,
}

impl ThreadsConfig {
    /// Creates a new builder for constructing a `ThreadsConfig`.
    #[must_use]
    pub fn builder() -> ThreadsConfigBuilder {
        ThreadsConfigBuilder::new()
    }

    /// Loads the configuration entirely from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        ThreadsConfigBuilder::from_env()?.build()
    }

    /// Returns the app id.
    #[must_use]
    pub const fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Returns the app secret.
    #[must_use]
    pub const fn app_secret(&self) -> &AppSecret {
        &self.app_secret
    }

    /// Returns the OAuth redirect URI.
    #[must_use]
    pub const fn redirect_uri(&self) -> &RedirectUri {
        &self.redirect_uri
    }

    /// Returns the requested scopes.
    #[must_use]
    pub const fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    /// Returns the mutual-TLS client certificate, if configured.
    #[must_use]
    pub const fn client_certificate(&self) -> Option<&ClientCertificate> {
        self.client_certificate.as_ref()
    }

    /// Returns the Graph API base URL, always ending in `/`.
    #[must_use]
    pub const fn graph_api_base_url(&self) -> &BaseUrl {
        &self.graph_api_base_url
    }

    /// Returns the OAuth authorization page URL.
    #[must_use]
    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    /// Returns the lifetime assumed for short-lived tokens.
    ///
    /// The provider does not report it on the code exchange, so the
    /// expiration of a fresh short-lived token is computed client-side.
    #[must_use]
    pub const fn short_lived_token_lifetime(&self) -> Duration {
        self.short_lived_token_lifetime
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ThreadsConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ThreadsConfig>();
};

/// Builder for constructing [`ThreadsConfig`] instances.
///
/// Required fields are `app_id`, `app_secret`, and `redirect_uri`.
///
/// # Defaults
///
/// - `scopes`: [`Scopes::all()`] (also used when an empty list is given)
/// - `graph_api_base_url`: `https://graph.threads.net/` plus the API version, if set
/// - `authorization_url`: `https://threads.net/oauth/authorize`
/// - `short_lived_token_lifetime`: 1 hour
/// - `client_certificate`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ThreadsConfigBuilder {
    app_id: Option<AppId>,
    app_secret: Option<AppSecret>,
    redirect_uri: Option<RedirectUri>,
    scopes: Option<Scopes>,
    client_certificate: Option<ClientCertificate>,
    graph_api_version: Option<String>,
    graph_api_base_url: Option<BaseUrl>,
    authorization_url: Option<String>,
    short_lived_token_lifetime: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ThreadsConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-filled from environment variables.
    ///
    /// Values set afterwards through the builder methods override the
    /// environment. Missing app id, secret, or redirect URI are reported by
    /// [`build`](Self::build).
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingClientCertificate`] if either certificate path
    ///   is unset and the `CI` variable is not present
    /// - Validation errors for values that are present but malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut builder = Self::new();

        if let Some(app_id) = get("THREADS_APP_ID") {
            builder.app_id = Some(AppId::new(app_id)?);
        }
        if let Some(secret) = get("THREADS_API_SECRET") {
            builder.app_secret = Some(AppSecret::new(secret)?);
        }
        if let Some(uri) = get("THREADS_REDIRECT_URI") {
            builder.redirect_uri = Some(RedirectUri::new(uri)?);
        }
        builder.graph_api_version = get("THREADS_GRAPH_API_VERSION");

        match (
            get("THREADS_SSL_CERT_FILEPATH"),
            get("THREADS_SSL_KEY_FILEPATH"),
        ) {
            (Some(cert), Some(key)) => {
                builder.client_certificate = Some(ClientCertificate::new(cert, key));
            }
            _ if lookup("CI").is_some() => {}
            _ => return Err(ConfigError::MissingClientCertificate),
        }

        Ok(builder)
    }

    /// Sets the app id (required).
    #[must_use]
    pub fn app_id(mut self, app_id: AppId) -> Self {
        self.app_id = Some(app_id);
        self
    }

    /// Sets the app secret (required).
    #[must_use]
    pub fn app_secret(mut self, secret: AppSecret) -> Self {
        self.app_secret = Some(secret);
        self
    }

    /// Sets the OAuth redirect URI (required).
    #[must_use]
    pub fn redirect_uri(mut self, uri: RedirectUri) -> Self {
        self.redirect_uri = Some(uri);
        self
    }

    /// Sets the requested scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: Scopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the mutual-TLS client certificate used for token endpoints.
    #[must_use]
    pub fn client_certificate(mut self, certificate: ClientCertificate) -> Self {
        self.client_certificate = Some(certificate);
        self
    }

    /// Sets the Graph API version path segment (e.g. `v1.0`).
    ///
    /// Ignored when [`graph_api_base_url`](Self::graph_api_base_url) is set.
    #[must_use]
    pub fn graph_api_version(mut self, version: impl Into<String>) -> Self {
        self.graph_api_version = Some(version.into());
        self
    }

    /// Overrides the Graph API base URL.
    #[must_use]
    pub fn graph_api_base_url(mut self, url: BaseUrl) -> Self {
        self.graph_api_base_url = Some(url);
        self
    }

    /// Overrides the OAuth authorization page URL.
    #[must_use]
    pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    /// Sets the lifetime assumed for short-lived tokens.
    #[must_use]
    pub const fn short_lived_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.short_lived_token_lifetime = Some(lifetime);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ThreadsConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if `app_id`, `app_secret`, or
    ///   `redirect_uri` are not set
    /// - [`ConfigError::InvalidBaseUrl`] if a URL override is malformed
    pub fn build(self) -> Result<ThreadsConfig, ConfigError> {
        let app_id = self
            .app_id
            .ok_or(ConfigError::MissingRequiredField { field: "app_id" })?;
        let app_secret = self
            .app_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "app_secret",
            })?;
        let redirect_uri = self
            .redirect_uri
            .ok_or(ConfigError::MissingRequiredField {
                field: "redirect_uri",
            })?;

        let scopes = self
            .scopes
            .filter(|scopes| !scopes.is_empty())
            .unwrap_or_else(Scopes::all);

        let graph_api_base_url = match (self.graph_api_base_url, self.graph_api_version) {
            (Some(url), _) => url,
            (None, Some(version)) => BaseUrl::new(format!("{DEFAULT_GRAPH_API_HOST}{version}"))?,
            (None, None) => BaseUrl::new(DEFAULT_GRAPH_API_HOST)?,
        };

        let authorization_url = self
            .authorization_url
            .unwrap_or_else(|| DEFAULT_AUTHORIZATION_URL.to_string());
        if url::Url::parse(&authorization_url).is_err() {
            return Err(ConfigError::InvalidBaseUrl {
                url: authorization_url,
            });
        }

        Ok(ThreadsConfig {
            app_id,
            app_secret,
            redirect_uri,
            scopes,
            client_certificate: self.client_certificate,
            graph_api_base_url,
            authorization_url,
            short_lived_token_lifetime: self
                .short_lived_token_lifetime
                .unwrap_or_else(|| Duration::hours(1)),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
