//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};

/// A validated Threads application id.
///
/// This newtype ensures the app id is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use threads_api::AppId;
///
/// let id = AppId::new("1234567890").unwrap();
/// assert_eq!(id.as_ref(), "1234567890");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppId(String);

impl AppId {
    /// Creates a new validated app id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppId`] if the id is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyAppId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated Threads application secret.
///
/// This newtype ensures the secret is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use threads_api::AppSecret;
///
/// let secret = AppSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "AppSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AppSecret(String);

impl AppSecret {
    /// Creates a new validated app secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAppSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptyAppSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for AppSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(*****)")
    }
}

/// A validated OAuth redirect URI.
///
/// The URI must be absolute and must match one of the redirect URIs
/// registered for the app in the Meta developer dashboard.
///
/// # Example
///
/// ```rust
/// use threads_api::RedirectUri;
///
/// let uri = RedirectUri::new("https://myapp.example.com/callback").unwrap();
/// assert_eq!(uri.as_ref(), "https://myapp.example.com/callback");
/// assert!(RedirectUri::new("/callback").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectUri(String);

impl RedirectUri {
    /// Creates a new validated redirect URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRedirectUri`] if the URI cannot be parsed
    /// as an absolute URL with a host.
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into().trim().to_string();
        match url::Url::parse(&uri) {
            Ok(parsed) if parsed.host_str().is_some() => Ok(Self(uri)),
            _ => Err(ConfigError::InvalidRedirectUri { url: uri }),
        }
    }
}

impl AsRef<str> for RedirectUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated base URL for provider endpoints.
///
/// Base URLs are normalized to end with a trailing `/` so that resource
/// paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use threads_api::BaseUrl;
///
/// let url = BaseUrl::new("https://graph.threads.net/v1.0").unwrap();
/// assert_eq!(url.as_ref(), "https://graph.threads.net/v1.0/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL is not an absolute
    /// `http` or `https` URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let mut url = url.into().trim().to_string();
        let valid = url::Url::parse(&url)
            .is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"));
        if !valid {
            return Err(ConfigError::InvalidBaseUrl { url });
        }
        if !url.ends_with('/') {
            url.push('/');
        }
        Ok(Self(url))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// File paths of the PEM-encoded client certificate and private key used
/// for mutual TLS with the token endpoints.
///
/// The files are read when an [`HttpClient`](crate::clients::HttpClient) is
/// constructed, not when the configuration is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientCertificate {
    cert_path: PathBuf,
    key_path: PathBuf,
}

impl ClientCertificate {
    /// Creates a client certificate reference from a certificate and key path.
    #[must_use]
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    /// Returns the certificate file path.
    #[must_use]
    pub fn cert_path(&self) -> &Path {
        &self.cert_path
    }

    /// Returns the private key file path.
    #[must_use]
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }
}
