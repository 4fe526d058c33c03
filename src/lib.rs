//! # Threads API Rust SDK
//!
//! A Rust SDK for the Threads API, providing type-safe configuration, the
//! OAuth token lifecycle, and an async client for reading and publishing
//! Threads content.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ThreadsConfig`] and [`ThreadsConfigBuilder`]
//! - Validated newtypes for app credentials and URLs
//! - OAuth 2.0 authorization code flow via [`auth::oauth`]
//! - Long-lived token exchange and refresh via [`auth::oauth`]
//! - Serializable [`Credentials`] records
//! - Read operations and the publishing workflow via [`ThreadsApi`]
//!
//! ## Quick Start
//!
//! ```rust
//! use threads_api::{ThreadsConfig, AppId, AppSecret, RedirectUri, Scopes};
//!
//! // Create configuration using the builder pattern
//! let config = ThreadsConfig::builder()
//!     .app_id(AppId::new("your-app-id").unwrap())
//!     .app_secret(AppSecret::new("your-app-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://your-app.com/callback").unwrap())
//!     .scopes("threads_basic,threads_content_publish".parse().unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.scopes().len(), 2);
//! ```
//!
//! Configuration can also be read from `THREADS_*` environment variables
//! with [`ThreadsConfig::from_env`].
//!
//! ## OAuth Authentication
//!
//! ```rust,ignore
//! use threads_api::auth::oauth::{authorization_url, complete_authorization};
//!
//! // Step 1: Redirect the user to Threads and store the state
//! let request = authorization_url(&config);
//! // session.set("oauth_state", request.state.as_ref());
//!
//! // Step 2: Handle the redirect back
//! let credentials = complete_authorization(&config, &callback_url, &stored_state, true).await?;
//!
//! // Step 3: Persist the credentials yourself
//! save(credentials.to_json()?);
//! ```
//!
//! ## Token Refresh
//!
//! Long-lived tokens last about 60 days. Refresh them while still valid:
//!
//! ```rust,ignore
//! use threads_api::auth::oauth::refresh_credentials;
//!
//! refresh_credentials(&config, &mut credentials).await?;
//! ```
//!
//! ## Reading and Publishing
//!
//! ```rust,ignore
//! use threads_api::{Media, PublishRequest, ThreadsApi, ThreadsQuery};
//!
//! let api = ThreadsApi::new(&config, credentials);
//!
//! let recent = api.threads(&ThreadsQuery::new().limit(5)).await?;
//!
//! let thread_id = api
//!     .publish(
//!         &PublishRequest::new()
//!             .with_text("Hello from Rust")
//!             .with_attachment(Media::image("https://example.com/cat.jpg")),
//!     )
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction, and every
//!   API call checks token expiry before touching the network
//! - **Thread-safe**: All public types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No persistence**: Credentials are serialized for the caller, never stored

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use auth::{Credentials, Scopes, TokenGrant};
pub use config::{
    AppId, AppSecret, BaseUrl, ClientCertificate, RedirectUri, ThreadsConfig, ThreadsConfigBuilder,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{HttpClient, HttpError, HttpResponseError};

// Re-export API facade types
pub use api::{
    ApiError, ContainerParams, ContainerStatus, Media, MediaType, PublishRequest,
    PublishingError, PublishingStatus, ReplyControl, ThreadsApi, ThreadsQuery,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{
    authorization_url, complete_authorization, fetch_long_lived_token, fetch_user_id_and_token,
    refresh_credentials, refresh_long_lived_token, AuthorizationRequest, OAuthError, StateParam,
};
