//! Authenticated access to the Threads content API.
//!
//! [`ThreadsApi`] pairs a user's [`Credentials`] with an HTTP transport and
//! exposes the read operations (profile, threads, replies, insights) and the
//! publishing workflow (media containers, carousels, publish).
//!
//! Every operation checks the credentials' expiration before contacting the
//! API and fails with [`ApiError::TokenExpired`] without a network call when
//! the token has expired.
//!
//! # Transport Ownership
//!
//! - [`ThreadsApi::new`] creates its own [`HttpClient`] on the first request
//!   and releases it when the facade is dropped or [`ThreadsApi::close`]d.
//! - [`ThreadsApi::with_client`] uses a caller-supplied client, which is
//!   shared and never torn down by the facade.
//!
//! # Example
//!
//! ```rust,ignore
//! use threads_api::{PublishRequest, Media, ThreadsApi};
//!
//! let api = ThreadsApi::new(&config, credentials);
//!
//! let profile = api.me().await?;
//! println!("Hello, {}", profile["username"]);
//!
//! let thread_id = api
//!     .publish(
//!         &PublishRequest::new()
//!             .with_text("Two pictures")
//!             .with_attachment(Media::image("https://example.com/1.jpg"))
//!             .with_attachment(Media::image("https://example.com/2.jpg")),
//!     )
//!     .await?;
//!
//! api.close();
//! ```

mod errors;
mod fields;
mod publish;
mod read;
mod types;

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::auth::Credentials;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder};
use crate::config::ThreadsConfig;

pub use errors::ApiError;
pub use fields::{
    ACCOUNT as ACCOUNT_FIELDS, FOLLOWER_DEMOGRAPHICS, FOLLOWER_DEMOGRAPHIC_BREAKDOWNS,
    MEDIA as MEDIA_FIELDS, USER_METRICS,
};
pub use publish::{MAX_CAROUSEL_ITEMS, MIN_CAROUSEL_ITEMS};
pub use types::{
    ContainerParams, ContainerStatus, Media, MediaType, PublishRequest, PublishingError,
    PublishingStatus, ReplyControl, ThreadsQuery,
};

/// Where the facade gets its HTTP client from.
enum Transport {
    /// Created on first use from the stored configuration.
    Owned {
        config: ThreadsConfig,
        client: OnceCell<HttpClient>,
    },
    /// Supplied by the caller.
    External(Arc<HttpClient>),
}

/// Client for the Threads content API, bound to one user's credentials.
///
/// # Thread Safety
///
/// `ThreadsApi` is `Send + Sync`. Its methods take `&self`, so a single
/// instance can serve concurrent tasks.
pub struct ThreadsApi {
    credentials: Credentials,
    transport: Transport,
}

// Verify ThreadsApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ThreadsApi>();
};

impl ThreadsApi {
    /// Creates a facade that builds its own HTTP client from `config`.
    ///
    /// The client (including any mutual-TLS identity) is created lazily on
    /// the first request, so construction never fails.
    #[must_use]
    pub fn new(config: &ThreadsConfig, credentials: Credentials) -> Self {
        Self {
            credentials,
            transport: Transport::Owned {
                config: config.clone(),
                client: OnceCell::new(),
            },
        }
    }

    /// Creates a facade that sends requests through a caller-supplied client.
    #[must_use]
    pub fn with_client(credentials: Credentials, client: Arc<HttpClient>) -> Self {
        Self {
            credentials,
            transport: Transport::External(client),
        }
    }

    /// Returns the credentials used for requests.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the credentials mutably, e.g. to apply a refreshed token.
    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    /// Returns `true` when the facade created (or will create) its own client.
    #[must_use]
    pub const fn owns_transport(&self) -> bool {
        matches!(self.transport, Transport::Owned { .. })
    }

    /// Releases the facade and any client it created.
    ///
    /// A caller-supplied client is left untouched.
    pub fn close(self) {
        drop(self);
    }

    /// Returns the HTTP client, creating the owned one if needed.
    async fn client(&self) -> Result<&HttpClient, ApiError> {
        match &self.transport {
            Transport::External(client) => Ok(client.as_ref()),
            Transport::Owned { config, client } => {
                let client = client
                    .get_or_try_init(|| async { HttpClient::new(config) })
                    .await?;
                Ok(client)
            }
        }
    }

    /// Fails with [`ApiError::TokenExpired`] when the credentials have expired.
    fn ensure_not_expired(&self) -> Result<(), ApiError> {
        if self.credentials.expired() {
            return Err(ApiError::TokenExpired);
        }
        Ok(())
    }

    /// Starts an authenticated request after checking the expiration.
    fn request(
        &self,
        method: HttpMethod,
        path: impl Into<String>,
    ) -> Result<HttpRequestBuilder, ApiError> {
        self.ensure_not_expired()?;
        Ok(HttpRequest::builder(method, path).access_token(&self.credentials.access_token))
    }

    /// Sends a request and returns the decoded body.
    async fn execute(&self, request: HttpRequest) -> Result<serde_json::Value, ApiError> {
        let client = self.client().await?;
        let response = client.request(request).await?;
        Ok(response.body)
    }
}

impl Drop for ThreadsApi {
    fn drop(&mut self) {
        if let Transport::Owned { client, .. } = &self.transport {
            if client.initialized() {
                tracing::debug!(user_id = %self.credentials.user_id, "Released Graph API HTTP client");
            }
        }
    }
}

impl fmt::Debug for ThreadsApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadsApi")
            .field("credentials", &self.credentials)
            .field("owns_transport", &self.owns_transport())
            .finish()
    }
}
