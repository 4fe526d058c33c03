//! OAuth 2.0 authorization code flow and token lifecycle for Threads.
//!
//! # Authorization Code Flow
//!
//! 1. **Authorization Initiation** ([`authorization_url`]): Generate an
//!    authorization URL and redirect the user to Threads to grant access.
//!
//! 2. **Callback Handling** ([`complete_authorization`]): When the user is
//!    redirected back, verify the state, exchange the code for a short-lived
//!    token, and (by default) exchange that for a long-lived token.
//!
//! The lower-level steps are available as [`fetch_user_id_and_token`] and
//! [`fetch_long_lived_token`].
//!
//! # Token Refresh
//!
//! Long-lived tokens last about 60 days and can be refreshed while still
//! valid with [`refresh_long_lived_token`] or [`refresh_credentials`].
//! Short-lived tokens cannot be refreshed.
//!
//! # Security Features
//!
//! - **CSRF Protection**: A 30-character random state parameter is verified on callback
//! - **Constant-Time Comparison**: The state comparison does not leak timing
//! - **Mutual TLS**: Token endpoints are called with the configured client certificate
//!
//! # Example
//!
//! ```rust,ignore
//! use threads_api::{ThreadsConfig, Credentials};
//! use threads_api::auth::oauth::{authorization_url, complete_authorization, OAuthError};
//!
//! let config = ThreadsConfig::from_env()?;
//!
//! // Step 1: Begin authorization
//! let request = authorization_url(&config);
//! // session.set("oauth_state", request.state.as_ref());
//! // return Redirect::to(&request.auth_url);
//!
//! // Step 2: Handle callback (in your callback handler)
//! async fn handle_callback(
//!     config: &ThreadsConfig,
//!     callback_url: &str,
//!     stored_state: &str,
//! ) -> Result<Credentials, OAuthError> {
//!     complete_authorization(config, callback_url, stored_state, true).await
//! }
//! ```

mod authorization_url;
mod callback;
mod error;
mod long_lived;
mod state;
mod token_request;

pub use authorization_url::{authorization_url, authorization_url_with_state, AuthorizationRequest};
pub use callback::{complete_authorization, fetch_user_id_and_token, AuthCallback, ShortLivedToken};
pub use error::OAuthError;
pub use long_lived::{fetch_long_lived_token, refresh_credentials, refresh_long_lived_token};
pub use state::StateParam;
