//! Authentication types for the Threads API SDK.
//!
//! This module provides the types that describe who the SDK is acting for
//! and what it may do.
//!
//! # Overview
//!
//! - [`Scopes`]: The ordered list of requested permission scopes
//! - [`Credentials`]: The user id, scopes, and access token used for API calls
//! - [`TokenGrant`]: A new token and expiration from an exchange or refresh
//! - [`oauth`]: The OAuth 2.0 authorization code flow and token lifecycle
//!
//! # Token Lifecycle
//!
//! Tokens move through three states:
//!
//! - **Unauthenticated**: no credentials yet
//! - **Short-lived**: issued by the authorization code exchange, valid for about an hour
//! - **Long-lived**: exchanged from a short-lived token, valid for about 60 days
//!   and refreshable while still valid
//!
//! # Example
//!
//! ```rust,ignore
//! use threads_api::auth::oauth::{authorization_url, complete_authorization};
//!
//! // 1. Generate the authorization URL and remember the state
//! let request = authorization_url(&config);
//! // Redirect the user to request.auth_url
//!
//! // 2. Handle the redirect back and get long-lived credentials
//! let credentials = complete_authorization(&config, &callback_url, &request.state, true).await?;
//! println!("{}", credentials.to_json()?);
//! ```

pub mod credentials;
pub mod oauth;
mod scopes;

pub use credentials::{Credentials, TokenGrant};
pub use scopes::Scopes;
