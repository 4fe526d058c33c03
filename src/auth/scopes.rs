//! OAuth scope handling for the Threads API.
//!
//! This module provides the [`Scopes`] type for managing the ordered list of
//! permissions requested during authorization and recorded on credentials.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ordered list of Threads permission scopes.
///
/// Order is preserved as given and duplicates are dropped. The authorization
/// URL carries the scopes comma-joined; persisted credentials carry them as a
/// JSON array.
///
/// # Example
///
/// ```rust
/// use threads_api::Scopes;
///
/// let scopes: Scopes = "threads_basic, threads_content_publish".parse().unwrap();
/// assert_eq!(scopes.to_string(), "threads_basic,threads_content_publish");
///
/// let json = serde_json::to_string(&scopes).unwrap();
/// assert_eq!(json, r#"["threads_basic","threads_content_publish"]"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scopes {
    scopes: Vec<String>,
}

impl Scopes {
    /// Read access to profile and posts. Required by every other scope.
    pub const BASIC: &'static str = "threads_basic";
    /// Create and publish posts.
    pub const CONTENT_PUBLISH: &'static str = "threads_content_publish";
    /// Read post and account insights.
    pub const MANAGE_INSIGHTS: &'static str = "threads_manage_insights";
    /// Hide and unhide replies.
    pub const MANAGE_REPLIES: &'static str = "threads_manage_replies";
    /// Read replies and conversations.
    pub const READ_REPLIES: &'static str = "threads_read_replies";

    /// Creates an empty scope list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every permission scope the Threads API currently defines.
    #[must_use]
    pub fn all() -> Self {
        Self::from(vec![
            Self::BASIC.to_string(),
            Self::CONTENT_PUBLISH.to_string(),
            Self::MANAGE_INSIGHTS.to_string(),
            Self::MANAGE_REPLIES.to_string(),
            Self::READ_REPLIES.to_string(),
        ])
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns the number of scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if the given scope is present.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }

    /// Returns an iterator over the scopes in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    fn push_unique(&mut self, scope: &str) {
        if !self.contains(scope) {
            self.scopes.push(scope.to_string());
        }
    }
}

impl FromStr for Scopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = Self::new();

        for scope in s.split(',') {
            let scope = scope.trim();
            if scope.is_empty() {
                continue;
            }

            if !scope.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConfigError::InvalidScopes {
                    reason: format!("Invalid characters in scope: '{scope}'"),
                });
            }

            scopes.push_unique(scope);
        }

        Ok(scopes)
    }
}

impl From<Vec<String>> for Scopes {
    fn from(scopes: Vec<String>) -> Self {
        let mut result = Self::new();
        for scope in &scopes {
            let scope = scope.trim();
            if !scope.is_empty() {
                result.push_unique(scope);
            }
        }
        result
    }
}

impl fmt::Display for Scopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.scopes.join(","))
    }
}
