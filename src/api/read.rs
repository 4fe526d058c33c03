//! Read operations: profile, threads, replies, and insights.
//!
//! Responses are returned as the decoded JSON the API sent, without
//! reshaping.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::errors::ApiError;
use super::fields;
use super::types::ThreadsQuery;
use super::ThreadsApi;
use crate::clients::HttpMethod;

/// Date format for the `since`/`until` filters of the threads listing.
const DAY_FORMAT: &str = "%Y-%m-%d";

impl ThreadsApi {
    /// Fetches a user's profile.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn account(&self, user_id: &str) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, user_id)?
            .query_param("fields", fields::join(fields::ACCOUNT))
            .build();
        self.execute(request).await
    }

    /// Fetches the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Same as [`ThreadsApi::account`].
    pub async fn me(&self) -> Result<Value, ApiError> {
        self.account("me").await
    }

    /// Fetches the user's current publishing quota usage.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn publishing_limit(&self) -> Result<Value, ApiError> {
        let path = format!("{}/threads_publishing_limit", self.credentials.user_id);
        let request = self
            .request(HttpMethod::Get, path)?
            .query_param("fields", fields::join(fields::PUBLISHING_LIMIT))
            .build();
        self.execute(request).await
    }

    /// Fetches a media container or published thread by id.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn container(&self, id: &str) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, id)?
            .query_param("fields", fields::join(fields::MEDIA))
            .build();
        self.execute(request).await
    }

    /// Fetches a published thread by id. Same as [`ThreadsApi::container`].
    ///
    /// # Errors
    ///
    /// Same as [`ThreadsApi::container`].
    pub async fn thread(&self, id: &str) -> Result<Value, ApiError> {
        self.container(id).await
    }

    /// Lists the authenticated user's threads.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn threads(&self, query: &ThreadsQuery) -> Result<Value, ApiError> {
        let path = format!("{}/threads", self.credentials.user_id);
        let request = self
            .request(HttpMethod::Get, path)?
            .query_param("fields", fields::join(fields::MEDIA))
            .optional_query_param("since", query.since.map(|d| d.format(DAY_FORMAT).to_string()))
            .optional_query_param("until", query.until.map(|d| d.format(DAY_FORMAT).to_string()))
            .optional_query_param("limit", query.limit.map(|l| l.to_string()))
            .optional_query_param("before", query.before.as_deref())
            .optional_query_param("after", query.after.as_deref())
            .build();
        self.execute(request).await
    }

    /// Lists the top-level replies to a thread.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn replies(&self, thread_id: &str) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, format!("{thread_id}/replies"))?
            .query_param("fields", fields::join(fields::MEDIA))
            .build();
        self.execute(request).await
    }

    /// Lists every reply in a thread's conversation, at any depth.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn conversation(
        &self,
        thread_id: &str,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, format!("{thread_id}/conversation"))?
            .query_param("fields", fields::join(fields::MEDIA))
            .optional_query_param("before", before)
            .optional_query_param("after", after)
            .build();
        self.execute(request).await
    }

    /// Hides or unhides a reply to one of the user's threads.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn manage_reply(&self, reply_id: &str, hide: bool) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Post, format!("{reply_id}/manage_reply"))?
            .query_param("hide", hide.to_string())
            .build();
        self.execute(request).await
    }

    /// Fetches engagement metrics for one thread.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::Http`] if the request fails
    pub async fn insights(&self, thread_id: &str) -> Result<Value, ApiError> {
        let request = self
            .request(HttpMethod::Get, format!("{thread_id}/insights"))?
            .query_param("fields", fields::join(fields::MEDIA_INSIGHTS))
            .build();
        self.execute(request).await
    }

    /// Fetches account-level metrics for the authenticated user.
    ///
    /// `since` and `until` are sent as Unix timestamps. `breakdown` is
    /// required when `metrics` contains `follower_demographics` and is
    /// ignored otherwise.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::InvalidParameter`] if `metrics` is empty, names an
    ///   unknown metric, or asks for follower demographics without a valid
    ///   breakdown
    /// - [`ApiError::Http`] if the request fails
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let views = api.user_insights(&["views", "likes"], None, None, None).await?;
    /// let by_country = api
    ///     .user_insights(&["follower_demographics"], None, None, Some("country"))
    ///     .await?;
    /// ```
    pub async fn user_insights(
        &self,
        metrics: &[&str],
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        breakdown: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.ensure_not_expired()?;
        validate_user_metrics(metrics, breakdown)?;

        let path = format!("{}/threads_insights", self.credentials.user_id);
        let request = self
            .request(HttpMethod::Get, path)?
            .query_param("metric", fields::join(metrics))
            .optional_query_param("since", since.map(|t| t.timestamp().to_string()))
            .optional_query_param("until", until.map(|t| t.timestamp().to_string()))
            .optional_query_param("breakdown", breakdown)
            .build();
        self.execute(request).await
    }
}

fn validate_user_metrics(metrics: &[&str], breakdown: Option<&str>) -> Result<(), ApiError> {
    if metrics.is_empty() {
        return Err(ApiError::invalid_parameter("at least one metric is required"));
    }

    let invalid: BTreeSet<&str> = metrics
        .iter()
        .copied()
        .filter(|metric| !fields::USER_METRICS.contains(metric))
        .collect();
    if !invalid.is_empty() {
        let names: Vec<&str> = invalid.into_iter().collect();
        return Err(ApiError::invalid_parameter(format!(
            "Invalid metrics provided: {}",
            names.join(", ")
        )));
    }

    if metrics.contains(&fields::FOLLOWER_DEMOGRAPHICS) {
        match breakdown {
            Some(value) if fields::FOLLOWER_DEMOGRAPHIC_BREAKDOWNS.contains(&value) => {}
            _ => {
                return Err(ApiError::invalid_parameter(format!(
                    "{} requires a breakdown of {}",
                    fields::FOLLOWER_DEMOGRAPHICS,
                    fields::FOLLOWER_DEMOGRAPHIC_BREAKDOWNS.join(", ")
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(result: Result<(), ApiError>) -> String {
        match result {
            Err(ApiError::InvalidParameter { reason }) => reason,
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_all_known_metrics_pass_without_demographics() {
        assert!(validate_user_metrics(&["views", "likes", "followers_count"], None).is_ok());
    }

    #[test]
    fn test_invalid_metrics_sorted_and_deduplicated() {
        let reason = reason(validate_user_metrics(
            &["views", "shares", "clicks", "shares"],
            None,
        ));
        assert_eq!(reason, "Invalid metrics provided: clicks, shares");
    }

    #[test]
    fn test_empty_metrics_rejected() {
        assert!(reason(validate_user_metrics(&[], None)).contains("at least one metric"));
    }

    #[test]
    fn test_follower_demographics_requires_breakdown() {
        let reason = reason(validate_user_metrics(&["follower_demographics"], None));
        assert!(reason.contains("requires a breakdown"));

        assert!(validate_user_metrics(&["follower_demographics"], Some("planet")).is_err());
        assert!(validate_user_metrics(&["follower_demographics"], Some("city")).is_ok());
    }

    #[test]
    fn test_breakdown_ignored_without_demographics() {
        assert!(validate_user_metrics(&["views"], Some("planet")).is_ok());
    }
}
