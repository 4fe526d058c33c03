//! Field lists and parameter values requested from the Graph API.

/// Profile fields returned by `account`.
pub const ACCOUNT: &[&str] = &["threads_biography", "threads_profile_picture_url", "username"];

/// Quota fields returned by `publishing_limit`.
pub const PUBLISHING_LIMIT: &[&str] = &[
    "config",
    "quota_usage",
    "reply_config",
    "reply_quota_usage",
];

/// Media object fields returned for threads, replies, and conversations.
pub const MEDIA: &[&str] = &[
    "children",
    "id",
    "is_quote_post",
    "media_product_type",
    "media_type",
    "media_url",
    "owner",
    "permalink",
    "shortcode",
    "text",
    "thumbnail_url",
    "timestamp",
    "username",
];

/// Metrics returned by media `insights`.
pub const MEDIA_INSIGHTS: &[&str] = &["likes", "quotes", "replies", "reposts", "views"];

/// Fields returned by `container_status`.
pub const CONTAINER_STATUS: &[&str] = &["id", "status", "error_message"];

/// Metrics accepted by `user_insights`.
pub const USER_METRICS: &[&str] = &[
    "views",
    "likes",
    "replies",
    "reposts",
    "quotes",
    "followers_count",
    FOLLOWER_DEMOGRAPHICS,
];

/// The user metric that requires a breakdown.
pub const FOLLOWER_DEMOGRAPHICS: &str = "follower_demographics";

/// Breakdown dimensions accepted for `follower_demographics`.
pub const FOLLOWER_DEMOGRAPHIC_BREAKDOWNS: &[&str] = &["age", "city", "country", "gender"];

/// Joins a field list into the comma-separated form the API expects.
pub(crate) fn join(fields: &[&str]) -> String {
    fields.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_fields_join() {
        assert_eq!(
            join(MEDIA),
            "children,id,is_quote_post,media_product_type,media_type,media_url,owner,permalink,shortcode,text,thumbnail_url,timestamp,username"
        );
    }

    #[test]
    fn test_user_metrics_include_follower_demographics() {
        assert!(USER_METRICS.contains(&FOLLOWER_DEMOGRAPHICS));
        assert_eq!(USER_METRICS.len(), 7);
    }
}
