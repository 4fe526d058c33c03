//! URL composition for Graph API endpoints.

/// Builds a full Graph API URL from a base URL, a resource path, and query
/// parameters.
///
/// Parameters are percent-encoded and appended in the order given. When an
/// access token is supplied it is appended last as `access_token`. No `?` is
/// emitted when there is nothing to append.
///
/// # Example
///
/// ```rust
/// use threads_api::clients::build_graph_api_url;
///
/// let url = build_graph_api_url(
///     "https://graph.threads.net/",
///     "/me",
///     &[("fields".to_string(), "id,username".to_string())],
///     Some("token"),
/// );
/// assert_eq!(
///     url,
///     "https://graph.threads.net/me?fields=id%2Cusername&access_token=token"
/// );
/// ```
#[must_use]
pub fn build_graph_api_url(
    base_url: &str,
    path: &str,
    params: &[(String, String)],
    access_token: Option<&str>,
) -> String {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    let query: Vec<String> = params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .chain(access_token.map(|token| ("access_token", token)))
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect();

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_url_without_params_has_no_query() {
        let url = build_graph_api_url("https://graph.threads.net/", "me", &[], None);
        assert_eq!(url, "https://graph.threads.net/me");
    }

    #[test]
    fn test_slashes_are_normalized() {
        let url = build_graph_api_url("https://graph.threads.net/v1.0/", "/123/threads", &[], None);
        assert_eq!(url, "https://graph.threads.net/v1.0/123/threads");

        let url = build_graph_api_url("http://127.0.0.1:8080", "me", &[], None);
        assert_eq!(url, "http://127.0.0.1:8080/me");
    }

    #[test]
    fn test_params_keep_order_and_token_is_last() {
        let url = build_graph_api_url(
            "https://graph.threads.net/",
            "me/threads",
            &params(&[("limit", "10"), ("after", "abc")]),
            Some("tok"),
        );
        assert_eq!(
            url,
            "https://graph.threads.net/me/threads?limit=10&after=abc&access_token=tok"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let url = build_graph_api_url(
            "https://graph.threads.net/",
            "me/threads",
            &params(&[("text", "hello world & more")]),
            None,
        );
        assert_eq!(
            url,
            "https://graph.threads.net/me/threads?text=hello%20world%20%26%20more"
        );
    }
}
