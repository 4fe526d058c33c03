//! HTTP client for Threads Graph API communication.
//!
//! This module provides the [`HttpClient`] type for sending requests to the
//! Graph API, optionally presenting a mutual-TLS client certificate.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::graph_url::build_graph_api_url;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{ClientCertificate, ThreadsConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Threads Graph API.
///
/// The client handles:
/// - URL construction from the configured Graph API base URL
/// - Default headers including User-Agent
/// - Loading the mutual-TLS identity required by the token endpoints
/// - Mapping non-2xx responses to [`HttpResponseError`]
///
/// Each request is sent once; there is no retry.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use threads_api::clients::{HttpClient, HttpRequest, HttpMethod};
///
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "me")
///     .query_param("fields", "id,username")
///     .access_token(&credentials.access_token)
///     .build();
///
/// let response = client.request(request).await?;
/// println!("{}", response.body);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://graph.threads.net/v1.0/`).
    base_uri: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration.
    ///
    /// When the configuration carries a [`ClientCertificate`], the certificate
    /// and key PEM files are read here and installed as the TLS identity.
    ///
    /// # Errors
    ///
    /// - [`HttpError::ClientCertificate`] if the certificate or key cannot be
    ///   read or parsed
    /// - [`HttpError::Network`] if the underlying reqwest client cannot be built
    pub fn new(config: &ThreadsConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();

        if let Some(certificate) = config.client_certificate() {
            builder = builder.identity(load_identity(certificate)?);
        }

        let client = builder.build()?;
        tracing::debug!(
            base_uri = config.graph_api_base_url().as_ref(),
            mutual_tls = config.client_certificate().is_some(),
            "Created Graph API HTTP client"
        );

        Ok(Self::with_reqwest_client(client, config))
    }

    /// Creates an HTTP client around an existing reqwest client.
    ///
    /// Useful when the caller manages TLS settings or connection pooling
    /// itself.
    #[must_use]
    pub fn with_reqwest_client(client: reqwest::Client, config: &ThreadsConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Threads API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            client,
            base_uri: config.graph_api_base_url().as_ref().to_string(),
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Network error occurs, including while reading the body (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - 2xx response whose body is not JSON (`InvalidBody`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = build_graph_api_url(
            &self.base_uri,
            &request.path,
            &request.query,
            request.access_token.as_deref(),
        );

        // Never log the URL itself: the query string carries the access token
        tracing::debug!(method = %request.http_method, path = %request.path, "Sending Graph API request");

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(form) = &request.form {
            req_builder = req_builder.form(form);
        }

        let res = req_builder.send().await.map_err(reqwest::Error::without_url)?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.map_err(reqwest::Error::without_url)?;
        let body = decode_body(code, body_text)?;

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        let message = response.error_message();
        tracing::warn!(
            method = %request.http_method,
            path = %request.path,
            status = code,
            "Graph API request failed: {message}"
        );

        Err(HttpError::Response(HttpResponseError {
            code,
            message,
            error_reference: response.trace_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

/// Decodes a response body as JSON.
///
/// An empty body decodes to `{}`. An error response that is not JSON is kept
/// under `raw_body` so its text can still be reported; a success response
/// that is not JSON is an [`HttpError::InvalidBody`].
fn decode_body(code: u16, body_text: String) -> Result<serde_json::Value, HttpError> {
    if body_text.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }

    match serde_json::from_str(&body_text) {
        Ok(body) => Ok(body),
        Err(e) if (200..300).contains(&code) => Err(HttpError::InvalidBody {
            code,
            reason: e.to_string(),
        }),
        Err(_) => Ok(serde_json::json!({ "raw_body": body_text })),
    }
}

/// Reads the certificate and key PEM files into a single TLS identity.
fn load_identity(certificate: &ClientCertificate) -> Result<reqwest::Identity, HttpError> {
    let read = |path: &std::path::Path| {
        std::fs::read(path).map_err(|e| HttpError::ClientCertificate {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    };

    let mut pem = read(certificate.cert_path())?;
    pem.push(b'\n');
    pem.extend(read(certificate.key_path())?);

    reqwest::Identity::from_pem(&pem).map_err(|e| HttpError::ClientCertificate {
        path: certificate.cert_path().to_path_buf(),
        reason: e.to_string(),
    })
}
