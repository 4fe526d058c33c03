//! Shared request handling for the token endpoints.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::auth::credentials::TokenGrant;
use crate::auth::oauth::error::OAuthError;
use crate::clients::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::config::ThreadsConfig;

/// Sends a token endpoint request over a client built from `config`.
///
/// A client is built per call so that the configured client certificate is
/// always presented.
pub(crate) async fn send(
    config: &ThreadsConfig,
    request: HttpRequest,
) -> Result<HttpResponse, OAuthError> {
    let client = HttpClient::new(config)?;

    client.request(request).await.map_err(|error| match error {
        HttpError::Response(e) => OAuthError::TokenExchangeFailed {
            status: e.code,
            message: e.message,
        },
        other => OAuthError::HttpError(other),
    })
}

/// Looks up a field, treating `null` as absent.
fn field<'a>(body: &'a Value, name: &'static str) -> Result<&'a Value, OAuthError> {
    match body.get(name) {
        None | Some(Value::Null) => Err(OAuthError::MissingResponseField { field: name }),
        Some(value) => Ok(value),
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> OAuthError {
    OAuthError::InvalidResponseField {
        field: name,
        reason: reason.into(),
    }
}

/// Reads a string field from a token endpoint response body.
pub(crate) fn string_field(body: &Value, name: &'static str) -> Result<String, OAuthError> {
    field(body, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(name, "expected a string"))
}

/// Reads an id that the provider may send as a string or an integer.
pub(crate) fn id_field(body: &Value, name: &'static str) -> Result<String, OAuthError> {
    match field(body, name)? {
        Value::String(id) if !id.is_empty() => Ok(id.clone()),
        Value::Number(id) if id.is_u64() || id.is_i64() => Ok(id.to_string()),
        _ => Err(invalid(name, "expected a non-empty string or an integer")),
    }
}

/// Converts a lifetime in seconds into an absolute expiration after `now`.
fn expiration_after(now: DateTime<Utc>, seconds: u64) -> Option<DateTime<Utc>> {
    let lifetime = Duration::from_std(std::time::Duration::from_secs(seconds)).ok()?;
    now.checked_add_signed(lifetime)
}

/// Reads `access_token` and `expires_in` into a [`TokenGrant`].
pub(crate) fn parse_token_grant(response: &HttpResponse) -> Result<TokenGrant, OAuthError> {
    let access_token = string_field(&response.body, "access_token")?;
    let seconds = field(&response.body, "expires_in")?
        .as_u64()
        .ok_or_else(|| invalid("expires_in", "expected a non-negative integer"))?;
    let expiration = expiration_after(Utc::now(), seconds)
        .ok_or_else(|| invalid("expires_in", format!("{seconds} seconds is out of range")))?;

    Ok(TokenGrant {
        access_token,
        expiration,
    })
}
