//! Integration tests for the Threads API SDK.
//!
//! These tests verify end-to-end functionality of the configuration system,
//! credential records, and authorization URL generation through the public
//! API only.

use chrono::{Duration, TimeZone, Utc};
use threads_api::auth::oauth::{authorization_url, authorization_url_with_state, StateParam};
use threads_api::{
    AppId, AppSecret, BaseUrl, ClientCertificate, ConfigError, Credentials, RedirectUri, Scopes,
    ThreadsConfig,
};

#[test]
fn test_full_workflow_create_newtypes_build_config_access_fields() {
    // Create validated newtypes
    let app_id = AppId::new("1234").unwrap();
    let app_secret = AppSecret::new("app-secret").unwrap();
    let scopes: Scopes = "threads_basic, threads_manage_insights".parse().unwrap();
    let redirect_uri = RedirectUri::new("https://myapp.example.com/callback").unwrap();

    // Build configuration
    let config = ThreadsConfig::builder()
        .app_id(app_id)
        .app_secret(app_secret)
        .redirect_uri(redirect_uri)
        .scopes(scopes.clone())
        .graph_api_version("v1.0")
        .client_certificate(ClientCertificate::new("/etc/threads/cert.pem", "/etc/threads/key.pem"))
        .short_lived_token_lifetime(Duration::minutes(30))
        .user_agent_prefix("TestApp/1.0")
        .build()
        .unwrap();

    // Access fields and verify
    assert_eq!(config.app_id().as_ref(), "1234");
    assert_eq!(config.redirect_uri().as_ref(), "https://myapp.example.com/callback");
    assert_eq!(config.scopes(), &scopes);
    assert_eq!(config.graph_api_base_url().as_ref(), "https://graph.threads.net/v1.0/");
    assert_eq!(config.short_lived_token_lifetime(), Duration::minutes(30));
    assert_eq!(config.user_agent_prefix(), Some("TestApp/1.0"));
    assert!(config.client_certificate().is_some());
}

#[test]
fn test_missing_required_fields_are_reported() {
    let result = ThreadsConfig::builder()
        .app_id(AppId::new("1234").unwrap())
        .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::MissingRequiredField { field: "app_secret" })
    ));
}

#[test]
fn test_invalid_values_fail_fast() {
    assert!(matches!(AppId::new("  "), Err(ConfigError::EmptyAppId)));
    assert!(AppSecret::new("").is_err());
    assert!(RedirectUri::new("not a url").is_err());
    assert!(BaseUrl::new("ftp://graph.threads.net").is_err());
}

#[test]
fn test_authorization_url_carries_config_values() {
    let config = ThreadsConfig::builder()
        .app_id(AppId::new("1234").unwrap())
        .app_secret(AppSecret::new("app-secret").unwrap())
        .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
        .build()
        .unwrap();

    let request = authorization_url(&config);
    let url = url::Url::parse(&request.auth_url).unwrap();
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert_eq!(url.host_str(), Some("threads.net"));
    assert_eq!(url.path(), "/oauth/authorize");
    assert_eq!(
        params,
        vec![
            ("response_type".to_string(), "code".to_string()),
            ("client_id".to_string(), "1234".to_string()),
            (
                "redirect_uri".to_string(),
                "https://myapp.example.com/callback".to_string()
            ),
            (
                "scope".to_string(),
                "threads_basic,threads_content_publish,threads_manage_insights,threads_manage_replies,threads_read_replies".to_string()
            ),
            ("state".to_string(), request.state.to_string()),
        ]
    );
    assert_eq!(request.state.as_ref().len(), 30);
}

#[test]
fn test_state_with_data_survives_round_trip() {
    let config = ThreadsConfig::builder()
        .app_id(AppId::new("1234").unwrap())
        .app_secret(AppSecret::new("app-secret").unwrap())
        .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
        .build()
        .unwrap();

    let state = StateParam::with_data(&serde_json::json!({"return_to": "/dashboard"}));
    let request = authorization_url_with_state(&config, state);

    let url = url::Url::parse(&request.auth_url).unwrap();
    let echoed = url
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .unwrap();

    let received = StateParam::from_raw(echoed);
    let data: serde_json::Value = received.extract_data().unwrap();
    assert_eq!(data["return_to"], "/dashboard");
    assert!(request.state.matches(received.as_ref()));
}

#[test]
fn test_credentials_persist_and_restore() {
    let expiration = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
    let credentials = Credentials::new(
        "userid",
        "scope1,scope2".parse().unwrap(),
        false,
        "accesstoken",
        expiration,
    );

    let json = credentials.to_json().unwrap();
    assert_eq!(
        json,
        r#"{"user_id":"userid","scopes":["scope1","scope2"],"short_lived":false,"access_token":"accesstoken","expiration":"2024-06-30T00:00:00+00:00"}"#
    );

    let restored = Credentials::from_json(&json).unwrap();
    assert_eq!(restored, credentials);
    assert!(restored.expired());
    assert_eq!(restored.expires_in(), 0);
}

#[test]
fn test_multiple_configs_are_independent() {
    let build = |app_id: &str| {
        ThreadsConfig::builder()
            .app_id(AppId::new(app_id).unwrap())
            .app_secret(AppSecret::new("app-secret").unwrap())
            .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
            .build()
            .unwrap()
    };

    let config_a = build("app-a");
    let config_b = build("app-b");

    assert_eq!(config_a.app_id().as_ref(), "app-a");
    assert_eq!(config_b.app_id().as_ref(), "app-b");

    // Configs can move across threads
    let handle = std::thread::spawn(move || config_a.app_id().as_ref().to_string());
    assert_eq!(handle.join().unwrap(), "app-a");
}
