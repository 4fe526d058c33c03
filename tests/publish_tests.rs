//! Integration tests for the publishing workflow.
//!
//! These tests verify how `publish` dispatches to container creation,
//! carousel assembly, and publishing, counting the requests the mock Graph
//! API receives.

use chrono::{Duration, Utc};
use serde_json::json;
use threads_api::{
    ApiError, AppId, AppSecret, BaseUrl, ContainerParams, ContainerStatus, Credentials, Media,
    MediaType, PublishRequest, PublishingStatus, RedirectUri, ReplyControl, Scopes, ThreadsApi,
    ThreadsConfig,
};
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn create_config(server: &MockServer) -> ThreadsConfig {
    ThreadsConfig::builder()
        .app_id(AppId::new("1234").unwrap())
        .app_secret(AppSecret::new("app-secret").unwrap())
        .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
        .graph_api_base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

fn create_api(server: &MockServer, valid_for: Duration) -> ThreadsApi {
    let credentials = Credentials::new(
        "42",
        Scopes::all(),
        false,
        "test-token",
        Utc::now() + valid_for,
    );
    ThreadsApi::new(&create_config(server), credentials)
}

/// Returns the value of a query parameter of a recorded request.
fn param(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Mounts container creation that answers with an id derived from the media URL.
async fn mount_create_container(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/42/threads"))
        .respond_with(|request: &Request| {
            let id = match (
                param(request, "media_type").as_deref(),
                param(request, "image_url").or_else(|| param(request, "video_url")),
            ) {
                (Some("CAROUSEL"), _) => "parent".to_string(),
                (_, Some(url)) => format!("child-{}", url.rsplit('/').next().unwrap_or_default()),
                _ => "text-container".to_string(),
            };
            ResponseTemplate::new(200).set_body_json(json!({ "id": id }))
        })
        .mount(server)
        .await;
}

async fn mount_publish(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/42/threads_publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "published-1"})))
        .mount(server)
        .await;
}

async fn recorded(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap()
}

// ============================================================================
// create_container
// ============================================================================

#[tokio::test]
async fn test_create_text_container_params() {
    let server = MockServer::start().await;
    mount_create_container(&server).await;

    let params = ContainerParams::text("Hello, Threads!")
        .with_reply_control(ReplyControl::AccountsYouFollow)
        .with_reply_to_id("999");
    let id = create_api(&server, Duration::hours(1))
        .create_container(&params)
        .await
        .unwrap();
    assert_eq!(id, "text-container");

    let requests = recorded(&server).await;
    let request = &requests[0];
    assert_eq!(param(request, "media_type").as_deref(), Some("TEXT"));
    assert_eq!(param(request, "text").as_deref(), Some("Hello, Threads!"));
    assert_eq!(
        param(request, "reply_control").as_deref(),
        Some("accounts_you_follow")
    );
    assert_eq!(param(request, "reply_to_id").as_deref(), Some("999"));
    assert_eq!(param(request, "is_carousel_item"), None);
    assert_eq!(param(request, "image_url"), None);
    assert_eq!(param(request, "children"), None);
}

#[tokio::test]
async fn test_create_video_carousel_item_params() {
    let server = MockServer::start().await;
    mount_create_container(&server).await;

    let params = ContainerParams::carousel_item(Media::video("https://cdn.example.com/clip.mp4"));
    let id = create_api(&server, Duration::hours(1))
        .create_container(&params)
        .await
        .unwrap();
    assert_eq!(id, "child-clip.mp4");

    let requests = recorded(&server).await;
    let request = &requests[0];
    assert_eq!(param(request, "media_type").as_deref(), Some("VIDEO"));
    assert_eq!(
        param(request, "video_url").as_deref(),
        Some("https://cdn.example.com/clip.mp4")
    );
    assert_eq!(param(request, "image_url"), None);
    assert_eq!(param(request, "is_carousel_item").as_deref(), Some("true"));
    assert_eq!(param(request, "reply_control").as_deref(), Some("everyone"));
}

#[tokio::test]
async fn test_create_container_without_content_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = create_api(&server, Duration::hours(1));

    // Empty text counts as no text
    for params in [ContainerParams::default(), ContainerParams::text("")] {
        let result = api.create_container(&params).await;
        assert!(matches!(result, Err(ApiError::InvalidParameter { .. })));
    }
}

#[tokio::test]
async fn test_create_container_missing_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/42/threads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let error = create_api(&server, Duration::hours(1))
        .create_container(&ContainerParams::text("hi"))
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::MissingId { .. }));
    assert!(error.is_response_shape());
}

// ============================================================================
// create_carousel_container
// ============================================================================

#[tokio::test]
async fn test_carousel_container_joins_children_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/42/threads"))
        .and(query_param("media_type", "CAROUSEL"))
        .and(query_param("children", "c1,c2,c3"))
        .and(query_param("text", "Three"))
        .and(query_param("reply_control", "mentioned_only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "parent"})))
        .expect(1)
        .mount(&server)
        .await;

    let children = ["c1", "c2", "c3"].map(|id| ContainerStatus::new(id, PublishingStatus::Finished));
    let id = create_api(&server, Duration::hours(1))
        .create_carousel_container(&children, Some("Three"), ReplyControl::MentionedOnly, None)
        .await
        .unwrap();
    assert_eq!(id, "parent");
}

#[tokio::test]
async fn test_carousel_count_bounds_send_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let api = create_api(&server, Duration::hours(1));

    let one = vec![ContainerStatus::new("c1", PublishingStatus::Finished)];
    let eleven: Vec<ContainerStatus> = (0..11)
        .map(|i| ContainerStatus::new(format!("c{i}"), PublishingStatus::Finished))
        .collect();

    for children in [Vec::new(), one, eleven] {
        let result = api
            .create_carousel_container(&children, None, ReplyControl::Everyone, None)
            .await;
        assert!(matches!(result, Err(ApiError::InvalidParameter { .. })));
    }
}

#[tokio::test]
async fn test_carousel_accepts_ten_finished_children() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/42/threads"))
        .and(query_param("media_type", "CAROUSEL"))
        .and(query_param("children", "c0,c1,c2,c3,c4,c5,c6,c7,c8,c9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "parent"})))
        .expect(1)
        .mount(&server)
        .await;

    let ten: Vec<ContainerStatus> = (0..10)
        .map(|i| ContainerStatus::new(format!("c{i}"), PublishingStatus::Finished))
        .collect();
    let id = create_api(&server, Duration::hours(1))
        .create_carousel_container(&ten, None, ReplyControl::Everyone, None)
        .await
        .unwrap();
    assert_eq!(id, "parent");
}

#[tokio::test]
async fn test_carousel_rejects_unfinished_children() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let children = vec![
        ContainerStatus::new("c1", PublishingStatus::Finished),
        ContainerStatus::new("c2", PublishingStatus::InProgress),
    ];
    let result = create_api(&server, Duration::hours(1))
        .create_carousel_container(&children, None, ReplyControl::Everyone, None)
        .await;

    match result {
        Err(ApiError::InvalidParameter { reason }) => assert!(reason.contains("c2")),
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}

// ============================================================================
// publish
// ============================================================================

#[tokio::test]
async fn test_publish_text_only_makes_two_requests() {
    let server = MockServer::start().await;
    mount_create_container(&server).await;
    mount_publish(&server).await;

    let id = create_api(&server, Duration::hours(1))
        .publish(&PublishRequest::new().with_text("Just text"))
        .await
        .unwrap();
    assert_eq!(id, "published-1");

    let requests = recorded(&server).await;
    assert_eq!(requests.len(), 2);
    assert_eq!(param(&requests[0], "media_type").as_deref(), Some("TEXT"));
    assert_eq!(param(&requests[0], "is_carousel_item"), None);
    assert_eq!(requests[1].url.path(), "/42/threads_publish");
    assert_eq!(
        param(&requests[1], "creation_id").as_deref(),
        Some("text-container")
    );
}

#[tokio::test]
async fn test_publish_single_image_makes_two_requests() {
    let server = MockServer::start().await;
    mount_create_container(&server).await;
    mount_publish(&server).await;

    let request = PublishRequest::new()
        .with_text("One picture")
        .with_attachment(Media::image("https://cdn.example.com/a.jpg"))
        .with_reply_to_id("777");
    create_api(&server, Duration::hours(1))
        .publish(&request)
        .await
        .unwrap();

    let requests = recorded(&server).await;
    assert_eq!(requests.len(), 2);
    let create = &requests[0];
    assert_eq!(param(create, "media_type").as_deref(), Some("IMAGE"));
    assert_eq!(
        param(create, "image_url").as_deref(),
        Some("https://cdn.example.com/a.jpg")
    );
    assert_eq!(param(create, "text").as_deref(), Some("One picture"));
    assert_eq!(param(create, "reply_to_id").as_deref(), Some("777"));
    assert_eq!(param(create, "is_carousel_item"), None);
    assert_eq!(
        param(&requests[1], "creation_id").as_deref(),
        Some("child-a.jpg")
    );
}

#[tokio::test]
async fn test_publish_two_attachments_builds_carousel() {
    let server = MockServer::start().await;
    mount_create_container(&server).await;
    mount_publish(&server).await;

    let request = PublishRequest::new()
        .with_text("Two")
        .with_attachment(Media::image("https://cdn.example.com/a.jpg"))
        .with_attachment(Media::video("https://cdn.example.com/b.mp4"))
        .with_reply_control(ReplyControl::MentionedOnly);
    let id = create_api(&server, Duration::hours(1))
        .publish(&request)
        .await
        .unwrap();
    assert_eq!(id, "published-1");

    let requests = recorded(&server).await;
    assert_eq!(requests.len(), 4);

    // The two children may arrive in either order
    let children: Vec<&Request> = requests
        .iter()
        .filter(|r| param(r, "is_carousel_item").as_deref() == Some("true"))
        .collect();
    assert_eq!(children.len(), 2);
    for child in &children {
        assert_eq!(param(child, "text"), None);
        assert_eq!(param(child, "reply_control").as_deref(), Some("everyone"));
    }

    let parent = requests
        .iter()
        .find(|r| param(r, "media_type").as_deref() == Some("CAROUSEL"))
        .unwrap();
    assert_eq!(
        param(parent, "children").as_deref(),
        Some("child-a.jpg,child-b.mp4")
    );
    assert_eq!(param(parent, "text").as_deref(), Some("Two"));
    assert_eq!(
        param(parent, "reply_control").as_deref(),
        Some("mentioned_only")
    );

    let publish = requests.last().unwrap();
    assert_eq!(publish.url.path(), "/42/threads_publish");
    assert_eq!(param(publish, "creation_id").as_deref(), Some("parent"));
}

#[tokio::test]
async fn test_publish_creates_children_concurrently() {
    let server = MockServer::start().await;
    let delay = std::time::Duration::from_millis(800);
    Mock::given(method("POST"))
        .and(path("/42/threads"))
        .and(query_param("is_carousel_item", "true"))
        .respond_with(move |request: &Request| {
            let url = param(request, "image_url").unwrap_or_default();
            let id = format!("child-{}", url.rsplit('/').next().unwrap_or_default());
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": id }))
                .set_delay(delay)
        })
        .expect(2)
        .mount(&server)
        .await;
    mount_create_container(&server).await;
    mount_publish(&server).await;

    let request = PublishRequest::new()
        .with_attachment(Media::image("https://cdn.example.com/a.jpg"))
        .with_attachment(Media::image("https://cdn.example.com/b.jpg"));
    let started = std::time::Instant::now();
    create_api(&server, Duration::hours(1))
        .publish(&request)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    // Sequential child creation would take at least twice the delay
    assert!(elapsed >= delay);
    assert!(elapsed < delay * 2, "children were not created concurrently: {elapsed:?}");

    let requests = recorded(&server).await;
    let parent = requests
        .iter()
        .find(|r| param(r, "media_type").as_deref() == Some("CAROUSEL"))
        .unwrap();
    assert_eq!(
        param(parent, "children").as_deref(),
        Some("child-a.jpg,child-b.jpg")
    );
}

#[tokio::test]
async fn test_publish_child_failure_stops_workflow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/42/threads"))
        .and(query_param("image_url", "https://cdn.example.com/bad.jpg"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Media download failed"}
        })))
        .mount(&server)
        .await;
    mount_create_container(&server).await;
    Mock::given(method("POST"))
        .and(path("/42/threads_publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let request = PublishRequest::new()
        .with_attachment(Media::image("https://cdn.example.com/good.jpg"))
        .with_attachment(Media::image("https://cdn.example.com/bad.jpg"));
    let result = create_api(&server, Duration::hours(1))
        .publish(&request)
        .await;

    assert!(matches!(result, Err(ApiError::Http(_))));
    let requests = recorded(&server).await;
    assert!(requests
        .iter()
        .all(|r| param(r, "media_type").as_deref() != Some("CAROUSEL")));
}

#[tokio::test]
async fn test_publish_without_content_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let api = create_api(&server, Duration::hours(1));

    for request in [PublishRequest::new(), PublishRequest::new().with_text("")] {
        let result = api.publish(&request).await;
        assert!(matches!(result, Err(ApiError::InvalidParameter { .. })));
    }
}

#[tokio::test]
async fn test_publish_too_many_attachments_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = (0..11).fold(PublishRequest::new(), |request, i| {
        request.with_attachment(Media::image(format!("https://cdn.example.com/{i}.jpg")))
    });
    let result = create_api(&server, Duration::hours(1))
        .publish(&request)
        .await;
    assert!(matches!(result, Err(ApiError::InvalidParameter { .. })));
}

#[tokio::test]
async fn test_publish_rejects_text_attachment() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = PublishRequest::new()
        .with_attachment(Media::new(MediaType::Text, "https://cdn.example.com/a.txt"));
    let result = create_api(&server, Duration::hours(1))
        .publish(&request)
        .await;
    assert!(matches!(result, Err(ApiError::InvalidParameter { .. })));
}

#[tokio::test]
async fn test_expired_credentials_short_circuit_publishing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let api = create_api(&server, Duration::seconds(-1));

    // Expiry is checked before content validation
    assert!(matches!(
        api.publish(&PublishRequest::new()).await,
        Err(ApiError::TokenExpired)
    ));
    assert!(matches!(
        api.create_container(&ContainerParams::default()).await,
        Err(ApiError::TokenExpired)
    ));
    assert!(matches!(
        api.create_carousel_container(&[], None, ReplyControl::Everyone, None)
            .await,
        Err(ApiError::TokenExpired)
    ));
    assert!(matches!(
        api.publish_container("c1").await,
        Err(ApiError::TokenExpired)
    ));
}
