//! The publishing workflow.
//!
//! Posting to Threads takes two steps: create a media container, then
//! publish it. Carousels add a step: each image or video becomes a child
//! container, and a parent `CAROUSEL` container references the children.
//!
//! [`ThreadsApi::publish`] runs the whole workflow. The granular steps are
//! available for callers that need to poll container status between them.
//!
//! Containers left behind by a failed workflow are not cleaned up; the API
//! expires unpublished containers after 24 hours.

use futures::future::try_join_all;
use serde_json::Value;

use super::errors::ApiError;
use super::fields;
use super::types::{
    ContainerParams, ContainerStatus, Media, MediaType, PublishRequest, PublishingError,
    PublishingStatus, ReplyControl,
};
use super::ThreadsApi;
use crate::clients::HttpMethod;

/// Fewest items a carousel can hold.
pub const MIN_CAROUSEL_ITEMS: usize = 2;

/// Most items a carousel can hold.
pub const MAX_CAROUSEL_ITEMS: usize = 10;

impl ThreadsApi {
    /// Creates a single media container and returns its id.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::InvalidParameter`] if neither non-empty text nor media
    ///   is set, or the media is not an image or video
    /// - [`ApiError::MissingId`] if the response has no `id`
    /// - [`ApiError::Http`] if the request fails
    pub async fn create_container(&self, params: &ContainerParams) -> Result<String, ApiError> {
        self.ensure_not_expired()?;

        let text = params.text.as_deref().filter(|text| !text.is_empty());
        if text.is_none() && params.media.is_none() {
            return Err(ApiError::invalid_parameter(
                "a container requires text, media, or both",
            ));
        }
        if let Some(media) = &params.media {
            ensure_attachable(media)?;
        }

        let media_type = params
            .media
            .as_ref()
            .map_or(MediaType::Text, |media| media.media_type);

        let mut builder = self
            .request(HttpMethod::Post, self.threads_path())?
            .query_param("media_type", media_type.as_str())
            .optional_query_param("text", text);

        if let Some(media) = &params.media {
            let key = match media.media_type {
                MediaType::Video => "video_url",
                _ => "image_url",
            };
            builder = builder.query_param(key, media.url.as_str());
        }

        builder = builder
            .query_param("reply_control", params.reply_control.as_str())
            .optional_query_param("reply_to_id", params.reply_to_id.as_deref());

        if params.is_carousel_item {
            builder = builder.query_param("is_carousel_item", "true");
        }

        let body = self.execute(builder.build()).await?;
        let id = response_id(body)?;
        tracing::debug!(container_id = %id, media_type = %media_type, "Created media container");
        Ok(id)
    }

    /// Creates a carousel container from processed child containers and
    /// returns its id.
    ///
    /// Children keep their input order. Every child must have finished
    /// processing.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::InvalidParameter`] if there are fewer than 2 or more
    ///   than 10 children, or any child is not `FINISHED`
    /// - [`ApiError::MissingId`] if the response has no `id`
    /// - [`ApiError::Http`] if the request fails
    pub async fn create_carousel_container(
        &self,
        children: &[ContainerStatus],
        text: Option<&str>,
        reply_control: ReplyControl,
        reply_to_id: Option<&str>,
    ) -> Result<String, ApiError> {
        self.ensure_not_expired()?;
        ensure_carousel_size(children.len())?;

        if let Some(child) = children
            .iter()
            .find(|child| child.status != PublishingStatus::Finished)
        {
            return Err(ApiError::invalid_parameter(format!(
                "carousel child {} is {}, expected FINISHED",
                child.id, child.status
            )));
        }

        let ids: Vec<&str> = children.iter().map(|child| child.id.as_str()).collect();
        self.post_carousel(&ids, text, reply_control, reply_to_id)
            .await
    }

    /// Fetches the processing status of a container.
    ///
    /// A response without a `status` is reported as [`PublishingStatus::Error`].
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::MissingId`] if the response has no `id`
    /// - [`ApiError::UnknownStatus`] for an unrecognized status
    /// - [`ApiError::UnknownPublishingError`] for an unrecognized error message
    /// - [`ApiError::Http`] if the request fails
    pub async fn container_status(&self, container_id: &str) -> Result<ContainerStatus, ApiError> {
        let request = self
            .request(HttpMethod::Get, container_id)?
            .query_param("fields", fields::join(fields::CONTAINER_STATUS))
            .build();
        let body = self.execute(request).await?;
        parse_container_status(body)
    }

    /// Publishes a container and returns the id of the published thread.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::MissingId`] if the response has no `id`
    /// - [`ApiError::Http`] if the request fails
    pub async fn publish_container(&self, container_id: &str) -> Result<String, ApiError> {
        let path = format!("{}/threads_publish", self.credentials.user_id);
        let request = self
            .request(HttpMethod::Post, path)?
            .query_param("creation_id", container_id)
            .build();
        let body = self.execute(request).await?;
        let id = response_id(body)?;
        tracing::info!(container_id, thread_id = %id, "Published thread");
        Ok(id)
    }

    /// Publishes a post and returns the id of the published thread.
    ///
    /// With zero or one attachment this creates and publishes a single
    /// container. With two to ten attachments the child containers are
    /// created concurrently, then a carousel parent carrying the text, then
    /// the parent is published. Children are not polled before the parent
    /// is created.
    ///
    /// # Errors
    ///
    /// - [`ApiError::TokenExpired`] if the credentials have expired
    /// - [`ApiError::InvalidParameter`] if the request has no text and no
    ///   attachments, more than 10 attachments, or an attachment that is not
    ///   an image or video
    /// - Any error of the individual steps; earlier steps are not rolled back
    pub async fn publish(&self, request: &PublishRequest) -> Result<String, ApiError> {
        self.ensure_not_expired()?;

        let text = request.text.as_deref().filter(|text| !text.is_empty());
        if text.is_none() && request.attachments.is_empty() {
            return Err(ApiError::invalid_parameter(
                "a post requires text, attachments, or both",
            ));
        }
        if request.attachments.len() > MAX_CAROUSEL_ITEMS {
            return Err(ApiError::invalid_parameter(format!(
                "a post can have at most {MAX_CAROUSEL_ITEMS} attachments, got {}",
                request.attachments.len()
            )));
        }
        for media in &request.attachments {
            ensure_attachable(media)?;
        }

        let container_id = if request.attachments.len() < MIN_CAROUSEL_ITEMS {
            let params = ContainerParams {
                text: text.map(str::to_string),
                media: request.attachments.first().cloned(),
                reply_control: request.reply_control,
                reply_to_id: request.reply_to_id.clone(),
                is_carousel_item: false,
            };
            self.create_container(&params).await?
        } else {
            let children = request
                .attachments
                .iter()
                .map(|media| ContainerParams::carousel_item(media.clone()))
                .collect::<Vec<_>>();
            let child_ids =
                try_join_all(children.iter().map(|params| self.create_container(params))).await?;

            let ids: Vec<&str> = child_ids.iter().map(String::as_str).collect();
            self.post_carousel(
                &ids,
                text,
                request.reply_control,
                request.reply_to_id.as_deref(),
            )
            .await?
        };

        self.publish_container(&container_id).await
    }

    fn threads_path(&self) -> String {
        format!("{}/threads", self.credentials.user_id)
    }

    async fn post_carousel(
        &self,
        child_ids: &[&str],
        text: Option<&str>,
        reply_control: ReplyControl,
        reply_to_id: Option<&str>,
    ) -> Result<String, ApiError> {
        let request = self
            .request(HttpMethod::Post, self.threads_path())?
            .query_param("media_type", MediaType::Carousel.as_str())
            .query_param("children", child_ids.join(","))
            .query_param("reply_control", reply_control.as_str())
            .optional_query_param("text", text)
            .optional_query_param("reply_to_id", reply_to_id)
            .build();
        let body = self.execute(request).await?;
        let id = response_id(body)?;
        tracing::debug!(container_id = %id, children = child_ids.len(), "Created carousel container");
        Ok(id)
    }
}

fn ensure_attachable(media: &Media) -> Result<(), ApiError> {
    if media.is_attachable() {
        Ok(())
    } else {
        Err(ApiError::invalid_parameter(format!(
            "media of type {} cannot be attached, expected IMAGE or VIDEO",
            media.media_type
        )))
    }
}

fn ensure_carousel_size(count: usize) -> Result<(), ApiError> {
    if (MIN_CAROUSEL_ITEMS..=MAX_CAROUSEL_ITEMS).contains(&count) {
        Ok(())
    } else {
        Err(ApiError::invalid_parameter(format!(
            "a carousel requires {MIN_CAROUSEL_ITEMS}-{MAX_CAROUSEL_ITEMS} items, got {count}"
        )))
    }
}

/// Extracts the `id` of a create or publish response.
///
/// The API sends ids as strings, but numeric ids are accepted too.
fn response_id(body: Value) -> Result<String, ApiError> {
    match body.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ApiError::MissingId { response: body }),
    }
}

fn parse_container_status(body: Value) -> Result<ContainerStatus, ApiError> {
    let id = response_id(body.clone())?;

    let status = match body.get("status").and_then(Value::as_str) {
        Some(status) if !status.is_empty() => status.parse()?,
        _ => PublishingStatus::Error,
    };

    let error = match body.get("error_message").and_then(Value::as_str) {
        Some(message) if !message.is_empty() => Some(message.parse::<PublishingError>()?),
        _ => None,
    };

    Ok(ContainerStatus { id, status, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_carousel_size_bounds() {
        assert!(ensure_carousel_size(1).is_err());
        assert!(ensure_carousel_size(2).is_ok());
        assert!(ensure_carousel_size(10).is_ok());
        assert!(ensure_carousel_size(11).is_err());
    }

    #[test]
    fn test_response_id_accepts_string_and_number() {
        assert_eq!(response_id(json!({"id": "1789"})).unwrap(), "1789");
        assert_eq!(response_id(json!({"id": 1789})).unwrap(), "1789");
    }

    #[test]
    fn test_response_id_missing() {
        match response_id(json!({"success": true})) {
            Err(ApiError::MissingId { response }) => assert_eq!(response, json!({"success": true})),
            other => panic!("expected MissingId, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_container_status_finished() {
        let status = parse_container_status(json!({"id": "c1", "status": "FINISHED"})).unwrap();
        assert_eq!(status, ContainerStatus::new("c1", PublishingStatus::Finished));
    }

    #[test]
    fn test_parse_container_status_missing_status_is_error() {
        let status = parse_container_status(json!({"id": "c1"})).unwrap();
        assert_eq!(status.status, PublishingStatus::Error);
        assert!(status.error.is_none());
    }

    #[test]
    fn test_parse_container_status_with_error_message() {
        let status = parse_container_status(json!({
            "id": "c1",
            "status": "ERROR",
            "error_message": "INVALID_ASPEC_RATIO"
        }))
        .unwrap();
        assert_eq!(status.error, Some(PublishingError::InvalidAspectRatio));
    }

    #[test]
    fn test_parse_container_status_empty_error_message_ignored() {
        let status = parse_container_status(json!({
            "id": "c1",
            "status": "IN_PROGRESS",
            "error_message": ""
        }))
        .unwrap();
        assert_eq!(status.status, PublishingStatus::InProgress);
        assert!(status.error.is_none());
    }

    #[test]
    fn test_parse_container_status_unknown_values() {
        assert!(matches!(
            parse_container_status(json!({"id": "c1", "status": "QUEUED"})),
            Err(ApiError::UnknownStatus { .. })
        ));
        assert!(matches!(
            parse_container_status(json!({"id": "c1", "status": "ERROR", "error_message": "DISK_FULL"})),
            Err(ApiError::UnknownPublishingError { .. })
        ));
    }

    #[test]
    fn test_text_media_is_not_attachable() {
        assert!(ensure_attachable(&Media::new(MediaType::Text, "https://example.com")).is_err());
        assert!(ensure_attachable(&Media::video("https://example.com/v.mp4")).is_ok());
    }
}
