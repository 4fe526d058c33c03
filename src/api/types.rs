//! Value types used by the Threads API facade.
//!
//! Every enum serializes to the exact string the Graph API uses on the wire,
//! independent of the Rust variant name.
//!
//! # Example
//!
//! ```rust
//! use threads_api::{Media, MediaType, PublishingStatus, ReplyControl};
//!
//! let media = Media::image("https://example.com/cat.jpg");
//! assert_eq!(media.media_type, MediaType::Image);
//! assert_eq!(media.media_type.to_string(), "IMAGE");
//!
//! let status: PublishingStatus = "FINISHED".parse().unwrap();
//! assert!(status.is_terminal());
//!
//! assert_eq!(ReplyControl::default().as_str(), "everyone");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// The kind of content a container holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    /// A text-only post.
    #[serde(rename = "TEXT")]
    Text,
    /// A single image.
    #[serde(rename = "IMAGE")]
    Image,
    /// A single video.
    #[serde(rename = "VIDEO")]
    Video,
    /// A carousel of 2 to 10 images and videos.
    #[serde(rename = "CAROUSEL")]
    Carousel,
}

impl MediaType {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
            Self::Carousel => "CAROUSEL",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(Self::Text),
            "IMAGE" => Ok(Self::Image),
            "VIDEO" => Ok(Self::Video),
            "CAROUSEL" => Ok(Self::Carousel),
            other => Err(ApiError::invalid_parameter(format!(
                "unknown media type '{other}'"
            ))),
        }
    }
}

/// Who may reply to a published post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyControl {
    /// Anyone can reply.
    #[default]
    Everyone,
    /// Only accounts the author follows can reply.
    AccountsYouFollow,
    /// Only accounts mentioned in the post can reply.
    MentionedOnly,
}

impl ReplyControl {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Everyone => "everyone",
            Self::AccountsYouFollow => "accounts_you_follow",
            Self::MentionedOnly => "mentioned_only",
        }
    }
}

impl fmt::Display for ReplyControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplyControl {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "everyone" => Ok(Self::Everyone),
            "accounts_you_follow" => Ok(Self::AccountsYouFollow),
            "mentioned_only" => Ok(Self::MentionedOnly),
            other => Err(ApiError::invalid_parameter(format!(
                "unknown reply control '{other}'"
            ))),
        }
    }
}

/// A publicly reachable media file to attach to a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// What kind of media the URL points to.
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Public URL the API downloads the media from.
    pub url: String,
}

impl Media {
    /// Creates a media reference.
    #[must_use]
    pub fn new(media_type: MediaType, url: impl Into<String>) -> Self {
        Self {
            media_type,
            url: url.into(),
        }
    }

    /// Creates an image reference.
    #[must_use]
    pub fn image(url: impl Into<String>) -> Self {
        Self::new(MediaType::Image, url)
    }

    /// Creates a video reference.
    #[must_use]
    pub fn video(url: impl Into<String>) -> Self {
        Self::new(MediaType::Video, url)
    }

    /// Returns `true` for images and videos, the only types that can be attached.
    #[must_use]
    pub const fn is_attachable(&self) -> bool {
        matches!(self.media_type, MediaType::Image | MediaType::Video)
    }
}

/// Processing state of a media container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishingStatus {
    /// The container has been published.
    Published,
    /// The API is still processing the media.
    InProgress,
    /// Processing finished; the container can be published.
    Finished,
    /// Processing failed.
    Error,
    /// The container was not published within 24 hours.
    Expired,
}

impl PublishingStatus {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "PUBLISHED",
            Self::InProgress => "IN_PROGRESS",
            Self::Finished => "FINISHED",
            Self::Error => "ERROR",
            Self::Expired => "EXPIRED",
        }
    }

    /// Returns `true` when polling the container again will not change its
    /// status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for PublishingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishingStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PUBLISHED" => Ok(Self::Published),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "FINISHED" => Ok(Self::Finished),
            "ERROR" => Ok(Self::Error),
            "EXPIRED" => Ok(Self::Expired),
            other => Err(ApiError::UnknownStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Why the API failed to process a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishingError {
    /// The video could not be downloaded.
    FailedDownloadingVideo,
    /// The audio track could not be processed.
    FailedProcessingAudio,
    /// The video could not be processed.
    FailedProcessingVideo,
    /// The aspect ratio is not supported. The wire string keeps the API's spelling.
    #[serde(rename = "INVALID_ASPEC_RATIO", alias = "INVALID_ASPECT_RATIO")]
    InvalidAspectRatio,
    /// The bit rate is not supported.
    InvalidBitRate,
    /// The duration is out of range.
    InvalidDuration,
    /// The frame rate is not supported.
    InvalidFrameRate,
    /// The number of audio channels is not supported.
    InvalidAudioChannels,
    /// The audio channel layout is not supported.
    InvalidAudioChannelLayout,
    /// The API did not say.
    Unknown,
}

impl PublishingError {
    /// Returns the wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FailedDownloadingVideo => "FAILED_DOWNLOADING_VIDEO",
            Self::FailedProcessingAudio => "FAILED_PROCESSING_AUDIO",
            Self::FailedProcessingVideo => "FAILED_PROCESSING_VIDEO",
            Self::InvalidAspectRatio => "INVALID_ASPEC_RATIO",
            Self::InvalidBitRate => "INVALID_BIT_RATE",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::InvalidFrameRate => "INVALID_FRAME_RATE",
            Self::InvalidAudioChannels => "INVALID_AUDIO_CHANNELS",
            Self::InvalidAudioChannelLayout => "INVALID_AUDIO_CHANNEL_LAYOUT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PublishingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishingError {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FAILED_DOWNLOADING_VIDEO" => Ok(Self::FailedDownloadingVideo),
            "FAILED_PROCESSING_AUDIO" => Ok(Self::FailedProcessingAudio),
            "FAILED_PROCESSING_VIDEO" => Ok(Self::FailedProcessingVideo),
            "INVALID_ASPEC_RATIO" | "INVALID_ASPECT_RATIO" => Ok(Self::InvalidAspectRatio),
            "INVALID_BIT_RATE" => Ok(Self::InvalidBitRate),
            "INVALID_DURATION" => Ok(Self::InvalidDuration),
            "INVALID_FRAME_RATE" => Ok(Self::InvalidFrameRate),
            "INVALID_AUDIO_CHANNELS" => Ok(Self::InvalidAudioChannels),
            "INVALID_AUDIO_CHANNEL_LAYOUT" => Ok(Self::InvalidAudioChannelLayout),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(ApiError::UnknownPublishingError {
                error: other.to_string(),
            }),
        }
    }
}

/// The processing state of a container, as returned by `container_status`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    /// The container id.
    pub id: String,
    /// The processing status.
    pub status: PublishingStatus,
    /// The failure reason, when the API reported one.
    pub error: Option<PublishingError>,
}

impl ContainerStatus {
    /// Creates a status without an error.
    #[must_use]
    pub fn new(id: impl Into<String>, status: PublishingStatus) -> Self {
        Self {
            id: id.into(),
            status,
            error: None,
        }
    }
}

/// Parameters for a single (non-carousel) media container.
///
/// At least one of `text` or `media` must be set.
///
/// # Example
///
/// ```rust
/// use threads_api::{ContainerParams, Media, ReplyControl};
///
/// let params = ContainerParams::text("Hello, Threads!")
///     .with_media(Media::image("https://example.com/cat.jpg"))
///     .with_reply_control(ReplyControl::MentionedOnly);
///
/// assert_eq!(params.text.as_deref(), Some("Hello, Threads!"));
/// assert!(!params.is_carousel_item);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerParams {
    /// The post text.
    pub text: Option<String>,
    /// An image or video to attach.
    pub media: Option<Media>,
    /// Who may reply.
    pub reply_control: ReplyControl,
    /// The thread this post replies to.
    pub reply_to_id: Option<String>,
    /// Whether this container will become a carousel child.
    pub is_carousel_item: bool,
}

impl ContainerParams {
    /// Creates parameters for a text post.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Creates parameters for a media post.
    #[must_use]
    pub fn media(media: Media) -> Self {
        Self {
            media: Some(media),
            ..Self::default()
        }
    }

    /// Creates parameters for a carousel child.
    #[must_use]
    pub fn carousel_item(media: Media) -> Self {
        Self {
            media: Some(media),
            is_carousel_item: true,
            ..Self::default()
        }
    }

    /// Attaches media.
    #[must_use]
    pub fn with_media(mut self, media: Media) -> Self {
        self.media = Some(media);
        self
    }

    /// Sets the reply-control policy.
    #[must_use]
    pub const fn with_reply_control(mut self, reply_control: ReplyControl) -> Self {
        self.reply_control = reply_control;
        self
    }

    /// Makes the post a reply to an existing thread.
    #[must_use]
    pub fn with_reply_to_id(mut self, reply_to_id: impl Into<String>) -> Self {
        self.reply_to_id = Some(reply_to_id.into());
        self
    }
}

/// A post for the unified `publish` operation.
///
/// Zero or one attachment publishes a single container. Two to ten
/// attachments publish a carousel with the text on the parent.
///
/// # Example
///
/// ```rust
/// use threads_api::{Media, PublishRequest};
///
/// let request = PublishRequest::new()
///     .with_text("Two pictures")
///     .with_attachment(Media::image("https://example.com/1.jpg"))
///     .with_attachment(Media::image("https://example.com/2.jpg"));
///
/// assert_eq!(request.attachments.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublishRequest {
    /// The post text.
    pub text: Option<String>,
    /// Images and videos, in display order.
    pub attachments: Vec<Media>,
    /// Who may reply.
    pub reply_control: ReplyControl,
    /// The thread this post replies to.
    pub reply_to_id: Option<String>,
}

impl PublishRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the post text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends an attachment.
    #[must_use]
    pub fn with_attachment(mut self, media: Media) -> Self {
        self.attachments.push(media);
        self
    }

    /// Sets the reply-control policy.
    #[must_use]
    pub const fn with_reply_control(mut self, reply_control: ReplyControl) -> Self {
        self.reply_control = reply_control;
        self
    }

    /// Makes the post a reply to an existing thread.
    #[must_use]
    pub fn with_reply_to_id(mut self, reply_to_id: impl Into<String>) -> Self {
        self.reply_to_id = Some(reply_to_id.into());
        self
    }
}

/// Filters and pagination for listing a user's threads.
///
/// # Example
///
/// ```rust
/// use threads_api::ThreadsQuery;
/// use chrono::NaiveDate;
///
/// let query = ThreadsQuery::new()
///     .since(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
///     .limit(10);
/// assert_eq!(query.limit, Some(10));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThreadsQuery {
    /// Earliest day of the window.
    pub since: Option<NaiveDate>,
    /// Latest day of the window.
    pub until: Option<NaiveDate>,
    /// Maximum number of threads per page (API default 25).
    pub limit: Option<u32>,
    /// Cursor for the previous page.
    pub before: Option<String>,
    /// Cursor for the next page.
    pub after: Option<String>,
}

impl ThreadsQuery {
    /// Creates a query with no filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the earliest day.
    #[must_use]
    pub const fn since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    /// Sets the latest day.
    #[must_use]
    pub const fn until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the previous-page cursor.
    #[must_use]
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Sets the next-page cursor.
    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }
}
