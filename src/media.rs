use std::{convert::Infallible, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Server-side classification of an upload, controlling permitted formats and
/// where the media may be used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaCategory {
    TweetImage,
    DmImage,
    Subtitles,
    Other(String),
}

impl MediaCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MediaCategory::TweetImage => "tweet_image",
            MediaCategory::DmImage => "dm_image",
            MediaCategory::Subtitles => "subtitles",
            MediaCategory::Other(other) => other,
        }
    }
}

impl Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for MediaCategory {
    fn from(value: &str) -> Self {
        match value {
            "tweet_image" => MediaCategory::TweetImage,
            "dm_image" => MediaCategory::DmImage,
            "subtitles" => MediaCategory::Subtitles,
            other => MediaCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for MediaCategory {
    fn from(value: String) -> Self {
        MediaCategory::from(value.as_str())
    }
}

impl From<MediaCategory> for String {
    fn from(value: MediaCategory) -> Self {
        match value {
            MediaCategory::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for MediaCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(MediaCategory::from(s))
    }
}

/// Parameters for a single-shot media upload.
#[derive(Debug, Clone, Default)]
pub struct MediaUploadRequest {
    /// Raw file content
    pub media: Vec<u8>,
    /// MIME type of the media, e.g. `image/png` or `video/mp4`
    pub media_type: String,
    pub media_category: Option<MediaCategory>,
    /// User IDs allowed to reference the uploaded media
    pub additional_owners: Vec<String>,
}

impl MediaUploadRequest {
    pub fn new(
        media: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
        media_category: MediaCategory,
    ) -> Self {
        Self {
            media: media.into(),
            media_type: media_type.into(),
            media_category: Some(media_category),
            additional_owners: Vec::new(),
        }
    }

    pub fn with_additional_owners<I, S>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_owners = owners.into_iter().map(Into::into).collect();
        self
    }

    /// Checks the required fields in order: content, MIME type, category.
    /// Only the first missing field is reported.
    pub fn validate(&self) -> Result<()> {
        if self.media.is_empty() {
            return Err(Error::parameter("media content is required"));
        }
        if self.media_type.is_empty() {
            return Err(Error::parameter("media type is required"));
        }
        if self
            .media_category
            .as_ref()
            .is_none_or(|category| category.as_str().is_empty())
        {
            return Err(Error::parameter("media category is required"));
        }
        Ok(())
    }
}
