use std::{fmt::Display, ops::Deref, time::Duration};

use serde::{Deserialize, Serialize};

use crate::media::MediaCategory;
use crate::rate_limit::RateLimit;
use crate::serde_utils;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaUploadData {
    pub media_id: i64,
    pub media_id_string: String,
    pub media_key: String,
    pub size: i64,
    #[serde(rename = "expires_after_secs", with = "serde_utils::duration_secs")]
    pub expires_after: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_info: Option<MediaProcessingInfo>,
}

/// A single snapshot of server-side transcoding. Nothing here refreshes it;
/// callers that want to wait for completion re-query after `check_after`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaProcessingInfo {
    pub state: String,
    #[serde(
        rename = "check_after_secs",
        default,
        with = "serde_utils::option_duration_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub check_after: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<MediaProcessingError>,
}

impl MediaProcessingInfo {
    pub fn processing_state(&self) -> ProcessingState {
        ProcessingState::from(self.state.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingState {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Other(String),
}

impl ProcessingState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessingState::Succeeded | ProcessingState::Failed)
    }
}

impl From<&str> for ProcessingState {
    fn from(value: &str) -> Self {
        match value {
            "pending" => ProcessingState::Pending,
            "in_progress" => ProcessingState::InProgress,
            "succeeded" => ProcessingState::Succeeded,
            "failed" => ProcessingState::Failed,
            other => ProcessingState::Other(other.to_string()),
        }
    }
}

impl Display for ProcessingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingState::Pending => write!(f, "Pending"),
            ProcessingState::InProgress => write!(f, "In progress"),
            ProcessingState::Succeeded => write!(f, "Succeeded"),
            ProcessingState::Failed => write!(f, "Failed"),
            ProcessingState::Other(other) => write!(f, "Unknown ({other})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaProcessingError {
    pub code: i64,
    pub name: String,
    pub message: String,
}

/// Decoded upload result together with the rate limit window the call used.
#[derive(Debug, Clone)]
pub struct MediaUploadResponse {
    pub data: MediaUploadData,
    pub rate_limit: Option<RateLimit>,
}

impl Deref for MediaUploadResponse {
    type Target = MediaUploadData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UploadCommand {
    Init,
    Append,
    Finalize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaUploadInitRequest {
    pub command: UploadCommand,
    pub media_type: String,
    pub total_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_category: Option<MediaCategory>,
}

impl MediaUploadInitRequest {
    pub fn new(
        media_type: impl Into<String>,
        total_bytes: u64,
        media_category: Option<MediaCategory>,
    ) -> Self {
        Self {
            command: UploadCommand::Init,
            media_type: media_type.into(),
            total_bytes,
            media_category,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaUploadInitResponse {
    pub media_id: i64,
    pub media_id_string: String,
    #[serde(rename = "expires_after_secs", with = "serde_utils::duration_secs")]
    pub expires_after: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaUploadAppendRequest {
    pub command: UploadCommand,
    pub media_id: String,
    pub segment_index: u32,
    /// Sent as a multipart part rather than in the JSON body
    #[serde(skip)]
    pub media: Vec<u8>,
}

impl MediaUploadAppendRequest {
    pub fn new(media_id: impl Into<String>, segment_index: u32, media: Vec<u8>) -> Self {
        Self {
            command: UploadCommand::Append,
            media_id: media_id.into(),
            segment_index,
            media,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaUploadFinalizeRequest {
    pub command: UploadCommand,
    pub media_id: String,
}

impl MediaUploadFinalizeRequest {
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            command: UploadCommand::Finalize,
            media_id: media_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_without_processing_info() {
        let json = r#"{
            "media_id": 710511363345354753,
            "media_id_string": "710511363345354753",
            "media_key": "3_710511363345354753",
            "size": 11065,
            "expires_after_secs": 86400
        }"#;
        let data: MediaUploadData = serde_json::from_str(json).unwrap();

        assert_eq!(data.media_id, 710511363345354753);
        assert_eq!(data.media_id_string, "710511363345354753");
        assert_eq!(data.media_key, "3_710511363345354753");
        assert_eq!(data.size, 11065);
        assert_eq!(data.expires_after, Duration::from_secs(86400));
        assert!(data.processing_info.is_none());
    }

    #[test]
    fn test_decode_with_processing_info() {
        let json = r#"{
            "media_id": 1,
            "media_id_string": "1",
            "media_key": "7_1",
            "size": 2048,
            "expires_after_secs": 3600,
            "processing_info": {
                "state": "in_progress",
                "check_after_secs": 5,
                "progress_percent": 40
            }
        }"#;
        let data: MediaUploadData = serde_json::from_str(json).unwrap();
        let info = data.processing_info.unwrap();

        assert_eq!(info.state, "in_progress");
        assert_eq!(info.processing_state(), ProcessingState::InProgress);
        assert!(!info.processing_state().is_terminal());
        assert_eq!(info.check_after, Some(Duration::from_secs(5)));
        assert_eq!(info.progress_percent, Some(40));
        assert!(info.error.is_none());
    }

    #[test]
    fn test_decode_processing_error() {
        let json = r#"{
            "state": "failed",
            "progress_percent": 100,
            "error": {"code": 1, "name": "InvalidMedia", "message": "Unsupported video format"}
        }"#;
        let info: MediaProcessingInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.processing_state(), ProcessingState::Failed);
        assert!(info.processing_state().is_terminal());
        assert_eq!(info.check_after, None);
        assert_eq!(
            info.error,
            Some(MediaProcessingError {
                code: 1,
                name: "InvalidMedia".to_string(),
                message: "Unsupported video format".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_processing_state() {
        let info = MediaProcessingInfo {
            state: "queued".to_string(),
            check_after: None,
            progress_percent: None,
            error: None,
        };
        assert_eq!(
            info.processing_state(),
            ProcessingState::Other("queued".to_string())
        );
        assert_eq!(info.processing_state().to_string(), "Unknown (queued)");
    }

    #[test]
    fn test_missing_required_field_is_decode_error() {
        let json = r#"{"media_id": 1, "media_id_string": "1", "size": 1, "expires_after_secs": 1}"#;
        assert!(serde_json::from_str::<MediaUploadData>(json).is_err());
    }

    #[test]
    fn test_response_derefs_to_data() {
        let response = MediaUploadResponse {
            data: MediaUploadData {
                media_id: 42,
                media_id_string: "42".to_string(),
                media_key: "3_42".to_string(),
                size: 10,
                expires_after: Duration::from_secs(60),
                processing_info: None,
            },
            rate_limit: None,
        };
        assert_eq!(response.media_id, 42);
        assert_eq!(response.media_key, "3_42");
    }

    #[test]
    fn test_chunked_request_shapes() {
        let init = MediaUploadInitRequest::new("video/mp4", 1024, Some(MediaCategory::TweetImage));
        assert_eq!(
            serde_json::to_value(&init).unwrap(),
            json!({
                "command": "INIT",
                "media_type": "video/mp4",
                "total_bytes": 1024,
                "media_category": "tweet_image"
            })
        );

        let init = MediaUploadInitRequest::new("video/mp4", 1024, None);
        assert!(serde_json::to_value(&init).unwrap().get("media_category").is_none());

        let append = MediaUploadAppendRequest::new("42", 3, vec![1, 2, 3]);
        assert_eq!(
            serde_json::to_value(&append).unwrap(),
            json!({"command": "APPEND", "media_id": "42", "segment_index": 3})
        );

        let finalize = MediaUploadFinalizeRequest::new("42");
        assert_eq!(
            serde_json::to_value(&finalize).unwrap(),
            json!({"command": "FINALIZE", "media_id": "42"})
        );

        let init_response: MediaUploadInitResponse = serde_json::from_str(
            r#"{"media_id": 42, "media_id_string": "42", "expires_after_secs": 86399}"#,
        )
        .unwrap();
        assert_eq!(init_response.media_id, 42);
        assert_eq!(init_response.expires_after, Duration::from_secs(86399));
    }
}
