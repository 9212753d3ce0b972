//! Client for the X (Twitter) v2 media upload endpoint.
//!
//! Build a [`MediaUploadRequest`], hand it to [`MediaClient::upload_media`]
//! and read the typed [`MediaUploadResponse`]. Requests are validated before
//! anything is sent.

pub mod client;
pub mod error;
pub mod media;
pub mod rate_limit;
pub mod rest_types;
pub mod serde_utils;

pub use client::{Authorizer, BearerToken, DEFAULT_API_HOST, MediaClient};
pub use error::{Error, Result};
pub use media::{MediaCategory, MediaUploadRequest};
pub use rate_limit::RateLimit;
pub use rest_types::{
    MediaProcessingError, MediaProcessingInfo, MediaUploadAppendRequest, MediaUploadData,
    MediaUploadFinalizeRequest, MediaUploadInitRequest, MediaUploadInitResponse,
    MediaUploadResponse, ProcessingState, UploadCommand,
};
