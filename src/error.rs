use reqwest::StatusCode;
use thiserror::Error;

use crate::rate_limit::RateLimit;

#[derive(Debug, Error)]
pub enum Error {
    /// A required request field was missing. Raised before any network activity.
    #[error("media upload: {0}")]
    Parameter(String),
    #[error("Invalid upload URL: `{0}`")]
    Url(#[from] url::ParseError),
    #[error("Request Error: `{0}`")]
    Http(#[from] reqwest::Error),
    #[error("Failed to decode media upload response: `{0}`")]
    Decode(#[from] serde_json::Error),
    #[error("Media upload failed with status {status}: {body}")]
    Response {
        status: StatusCode,
        rate_limit: Option<RateLimit>,
        body: String,
    },
}

impl Error {
    pub(crate) fn parameter(message: impl Into<String>) -> Self {
        Error::Parameter(message.into())
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Error::Parameter(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
