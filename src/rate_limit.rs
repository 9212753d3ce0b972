use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;

const LIMIT_HEADER: &str = "x-rate-limit-limit";
const REMAINING_HEADER: &str = "x-rate-limit-remaining";
const RESET_HEADER: &str = "x-rate-limit-reset";

/// Rate limit window reported by the API alongside a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: SystemTime,
}

impl RateLimit {
    /// Reads the `x-rate-limit-*` headers. Returns `None` unless all three are
    /// present and numeric.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_u64(headers, LIMIT_HEADER)?;
        let remaining = header_u64(headers, REMAINING_HEADER)?;
        let reset = header_u64(headers, RESET_HEADER)?;

        Some(RateLimit {
            limit,
            remaining,
            reset: UNIX_EPOCH + Duration::from_secs(reset),
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    let value = headers.get(name)?;
    let parsed = value
        .to_str()
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok());
    if parsed.is_none() {
        log::warn!("ignoring unparseable {} header: {:?}", name, value);
    }
    parsed
}
