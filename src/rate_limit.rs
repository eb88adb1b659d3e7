//! Rate-limit error and advisory header parsing.
//!
//! A 429 response is classified into [`RateLimitError`], which carries the
//! server's structured error body plus the three advisory headers ToneClone
//! sends: `X-RateLimit-Remaining`, `X-RateLimit-Reset` and `Retry-After`.
//! These headers are consulted only on 429; a missing or malformed header
//! leaves the corresponding field at its zero value, never fails the call.

use crate::error::ApiError;
use http::HeaderMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// An HTTP 429 with retry metadata.
///
/// The client retries these automatically; once attempts are exhausted the
/// last `RateLimitError` is returned unchanged so callers can surface
/// `retry_after_seconds` as actionable guidance.
#[derive(Debug, Clone)]
pub struct RateLimitError {
    /// The structured error body, when the server sent one.
    pub api: ApiError,
    /// Requests left in the current window (`X-RateLimit-Remaining`).
    pub remaining_requests: u64,
    /// When the window resets (`X-RateLimit-Reset`, unix seconds).
    pub reset_time: Option<SystemTime>,
    /// Server-advised wait (`Retry-After`), in whole seconds.
    pub retry_after_seconds: u64,
}

impl RateLimitError {
    /// Builds a `RateLimitError` from a decoded error body and the response
    /// headers of a 429.
    pub fn from_headers(api: ApiError, headers: &HeaderMap) -> Self {
        Self {
            api,
            remaining_requests: parse_remaining(headers).unwrap_or(0),
            reset_time: parse_reset(headers),
            retry_after_seconds: parse_retry_after(headers).unwrap_or(0),
        }
    }
}

impl fmt::Display for RateLimitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.retry_after_seconds > 0 {
            write!(
                f,
                "Rate limit exceeded. Try again in {} seconds",
                self.retry_after_seconds
            )
        } else {
            write!(f, "Rate limit exceeded: {}", self.api.error)
        }
    }
}

impl std::error::Error for RateLimitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.api)
    }
}

/// Parses the `Retry-After` header into whole seconds.
///
/// Supports both delay-seconds (integer) and HTTP-date (RFC 7231) forms.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    let header = headers.get("retry-after")?.to_str().ok()?;

    if let Ok(seconds) = header.parse::<u64>() {
        return Some(seconds);
    }

    // HTTP-date form: convert to a delay relative to now.
    if let Ok(date_time) = httpdate::parse_http_date(header) {
        if let Ok(until) = date_time.duration_since(SystemTime::now()) {
            return Some(until.as_secs());
        }
    }

    None
}

/// Parses `X-RateLimit-Reset` (unix seconds).
fn parse_reset(headers: &HeaderMap) -> Option<SystemTime> {
    let header = headers.get("x-ratelimit-reset")?.to_str().ok()?;
    let timestamp = header.parse::<u64>().ok()?;
    Some(UNIX_EPOCH + Duration::from_secs(timestamp))
}

/// Parses `X-RateLimit-Remaining`.
fn parse_remaining(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
