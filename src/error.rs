//! Error types for ToneClone API calls.
//!
//! Every failure mode the client can produce is a variant of [`Error`], so
//! callers branch by pattern-matching rather than inspecting error strings.
//! The server's structured error body is preserved in [`ApiError`], and raw
//! response text is kept wherever the body could not be parsed.

use crate::rate_limit::RateLimitError;
use http::StatusCode;
use serde::Deserialize;
use std::fmt;

/// The main error type for ToneClone API calls.
///
/// # Examples
///
/// ```no_run
/// use toneclone::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("tc_key_123")?;
///
/// match client.get::<serde_json::Value>("/personas").await {
///     Ok(personas) => println!("{personas:?}"),
///     Err(Error::RateLimited(rl)) => {
///         eprintln!("{rl}"); // "Rate limit exceeded. Try again in N seconds"
///     }
///     Err(Error::Api(api)) => eprintln!("server rejected the request: {api}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level failure (connection refused, DNS, TLS) before any
    /// HTTP status was known. Never retried.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The request body could not be encoded as JSON. This is a programming
    /// or input error and is never retried.
    #[error("failed to serialize request body: {0}")]
    Serialization(String),

    /// A successful-status response body could not be parsed into the
    /// expected type. Preserves the raw body for debugging.
    #[error("failed to parse response (status {status}): {serde_error}")]
    Decode {
        /// The raw response body that failed to parse.
        raw_body: String,
        /// The serde error message.
        serde_error: String,
        /// The HTTP status code of the response.
        status: StatusCode,
    },

    /// The server sent a 2xx response with an empty body, but the decode
    /// target cannot be produced from nothing.
    ///
    /// List endpoints treat this as an empty collection; other callers
    /// usually surface it as-is.
    #[error("expected a response body but the server sent none (status {status})")]
    EmptyBody {
        /// The HTTP status code of the empty response.
        status: StatusCode,
    },

    /// The server reported a structured error (`{"error", "message", "code"}`)
    /// on a non-2xx status other than 429.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// HTTP 429. Retried automatically by the client up to its attempt
    /// bound; surfaced unchanged once attempts are exhausted so callers can
    /// read the retry metadata.
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),

    /// A non-2xx status whose body was not the structured error shape.
    /// The raw body is embedded so no information is dropped.
    #[error("API request failed with status {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// An invalid base URL or path was provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The client was misconfigured (bad header value, unbuildable
    /// transport, ...).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns the HTTP status code if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Decode { status, .. }
            | Error::EmptyBody { status }
            | Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Api(api) => Some(api.status),
            Error::RateLimited(_) => Some(StatusCode::TOO_MANY_REQUESTS),
            _ => None,
        }
    }

    /// Returns `true` for the 429 variant, which the client retries.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }
}

/// A structured error reported by the API on a non-2xx status.
///
/// The wire shape is `{"error": string, "message"?: string, "code"?: string}`.
/// Rendering is `"<error>: <message>"` when a message is present, else just
/// `"<error>"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Machine-readable error category, e.g. `"not_found"`.
    #[serde(default)]
    pub error: String,
    /// Optional human-readable detail.
    #[serde(default)]
    pub message: Option<String>,
    /// Optional secondary code.
    #[serde(default)]
    pub code: Option<String>,
    /// The HTTP status the error arrived with. Not part of the body.
    #[serde(skip, default = "default_status")]
    pub status: StatusCode,
}

fn default_status() -> StatusCode {
    StatusCode::BAD_REQUEST
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) if !message.is_empty() => {
                write!(f, "{}: {}", self.error, message)
            }
            _ => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for ApiError {}

/// A specialized `Result` type for ToneClone API calls.
pub type Result<T> = std::result::Result<T, Error>;
