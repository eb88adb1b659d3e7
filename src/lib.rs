//! # toneclone - async Rust client for the ToneClone API
//!
//! A typed client for the ToneClone text-generation web API, built on
//! `reqwest`. The transport layer injects bearer authentication and API
//! versioning headers, decodes responses into a compile-time-checked error
//! taxonomy, and retries rate-limited requests with server-advised or
//! exponential backoff.
//!
//! ## Quick start
//!
//! ```no_run
//! use toneclone::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), toneclone::Error> {
//!     let client = Client::new("tc_key_123")?;
//!
//!     // Liveness and credential checks.
//!     client.health().await?;
//!     client.validate_api_key().await?;
//!
//!     // Typed resource clients over the generic verbs.
//!     let personas = client.personas().list().await?;
//!     println!("{} personas", personas.len());
//!
//!     let text = client
//!         .generate()
//!         .simple_text("write a short thank-you note", personas.first().map(|p| p.persona_id.as_str()))
//!         .await?;
//!     println!("{text}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Rate limiting
//!
//! The API throttles with HTTP 429 plus advisory headers
//! (`X-RateLimit-Remaining`, `X-RateLimit-Reset`, `Retry-After`). The client
//! retries these automatically: up to 3 attempts per call, waiting the
//! server-advised interval when given, otherwise 1s/2s exponential backoff,
//! never more than 60 seconds. Every other failure returns immediately.
//! Once attempts are exhausted the [`rate_limit::RateLimitError`] is
//! surfaced unchanged:
//!
//! ```no_run
//! use toneclone::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("tc_key_123")?;
//! match client.get::<serde_json::Value>("/personas").await {
//!     Ok(value) => println!("{value}"),
//!     Err(Error::RateLimited(rl)) => {
//!         eprintln!("{rl}");
//!         // rl.retry_after_seconds / rl.reset_time for actionable guidance
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! All failure modes are variants of [`Error`]; callers pattern-match
//! instead of string-matching. A 2xx with an empty body where the target
//! needs data is its own variant ([`Error::EmptyBody`]) so "empty
//! collection" never has to be inferred from decoder phrasing.
//!
//! ## Cancellation and timeouts
//!
//! Every attempt is bounded by the configured timeout (30s by default).
//! Dropping a call future - `tokio::time::timeout`, `select!` - aborts the
//! in-flight request and any backoff sleep immediately.

mod client;
mod error;
pub mod generate;
pub mod knowledge;
pub mod personas;
pub mod rate_limit;
mod retry;
pub mod training;
pub mod types;

pub use client::{
    Client, ClientBuilder, API_VERSION, API_VERSION_HEADER, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use error::{ApiError, Error, Result};
pub use rate_limit::RateLimitError;
pub use retry::RetryPolicy;
