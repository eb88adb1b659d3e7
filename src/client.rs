//! HTTP client for the ToneClone API.
//!
//! [`Client`] owns the transport (reqwest), the authentication headers, the
//! response decoder, and the rate-limit retry loop. Resource clients in the
//! sibling modules are thin wrappers over the generic verbs defined here.

use crate::{
    error::ApiError,
    generate::Generate,
    knowledge::Knowledge,
    personas::Personas,
    rate_limit::RateLimitError,
    retry::RetryPolicy,
    training::Training,
    types::User,
    Error, Result,
};
use http::{HeaderMap, Method, StatusCode};
use serde::{de::DeserializeOwned, de::IgnoredAny, Serialize};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// API version sent in the version marker header of every request.
pub const API_VERSION: &str = "v1";

/// Header carrying [`API_VERSION`].
pub const API_VERSION_HEADER: &str = "TC-API-Version";

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.toneclone.ai";

/// Per-request timeout applied when the caller does not configure one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client for the ToneClone API.
///
/// The client is cheap to clone and safe to share across tasks: all
/// configuration is immutable behind an `Arc`, and reqwest's connection pool
/// is reused across calls and retries. Each verb call runs synchronously on
/// the calling task; retries within one call are strictly sequential.
///
/// # Examples
///
/// ```no_run
/// use toneclone::Client;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Status { status: String }
///
/// # async fn example() -> Result<(), toneclone::Error> {
/// let client = Client::new("tc_key_123")?;
///
/// client.health().await?;
/// let status: Status = client.get("/status").await?;
/// println!("{}", status.status);
/// # Ok(())
/// # }
/// ```
///
/// Cancellation follows normal future semantics: dropping a call future
/// (for example through `tokio::time::timeout`) aborts the in-flight request
/// and any backoff sleep immediately.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    user_agent: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Client {
    /// Creates a client with default configuration for the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Creates a [`ClientBuilder`] for custom configuration.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Makes a typed request through the retry engine.
    ///
    /// The body is serialized exactly once; the same bytes are re-sent on
    /// every retry. Only rate-limit errors are retried: any other outcome,
    /// success or failure, returns immediately. A rate-limit error on the
    /// final allowed attempt is returned unchanged so callers can read its
    /// retry metadata.
    pub async fn request<Req, Res>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Req>,
    ) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let payload = match body {
            Some(body) => Some(
                serde_json::to_vec(body).map_err(|e| Error::Serialization(e.to_string()))?,
            ),
            None => None,
        };
        let url = self.join_url(path)?;

        let mut attempt: u32 = 0;
        loop {
            tracing::debug!(method = %method, url = %url, attempt, "executing request");

            let result = match self
                .send_once(method.clone(), url.clone(), payload.as_deref(), true)
                .await
            {
                Ok(response) => decode(response).await,
                Err(e) => Err(e),
            };

            let err = match result {
                Ok(value) => return Ok(value),
                Err(Error::RateLimited(err)) => err,
                Err(e) => {
                    tracing::warn!(method = %method, path, attempt, error = %e, "request failed");
                    return Err(e);
                }
            };

            if self.inner.retry.is_final_attempt(attempt) {
                return Err(Error::RateLimited(err));
            }

            let delay = self.inner.retry.delay_for(attempt, &err);
            tracing::info!(
                method = %method,
                path,
                attempt,
                delay_ms = delay.as_millis() as u64,
                remaining = err.remaining_requests,
                "rate limited, waiting before retry"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Performs a GET request.
    pub async fn get<Res>(&self, path: &str) -> Result<Res>
    where
        Res: DeserializeOwned,
    {
        self.request::<(), Res>(Method::GET, path, None).await
    }

    /// Performs a POST request with a JSON body.
    pub async fn post<Req, Res>(&self, path: &str, body: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Performs a PUT request with a JSON body.
    pub async fn put<Req, Res>(&self, path: &str, body: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Performs a PATCH request with a JSON body.
    ///
    /// Goes through the retry engine like every other verb.
    pub async fn patch<Req, Res>(&self, path: &str, body: &Req) -> Result<Res>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Performs a DELETE request, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request::<(), IgnoredAny>(Method::DELETE, path, None)
            .await
            .map(|_| ())
    }

    /// Performs a DELETE request with a JSON body, discarding the response.
    ///
    /// Some endpoints (file disassociation) take a payload on DELETE.
    pub async fn delete_with_body<Req>(&self, path: &str, body: &Req) -> Result<()>
    where
        Req: Serialize + ?Sized,
    {
        self.request::<Req, IgnoredAny>(Method::DELETE, path, Some(body))
            .await
            .map(|_| ())
    }

    /// Checks API liveness with an unauthenticated GET to `/ping`.
    ///
    /// Single attempt, no retry, no bearer token. Any 2xx is success; the
    /// body shape is not inspected.
    pub async fn health(&self) -> Result<()> {
        let url = self.join_url("/ping")?;
        let response = self.send_once(Method::GET, url, None, false).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = read_body(response).await?;
        Err(Error::UnexpectedStatus { status, body })
    }

    /// Verifies that the configured API key is accepted by the server.
    ///
    /// Issues an authenticated GET to `/user`; a 2xx means the bearer token
    /// is valid, independent of the body shape.
    pub async fn validate_api_key(&self) -> Result<()> {
        self.get::<IgnoredAny>("/user").await.map(|_| ())
    }

    /// Returns the authenticated user.
    pub async fn whoami(&self) -> Result<User> {
        self.get("/user").await
    }

    /// Persona operations.
    pub fn personas(&self) -> Personas<'_> {
        Personas::new(self)
    }

    /// Knowledge-card operations.
    pub fn knowledge(&self) -> Knowledge<'_> {
        Knowledge::new(self)
    }

    /// Training file and job operations.
    pub fn training(&self) -> Training<'_> {
        Training::new(self)
    }

    /// Text generation operations.
    pub fn generate(&self) -> Generate<'_> {
        Generate::new(self)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The configured user agent.
    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Joins `path` onto the base URL. Called once per logical call so
    /// retries never accumulate path segments.
    fn join_url(&self, path: &str) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                Error::Configuration(format!(
                    "base URL cannot have paths appended: {}",
                    self.inner.base_url
                ))
            })?;
            segments.pop_if_empty();
            for segment in path.split('/').filter(|s| !s.is_empty()) {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// Performs exactly one HTTP round trip. No retries at this layer.
    async fn send_once(
        &self,
        method: Method,
        url: Url,
        body: Option<&[u8]>,
        authenticated: bool,
    ) -> Result<reqwest::Response> {
        let mut request = self
            .inner
            .http
            .request(method, url)
            .timeout(self.inner.timeout)
            .header(http::header::CONTENT_TYPE, "application/json")
            .header(http::header::ACCEPT, "application/json")
            .header(http::header::USER_AGENT, &self.inner.user_agent)
            .header(API_VERSION_HEADER, API_VERSION);

        if authenticated {
            request = request.bearer_auth(&self.inner.api_key);
        }
        if let Some(bytes) = body {
            request = request.body(bytes.to_vec());
        }

        request.send().await.map_err(transport_error)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    pub(crate) fn url_for(&self, path: &str) -> Result<Url> {
        self.join_url(path)
    }

    pub(crate) async fn send_raw(
        &self,
        method: Method,
        url: Url,
        body: Option<&[u8]>,
    ) -> Result<reqwest::Response> {
        self.send_once(method, url, body, true).await
    }
}

pub(crate) fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Transport(e)
    }
}

async fn read_body(response: reqwest::Response) -> Result<String> {
    response.text().await.map_err(transport_error)
}

/// Turns a raw HTTP response into a decoded value or a typed error.
///
/// Status in [200, 400) is success: an empty body decodes the target from
/// JSON `null` (yielding [`Error::EmptyBody`] for targets that need data);
/// a non-empty body is parsed as JSON. Statuses >= 400 are classified via
/// [`classify_status`].
pub(crate) async fn decode<Res>(response: reqwest::Response) -> Result<Res>
where
    Res: DeserializeOwned,
{
    let status = response.status();
    let headers = response.headers().clone();
    let body = read_body(response).await?;

    if status.as_u16() >= 400 {
        return Err(classify_status(status, &headers, body));
    }

    if body.is_empty() {
        return serde_json::from_str::<Res>("null").map_err(|_| Error::EmptyBody { status });
    }

    serde_json::from_str::<Res>(&body).map_err(|e| Error::Decode {
        serde_error: e.to_string(),
        raw_body: body,
        status,
    })
}

/// Classifies a non-2xx response into the error taxonomy.
///
/// A body matching `{"error", "message"?, "code"?}` becomes [`Error::Api`],
/// or [`Error::RateLimited`] on 429 with the advisory headers parsed in.
/// Anything else falls back to [`Error::UnexpectedStatus`] carrying the raw
/// body. Rate-limit headers are consulted only on 429.
pub(crate) fn classify_status(status: StatusCode, headers: &HeaderMap, body: String) -> Error {
    match serde_json::from_str::<ApiError>(&body) {
        Ok(mut api) => {
            api.status = status;
            if status == StatusCode::TOO_MANY_REQUESTS {
                Error::RateLimited(RateLimitError::from_headers(api, headers))
            } else {
                Error::Api(api)
            }
        }
        Err(_) => Error::UnexpectedStatus { status, body },
    }
}

/// Builder applying configuration mutators in call order; for any given
/// field the last writer wins.
///
/// # Examples
///
/// ```no_run
/// use toneclone::{Client, RetryPolicy};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), toneclone::Error> {
/// let client = Client::builder("tc_key_123")
///     .base_url("https://staging.toneclone.ai")?
///     .timeout(Duration::from_secs(10))
///     .user_agent("my-tool/2.0")
///     .retry_policy(RetryPolicy::default())
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: String,
    base_url: Option<Url>,
    user_agent: String,
    timeout: Duration,
    retry: RetryPolicy,
    http: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a builder with the default base URL, timeout, user agent and
    /// retry policy.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            user_agent: format!("toneclone-rust/{API_VERSION}"),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            http: None,
        }
    }

    /// Sets a custom base URL. A trailing slash is trimmed so path joins
    /// never produce double slashes.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse as an absolute URL.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        let trimmed = url.as_ref().trim_end_matches('/');
        self.base_url = Some(Url::parse(trimmed)?);
        Ok(self)
    }

    /// Sets the per-request timeout. Every attempt, including retries, is
    /// bounded by this duration so no call can hang indefinitely.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the rate-limit retry policy.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Supplies a pre-configured transport, e.g. one with a proxy or a
    /// custom connection pool.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Builds the configured [`Client`].
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http = match self.http {
            Some(http) => http,
            None => reqwest::Client::builder().build().map_err(|e| {
                Error::Configuration(format!("failed to build HTTP client: {e}"))
            })?,
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                api_key: self.api_key,
                user_agent: self.user_agent,
                timeout: self.timeout,
                retry: self.retry,
            }),
        })
    }
}
