//! Text generation client.
//!
//! The `/query` endpoint may answer with a single JSON object or with an
//! SSE-style stream of `data:` frames. Either way the result is reduced to
//! one [`GenerateTextResponse`] here.

use crate::{
    client::{classify_status, transport_error},
    types::{GenerateTextRequest, GenerateTextResponse},
    Client, Error, Result,
};
use http::Method;
use serde::Deserialize;

/// Generation operations, obtained from [`Client::generate`].
///
/// # Examples
///
/// ```no_run
/// use toneclone::Client;
///
/// # async fn example() -> Result<(), toneclone::Error> {
/// let client = Client::new("tc_key_123")?;
/// let text = client
///     .generate()
///     .simple_text("write a limerick about borrowing", Some("p-1"))
///     .await?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
pub struct Generate<'a> {
    client: &'a Client,
}

impl<'a> Generate<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generates text with full control over the request parameters.
    ///
    /// Streamed responses are reduced frame by frame: non-terminal frames
    /// accumulate, and a terminal (`done: true`) frame's content replaces
    /// the accumulation as authoritative.
    pub async fn text(&self, request: &GenerateTextRequest) -> Result<GenerateTextResponse> {
        let payload =
            serde_json::to_vec(request).map_err(|e| Error::Serialization(e.to_string()))?;
        let url = self.client.url_for("/query")?;

        let response = self
            .client
            .send_raw(Method::POST, url, Some(&payload))
            .await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(transport_error)?;

        if status.as_u16() >= 400 {
            return Err(classify_status(status, &headers, body));
        }

        if let Some(text) = reduce_stream(&body) {
            return Ok(GenerateTextResponse {
                text,
                persona_id: non_empty(&request.persona_id),
                knowledge_card_id: request.knowledge_card_id.clone(),
                model: request.model.clone(),
                tokens: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Decode {
            serde_error: e.to_string(),
            raw_body: body,
            status,
        })
    }

    /// Generates text from a prompt, optionally with a persona.
    pub async fn simple_text(&self, prompt: &str, persona_id: Option<&str>) -> Result<String> {
        let request = GenerateTextRequest {
            prompt: prompt.to_string(),
            persona_id: persona_id.unwrap_or_default().to_string(),
            ..Default::default()
        };
        Ok(self.text(&request).await?.text)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Deserialize)]
struct Frame {
    #[serde(default)]
    content: String,
    #[serde(default)]
    done: bool,
}

/// Reduces an SSE-style body to its final text.
///
/// Returns `None` when the body contains no parseable `data:` frame, in
/// which case the caller should treat it as a plain JSON response.
/// `event:` lines and malformed frames are skipped.
fn reduce_stream(body: &str) -> Option<String> {
    let mut saw_frame = false;
    let mut text = String::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("event:") {
            continue;
        }
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let frame: Frame = match serde_json::from_str(data) {
            Ok(frame) => frame,
            Err(_) => continue,
        };
        saw_frame = true;

        if frame.done {
            // The terminal frame carries the complete text.
            text.clear();
            text.push_str(&frame.content);
            break;
        }
        text.push_str(&frame.content);
    }

    saw_frame.then_some(text)
}
