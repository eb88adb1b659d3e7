//! Training file and job resource client.
//!
//! File uploads use multipart forms rather than the JSON transport the rest
//! of the API shares; the responses still go through the standard decoder so
//! errors keep the same taxonomy.

use crate::{
    client::{decode, transport_error, API_VERSION, API_VERSION_HEADER},
    types::{
        BatchUploadResponse, FileUpload, TrainingFile, TrainingJob, UploadTextRequest,
    },
    Client, Error, Result,
};
use reqwest::multipart::{Form, Part};
use serde_json::json;

/// Training operations, obtained from [`Client::training`].
///
/// # Examples
///
/// ```no_run
/// use toneclone::Client;
///
/// # async fn example() -> Result<(), toneclone::Error> {
/// let client = Client::new("tc_key_123")?;
/// let file = client
///     .training()
///     .upload_file(b"some writing samples".to_vec(), "samples.txt")
///     .await?;
/// println!("uploaded {}", file.file_id);
/// # Ok(())
/// # }
/// ```
pub struct Training<'a> {
    client: &'a Client,
}

impl<'a> Training<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists all training files. An empty body means no files.
    pub async fn list_files(&self) -> Result<Vec<TrainingFile>> {
        match self.client.get("/files").await {
            Ok(files) => Ok(files),
            Err(Error::EmptyBody { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Fetches a training file by ID.
    pub async fn get_file(&self, file_id: &str) -> Result<TrainingFile> {
        self.client.get(&format!("/files/{file_id}")).await
    }

    /// Deletes a training file.
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        self.client.delete(&format!("/files/{file_id}")).await
    }

    /// Uploads a single file as multipart form data.
    pub async fn upload_file(&self, content: Vec<u8>, filename: &str) -> Result<TrainingFile> {
        let part = Part::bytes(content).file_name(filename.to_string());
        let form = Form::new().part("file", part);

        let response = self.send_multipart("/files", form).await?;
        decode(response).await
    }

    /// Uploads multiple files in one request, optionally associating them
    /// with a persona. The server answers 201, or 206 when some files
    /// failed; per-file outcomes are in the response.
    pub async fn upload_file_batch(
        &self,
        files: Vec<FileUpload>,
        persona_id: Option<&str>,
        source: Option<&str>,
    ) -> Result<BatchUploadResponse> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.content).file_name(file.filename);
            form = form.part("files", part);
        }
        if let Some(persona_id) = persona_id {
            form = form.text("persona_id", persona_id.to_string());
        }
        if let Some(source) = source {
            form = form.text("source", source.to_string());
        }

        let response = self.send_multipart("/files/batch", form).await?;
        decode(response).await
    }

    /// Uploads text content as a training file.
    ///
    /// The backend occasionally acknowledges with an empty 2xx body; the
    /// upload succeeded, so a placeholder file record is synthesized from
    /// the request.
    pub async fn upload_text(&self, request: &UploadTextRequest) -> Result<TrainingFile> {
        match self.client.post("/files/text", request).await {
            Ok(file) => Ok(file),
            Err(Error::EmptyBody { .. }) => Ok(TrainingFile {
                file_id: "unknown".to_string(),
                file_name: request.filename.clone(),
                file_size: request.content.len() as i64,
                content_type: "text".to_string(),
                source: request.source.clone(),
                ..Default::default()
            }),
            Err(e) => Err(e),
        }
    }

    /// Lists all training jobs.
    pub async fn list_jobs(&self) -> Result<Vec<TrainingJob>> {
        match self.client.get("/training/jobs").await {
            Ok(jobs) => Ok(jobs),
            Err(Error::EmptyBody { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Fetches a training job by ID.
    pub async fn get_job(&self, job_id: &str) -> Result<TrainingJob> {
        self.client.get(&format!("/training/jobs/{job_id}")).await
    }

    /// Starts a training job for a persona over the given files.
    pub async fn create_job(&self, persona_id: &str, file_ids: &[String]) -> Result<TrainingJob> {
        let mut request = json!({ "persona_id": persona_id });
        if !file_ids.is_empty() {
            request["file_ids"] = json!(file_ids);
        }
        self.client.post("/training/jobs", &request).await
    }

    /// Starts a training job for a persona using all of its associated
    /// files.
    pub async fn create_persona_job(&self, persona_id: &str) -> Result<TrainingJob> {
        self.client
            .request(
                http::Method::POST,
                &format!("/training/personas/{persona_id}"),
                None::<&()>,
            )
            .await
    }

    /// Sends a multipart POST. reqwest supplies the boundary-bearing
    /// Content-Type, so the JSON transport headers are not used here.
    async fn send_multipart(&self, path: &str, form: Form) -> Result<reqwest::Response> {
        let url = self.client.url_for(path)?;
        self.client
            .http()
            .post(url)
            .timeout(self.client.timeout())
            .bearer_auth(self.client.api_key())
            .header(http::header::USER_AGENT, self.client.user_agent())
            .header(API_VERSION_HEADER, API_VERSION)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)
    }
}
