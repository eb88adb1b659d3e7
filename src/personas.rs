//! Persona resource client.

use crate::{
    types::{Persona, TrainingFile, TrainingFileList},
    Client, Error, Result,
};
use serde_json::json;

/// Persona operations, obtained from [`Client::personas`].
///
/// # Examples
///
/// ```no_run
/// use toneclone::Client;
///
/// # async fn example() -> Result<(), toneclone::Error> {
/// let client = Client::new("tc_key_123")?;
/// for persona in client.personas().list().await? {
///     println!("{} ({})", persona.name, persona.persona_id);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Personas<'a> {
    client: &'a Client,
}

impl<'a> Personas<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists all personas. An empty response body means no personas exist.
    pub async fn list(&self) -> Result<Vec<Persona>> {
        match self.client.get("/personas").await {
            Ok(personas) => Ok(personas),
            Err(Error::EmptyBody { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Fetches a persona by ID.
    pub async fn get(&self, persona_id: &str) -> Result<Persona> {
        self.client.get(&format!("/personas/{persona_id}")).await
    }

    /// Creates a persona.
    pub async fn create(&self, persona: &Persona) -> Result<Persona> {
        self.client.post("/personas", persona).await
    }

    /// Updates an existing persona.
    pub async fn update(&self, persona_id: &str, persona: &Persona) -> Result<Persona> {
        self.client
            .put(&format!("/personas/{persona_id}"), persona)
            .await
    }

    /// Deletes a persona.
    pub async fn delete(&self, persona_id: &str) -> Result<()> {
        self.client.delete(&format!("/personas/{persona_id}")).await
    }

    /// Lists the training files associated with a persona.
    pub async fn files(&self, persona_id: &str) -> Result<Vec<TrainingFile>> {
        let list: TrainingFileList = self
            .client
            .get(&format!("/personas/{persona_id}/files"))
            .await?;
        Ok(list.files)
    }

    /// Associates training files with a persona.
    pub async fn associate_files(&self, persona_id: &str, file_ids: &[String]) -> Result<()> {
        let body = json!({ "fileIds": file_ids });
        self.client
            .post::<_, serde::de::IgnoredAny>(&format!("/personas/{persona_id}/files"), &body)
            .await
            .map(|_| ())
    }

    /// Removes file associations from a persona.
    pub async fn disassociate_files(&self, persona_id: &str, file_ids: &[String]) -> Result<()> {
        let body = json!({ "fileIds": file_ids });
        self.client
            .delete_with_body(&format!("/personas/{persona_id}/files"), &body)
            .await
    }
}
