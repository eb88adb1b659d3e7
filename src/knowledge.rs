//! Knowledge-card resource client.

use crate::{types::KnowledgeCard, Client, Error, Result};
use serde_json::json;

/// Knowledge-card operations, obtained from [`Client::knowledge`].
pub struct Knowledge<'a> {
    client: &'a Client,
}

impl<'a> Knowledge<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Lists all knowledge cards for the authenticated user.
    ///
    /// The server answers an empty body when the user has no cards; that is
    /// an empty list, not an error.
    pub async fn list(&self) -> Result<Vec<KnowledgeCard>> {
        match self.client.get("/knowledge").await {
            Ok(cards) => Ok(cards),
            Err(Error::EmptyBody { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Fetches a knowledge card by ID.
    pub async fn get(&self, knowledge_card_id: &str) -> Result<KnowledgeCard> {
        self.client
            .get(&format!("/knowledge/{knowledge_card_id}"))
            .await
    }

    /// Creates a knowledge card.
    pub async fn create(&self, card: &KnowledgeCard) -> Result<KnowledgeCard> {
        self.client.post("/knowledge", card).await
    }

    /// Updates an existing knowledge card.
    pub async fn update(&self, knowledge_card_id: &str, card: &KnowledgeCard) -> Result<KnowledgeCard> {
        self.client
            .put(&format!("/knowledge/{knowledge_card_id}"), card)
            .await
    }

    /// Deletes a knowledge card.
    pub async fn delete(&self, knowledge_card_id: &str) -> Result<()> {
        self.client
            .delete(&format!("/knowledge/{knowledge_card_id}"))
            .await
    }

    /// Lists the knowledge cards attached to a persona. An empty response
    /// body means the persona has no cards.
    pub async fn for_persona(&self, persona_id: &str) -> Result<Vec<KnowledgeCard>> {
        match self
            .client
            .get(&format!("/personas/{persona_id}/knowledge"))
            .await
        {
            Ok(cards) => Ok(cards),
            Err(Error::EmptyBody { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Attaches knowledge cards to a persona.
    pub async fn associate_with_persona(
        &self,
        persona_id: &str,
        knowledge_card_ids: &[String],
    ) -> Result<()> {
        let body = json!({ "knowledgeCardIds": knowledge_card_ids });
        self.client
            .post::<_, serde::de::IgnoredAny>(&format!("/personas/{persona_id}/knowledge"), &body)
            .await
            .map(|_| ())
    }

    /// Detaches knowledge cards from a persona.
    pub async fn disassociate_from_persona(
        &self,
        persona_id: &str,
        knowledge_card_ids: &[String],
    ) -> Result<()> {
        let body = json!({ "knowledgeCardIds": knowledge_card_ids });
        self.client
            .delete_with_body(&format!("/personas/{persona_id}/knowledge"), &body)
            .await
    }
}
