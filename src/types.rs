//! Wire types for the ToneClone API.
//!
//! These are plain serde models of the API's JSON; the interesting behavior
//! lives in [`crate::client`]. The API renders fields in camelCase except
//! for the batch-upload endpoint, which uses snake_case.
//!
//! Timestamps are RFC 3339 strings as the server sends them; the client
//! never does arithmetic on them.

use serde::{Deserialize, Serialize};

/// API key permission scopes.
pub mod scopes {
    pub const PERSONAS_READ: &str = "personas:read";
    pub const KNOWLEDGE_READ: &str = "knowledge:read";
    pub const TRAINING_READ: &str = "training:read";
    pub const FILES_READ: &str = "files:read";
    pub const WRITING_READ: &str = "writing:read";
    pub const USER_READ: &str = "user:read";
    pub const PERSONAS_WRITE: &str = "personas:write";
    pub const KNOWLEDGE_WRITE: &str = "knowledge:write";
    pub const TRAINING_WRITE: &str = "training:write";
    pub const FILES_WRITE: &str = "files:write";
    pub const WRITING_WRITE: &str = "writing:write";
    pub const USER_WRITE: &str = "user:write";
    pub const TEXT_GENERATE: &str = "text:generate";
    pub const ADMIN: &str = "admin:all";
    pub const ALL: &str = "*";
}

/// A writing persona.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Persona {
    pub persona_id: String,
    pub name: String,
    pub last_used_at: Option<String>,
    pub last_modified_at: Option<String>,
    pub status: String,
    pub training_status: String,
    pub persona_type: String,
    pub voice_evolution: bool,
    #[serde(
        rename = "personaPromptDescription",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_built_in: bool,
}

/// A knowledge card: named background instructions attached to generations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KnowledgeCard {
    pub knowledge_card_id: String,
    pub user_id: String,
    pub name: String,
    pub instructions: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A training file uploaded for persona fine-tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingFile {
    pub file_id: String,
    pub user_id: String,
    #[serde(rename = "filename")]
    pub file_name: String,
    pub file_type: String,
    #[serde(rename = "size")]
    pub file_size: i64,
    pub created_at: Option<String>,
    pub modified_at: Option<String>,
    pub content_type: String,
    pub source: String,
    pub used_for_training: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
}

/// Wrapper the API uses for file listings scoped to a persona.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingFileList {
    #[serde(default)]
    pub files: Vec<TrainingFile>,
}

/// A fine-tuning job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainingJob {
    pub job_id: String,
    pub persona_id: String,
    pub file_ids: Vec<String>,
    pub total_files: i64,
    pub files_processed: i64,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_model: Option<String>,
}

/// Request body for uploading text content as a training file.
#[derive(Debug, Clone, Serialize)]
pub struct UploadTextRequest {
    pub content: String,
    pub filename: String,
    pub source: String,
}

/// Request body for text generation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTextRequest {
    pub prompt: String,
    pub persona_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_card_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub knowledge_card_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formality: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,
}

/// Generated text plus the parameters it was produced with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateTextResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_card_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<i64>,
}

/// The authenticated user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

/// An API key, as returned by the key-management endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKey {
    pub key_id: String,
    pub name: String,
    pub prefix: String,
    pub scopes: Vec<String>,
    pub status: String,
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    pub usage_count: i64,
}

/// A file to upload in a batch, held in memory.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Per-file outcome of a batch upload. The batch endpoint answers in
/// snake_case, unlike the rest of the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchFileResult {
    pub file_id: Option<String>,
    pub filename: String,
    pub status: String,
    pub error: Option<String>,
    pub size: Option<i64>,
    pub associated: bool,
}

/// Aggregate counts for a batch upload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchUploadSummary {
    pub total: i64,
    pub uploaded: i64,
    pub associated: i64,
    pub failed: i64,
}

/// Response from the batch file-upload endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchUploadResponse {
    pub files: Vec<BatchFileResult>,
    pub persona_id: Option<String>,
    pub summary: BatchUploadSummary,
}
