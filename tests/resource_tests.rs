//! Integration tests for the resource clients, using wiremock to verify
//! paths, payloads and the empty-collection mapping.

use toneclone::types::{FileUpload, GenerateTextRequest, KnowledgeCard, Persona, UploadTextRequest};
use toneclone::{Client, Error};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn test_client(server: &MockServer) -> Client {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("toneclone=debug")
        .with_test_writer()
        .try_init();
    Client::builder("test_key")
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn personas_list_decodes_the_wire_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/personas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "personaId": "p-1",
                "name": "Casual",
                "status": "ready",
                "trainingStatus": "trained",
                "personaType": "custom",
                "voiceEvolution": false
            }
        ])))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let personas = client.personas().list().await.unwrap();

    assert_eq!(personas.len(), 1);
    assert_eq!(personas[0].persona_id, "p-1");
    assert_eq!(personas[0].name, "Casual");
}

#[tokio::test]
async fn empty_body_listings_are_empty_collections() {
    let mock_server = MockServer::start().await;

    for endpoint in ["/personas", "/knowledge", "/files", "/training/jobs"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;
    }

    let client = test_client(&mock_server);
    assert!(client.personas().list().await.unwrap().is_empty());
    assert!(client.knowledge().list().await.unwrap().is_empty());
    assert!(client.training().list_files().await.unwrap().is_empty());
    assert!(client.training().list_jobs().await.unwrap().is_empty());
}

#[tokio::test]
async fn persona_create_posts_the_persona_body() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!({
        "personaId": "p-9",
        "name": "Formal",
        "status": "pending",
        "trainingStatus": "untrained",
        "personaType": "custom",
        "voiceEvolution": true
    });

    Mock::given(method("POST"))
        .and(path("/personas"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let persona = Persona {
        name: "Formal".to_string(),
        voice_evolution: true,
        ..Default::default()
    };
    let created = client.personas().create(&persona).await.unwrap();
    assert_eq!(created.persona_id, "p-9");
}

#[tokio::test]
async fn persona_file_association_sends_file_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/personas/p-1/files"))
        .and(body_json(serde_json::json!({"fileIds": ["f-1", "f-2"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/personas/p-1/files"))
        .and(body_json(serde_json::json!({"fileIds": ["f-1"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let ids = vec!["f-1".to_string(), "f-2".to_string()];
    client.personas().associate_files("p-1", &ids).await.unwrap();
    client
        .personas()
        .disassociate_files("p-1", &ids[..1])
        .await
        .unwrap();
}

#[tokio::test]
async fn knowledge_persona_association_sends_card_ids() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/personas/p-1/knowledge"))
        .and(body_json(serde_json::json!({"knowledgeCardIds": ["k-1", "k-2"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/personas/p-1/knowledge"))
        .and(body_json(serde_json::json!({"knowledgeCardIds": ["k-1"]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let ids = vec!["k-1".to_string(), "k-2".to_string()];
    client
        .knowledge()
        .associate_with_persona("p-1", &ids)
        .await
        .unwrap();
    client
        .knowledge()
        .disassociate_from_persona("p-1", &ids[..1])
        .await
        .unwrap();
}

#[tokio::test]
async fn persona_knowledge_lists_attached_cards() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/personas/p-1/knowledge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "knowledgeCardId": "k-1",
                "userId": "u-1",
                "name": "Product facts",
                "instructions": "Mention the launch date."
            }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/personas/p-2/knowledge"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let cards = client.knowledge().for_persona("p-1").await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].knowledge_card_id, "k-1");

    assert!(client.knowledge().for_persona("p-2").await.unwrap().is_empty());
}

#[tokio::test]
async fn knowledge_crud_paths() {
    let mock_server = MockServer::start().await;

    let card_json = serde_json::json!({
        "knowledgeCardId": "k-1",
        "userId": "u-1",
        "name": "Product facts",
        "instructions": "Mention the launch date."
    });

    Mock::given(method("GET"))
        .and(path("/knowledge/k-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&card_json))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/knowledge/k-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&card_json))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/knowledge/k-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let card = client.knowledge().get("k-1").await.unwrap();
    assert_eq!(card.name, "Product facts");

    let updated = KnowledgeCard {
        name: "Product facts".to_string(),
        instructions: "Mention the launch date.".to_string(),
        ..Default::default()
    };
    client.knowledge().update("k-1", &updated).await.unwrap();
    client.knowledge().delete("k-1").await.unwrap();
}

struct MultipartBody;

impl Match for MultipartBody {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("multipart/form-data"))
    }
}

#[tokio::test]
async fn single_file_upload_is_multipart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files"))
        .and(MultipartBody)
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "fileId": "f-1",
            "filename": "samples.txt",
            "size": 20,
            "contentType": "text/plain"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let file = client
        .training()
        .upload_file(b"some writing samples".to_vec(), "samples.txt")
        .await
        .unwrap();

    assert_eq!(file.file_id, "f-1");
    assert_eq!(file.file_name, "samples.txt");
}

#[tokio::test]
async fn batch_upload_accepts_partial_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files/batch"))
        .and(MultipartBody)
        .respond_with(ResponseTemplate::new(206).set_body_json(serde_json::json!({
            "files": [
                {"file_id": "f-1", "filename": "a.txt", "status": "uploaded", "associated": true},
                {"filename": "b.txt", "status": "failed", "error": "too large", "associated": false}
            ],
            "persona_id": "p-1",
            "summary": {"total": 2, "uploaded": 1, "associated": 1, "failed": 1}
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let files = vec![
        FileUpload {
            filename: "a.txt".to_string(),
            content: b"aaa".to_vec(),
        },
        FileUpload {
            filename: "b.txt".to_string(),
            content: b"bbb".to_vec(),
        },
    ];
    let response = client
        .training()
        .upload_file_batch(files, Some("p-1"), Some("cli"))
        .await
        .unwrap();

    assert_eq!(response.summary.failed, 1);
    assert_eq!(response.files[1].error.as_deref(), Some("too large"));
}

#[tokio::test]
async fn text_upload_synthesizes_a_record_on_empty_ack() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/files/text"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let request = UploadTextRequest {
        content: "sample text".to_string(),
        filename: "sample.txt".to_string(),
        source: "cli".to_string(),
    };
    let file = client.training().upload_text(&request).await.unwrap();

    assert_eq!(file.file_id, "unknown");
    assert_eq!(file.file_name, "sample.txt");
    assert_eq!(file.file_size, "sample text".len() as i64);
}

#[tokio::test]
async fn create_job_sends_snake_case_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/training/jobs"))
        .and(body_json(serde_json::json!({
            "persona_id": "p-1",
            "file_ids": ["f-1"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "jobId": "j-1",
            "personaId": "p-1",
            "status": "queued"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let job = client
        .training()
        .create_job("p-1", &["f-1".to_string()])
        .await
        .unwrap();
    assert_eq!(job.job_id, "j-1");
}

#[tokio::test]
async fn generation_reduces_a_streamed_response() {
    let mock_server = MockServer::start().await;

    let stream = "event: message\n\
                  data: {\"content\":\"The quick \",\"done\":false}\n\
                  data: {\"content\":\"brown fox.\",\"done\":false}\n\
                  data: {\"content\":\"The quick brown fox jumps.\",\"done\":true}\n";

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(stream)
                .insert_header("content-type", "text/event-stream"),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let request = GenerateTextRequest {
        prompt: "describe a fox".to_string(),
        persona_id: "p-1".to_string(),
        ..Default::default()
    };
    let response = client.generate().text(&request).await.unwrap();

    assert_eq!(response.text, "The quick brown fox jumps.");
    assert_eq!(response.persona_id.as_deref(), Some("p-1"));
}

#[tokio::test]
async fn generation_accepts_a_plain_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "direct response",
            "model": "tc-1",
            "tokens": 12
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let text = client
        .generate()
        .simple_text("say something", None)
        .await
        .unwrap();
    assert_eq!(text, "direct response");
}

#[tokio::test]
async fn generation_surfaces_structured_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(403).set_body_json(
            serde_json::json!({"error": "forbidden", "message": "scope text:generate required"}),
        ))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client
        .generate()
        .simple_text("nope", None)
        .await
        .unwrap_err();
    match err {
        Error::Api(api) => {
            assert_eq!(api.error, "forbidden");
            assert!(api
                .message
                .as_deref()
                .unwrap()
                .contains(toneclone::types::scopes::TEXT_GENERATE));
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn whoami_decodes_the_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": "u-1",
            "email": "writer@example.com",
            "plan": "pro"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let user = client.whoami().await.unwrap();
    assert_eq!(user.user_id, "u-1");
    assert_eq!(user.plan.as_deref(), Some("pro"));
}
