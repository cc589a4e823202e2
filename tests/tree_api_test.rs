//! Tests for the tree API client functions
//!
//! These tests run the client against a mockito HTTP server, verifying the
//! request shapes (method, path, query, body) and the decoding of the
//! responses into the wire models.

use mockito::Matcher;
use serde_json::json;

use nessie_client::nessie::api::{ApiError, NessieClient};
use nessie_client::nessie::models::{Branch, MergeRequest, Reference, ReferenceType, Transplant};

/// Creates a client pointed at the given mock server
fn client_for(server: &mockito::ServerGuard) -> NessieClient {
    NessieClient::new(&server.url(), None).expect("Failed to create NessieClient")
}

#[tokio::test]
async fn test_get_config() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/config")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"defaultBranch": "main", "version": "0.2.0"}"#)
        .create_async()
        .await;

    let config = client_for(&server).get_config().await.unwrap();

    assert_eq!(config.default_branch.as_deref(), Some("main"));
    assert_eq!(config.version.as_deref(), Some("0.2.0"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_all_references_decodes_each_variant() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trees")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"type": "BRANCH", "name": "main", "hash": "abc123"},
                {"type": "TAG", "name": "v1.0", "hash": "def456"},
                {"type": "HASH", "hash": "cafebabe"}
            ]"#,
        )
        .create_async()
        .await;

    let references = client_for(&server).get_all_references().await.unwrap();

    assert_eq!(references.len(), 3);
    assert_eq!(references[0].reference_type(), ReferenceType::Branch);
    assert_eq!(references[1].name(), Some("v1.0"));
    assert_eq!(references[2].hash(), Some("cafebabe"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_all_references_surfaces_unknown_variant() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/trees")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"type": "WORKTREE", "name": "scratch"}]"#)
        .create_async()
        .await;

    let err = client_for(&server).get_all_references().await.unwrap_err();

    match err {
        ApiError::Model(model_err) => {
            assert!(model_err.to_string().contains("WORKTREE"));
        }
        other => panic!("Expected ApiError::Model, got {}", other),
    }
}

#[tokio::test]
async fn test_get_default_branch() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trees/tree")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type": "BRANCH", "name": "main", "hash": "abc123"}"#)
        .create_async()
        .await;

    let reference = client_for(&server).get_default_branch().await.unwrap();

    assert_eq!(reference.reference_type(), ReferenceType::Branch);
    assert_eq!(reference.name(), Some("main"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_assign_branch_puts_new_target() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/trees/branch/main")
        .match_query(Matcher::UrlEncoded(
            "expectedHash".to_string(),
            "abc123".to_string(),
        ))
        .match_body(Matcher::Json(json!({"name": "main", "hash": "def456"})))
        .with_status(200)
        .create_async()
        .await;

    let target = Branch {
        name: "main".to_string(),
        hash: Some("def456".to_string()),
    };
    client_for(&server)
        .assign_branch("main", "abc123", &target)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_reference_by_name_encodes_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trees/tree/release%2F1.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type": "BRANCH", "name": "release/1.0", "hash": "abc123"}"#)
        .create_async()
        .await;

    let reference = client_for(&server)
        .get_reference_by_name("release/1.0")
        .await
        .unwrap();

    assert_eq!(reference.name(), Some("release/1.0"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_reference_posts_discriminated_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/trees/tree")
        .match_body(Matcher::Json(json!({
            "type": "BRANCH",
            "name": "feature",
            "hash": "abc123"
        })))
        .with_status(200)
        .create_async()
        .await;

    let branch = Reference::Branch(Branch {
        name: "feature".to_string(),
        hash: Some("abc123".to_string()),
    });
    client_for(&server).create_reference(&branch).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_branch_sends_expected_hash() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/trees/branch/feature")
        .match_query(Matcher::UrlEncoded(
            "expectedHash".to_string(),
            "abc123".to_string(),
        ))
        .with_status(200)
        .create_async()
        .await;

    client_for(&server)
        .delete_branch("feature", "abc123")
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_commit_log_with_paging() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trees/tree/main/log")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("max".to_string(), "2".to_string()),
            Matcher::UrlEncoded("pageToken".to_string(), "tok1".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "token": "tok2",
                "operations": [
                    {"hash": "abc123", "message": "second commit"},
                    {"hash": "def456", "message": "first commit"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let log = client_for(&server)
        .get_commit_log("main", Some(2), Some("tok1"))
        .await
        .unwrap();

    assert_eq!(log.token.as_deref(), Some("tok2"));
    assert_eq!(log.operations.len(), 2);
    assert_eq!(log.operations[0].message, "second commit");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_entries_decodes_keys() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trees/tree/main/entries")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "token": null,
                "entries": [
                    {"name": {"elements": ["sales", "q1"]}, "type": "ICEBERG_TABLE"}
                ]
            }"#,
        )
        .create_async()
        .await;

    let entries = client_for(&server)
        .get_entries("main", None, None)
        .await
        .unwrap();

    assert_eq!(entries.entries.len(), 1);
    assert_eq!(entries.entries[0].name.elements, vec!["sales", "q1"]);
    assert_eq!(entries.entries[0].kind, "ICEBERG_TABLE");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transplant_sends_hashes_and_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/trees/branch/main/transplant")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("expectedHash".to_string(), "abc123".to_string()),
            Matcher::UrlEncoded("message".to_string(), "pick fixes".to_string()),
        ]))
        .match_body(Matcher::Json(json!({
            "hashesToTransplant": ["def456", "789abc"]
        })))
        .with_status(200)
        .create_async()
        .await;

    client_for(&server)
        .transplant(
            "main",
            "abc123",
            Some("pick fixes"),
            &Transplant {
                hashes_to_transplant: vec!["def456".to_string(), "789abc".to_string()],
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_merge_posts_from_hash() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/trees/branch/main/merge")
        .match_query(Matcher::UrlEncoded(
            "expectedHash".to_string(),
            "abc123".to_string(),
        ))
        .match_body(Matcher::Json(json!({"fromHash": "def456"})))
        .with_status(200)
        .create_async()
        .await;

    client_for(&server)
        .merge(
            "main",
            "abc123",
            &MergeRequest {
                from_hash: "def456".to_string(),
            },
        )
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/trees/tree/missing")
        .with_status(404)
        .with_body("ref not found")
        .create_async()
        .await;

    let err = client_for(&server)
        .get_reference_by_name("missing")
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body, "ref not found");
        }
        other => panic!("Expected ApiError::Status, got {}", other),
    }
}

#[tokio::test]
async fn test_auth_token_is_sent_as_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/config")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"defaultBranch": "main", "version": "0.2.0"}"#)
        .create_async()
        .await;

    let client =
        NessieClient::new(&server.url(), Some("secret-token".to_string())).unwrap();
    client.get_config().await.unwrap();

    mock.assert_async().await;
}
