//! User store tests: in-memory upsert semantics and the Deta backend against wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use github_oauth_login::config::{Config, Credentials, StorageConfig};
use github_oauth_login::error::StoreError;
use github_oauth_login::models::UserProfile;
use github_oauth_login::store::{self, DetaUserStore, MemoryUserStore, UserStore};

const PROJECT_KEY: &str = "a0proj_s3cr3t";

fn client_config() -> Config {
    Config::for_testing("http://unused.localhost", Credentials::new("id", "secret", "https://cb"))
}

fn bob() -> UserProfile {
    UserProfile {
        key: "1".into(),
        email: Some("b@x.com".into()),
        username: "bob".into(),
        avatar_url: "u".into(),
    }
}

fn deta_store(mock_server: &MockServer) -> DetaUserStore {
    DetaUserStore::new(PROJECT_KEY, "users", &format!("{}/v1", mock_server.uri()), &client_config())
        .unwrap()
}

// =============================================================================
// Memory store
// =============================================================================

#[tokio::test]
async fn test_memory_put_twice_same_key_single_record() {
    let store = MemoryUserStore::new();

    store.put(bob()).await.unwrap();
    let mut renamed = bob();
    renamed.username = "robert".into();
    store.put(renamed).await.unwrap();

    assert_eq!(store.len().await, 1);
    assert_eq!(store.get("1").await.unwrap().unwrap().username, "robert");
}

#[tokio::test]
async fn test_from_config_memory_backend() {
    let store = store::from_config(&StorageConfig::Memory, &client_config()).unwrap();
    let stored = store.put(bob()).await.unwrap();
    assert_eq!(store.get("1").await.unwrap(), Some(stored));
}

#[test]
fn test_from_config_rejects_bad_project_key() {
    let storage = StorageConfig::from_project_key(Some("nounderscore".into()), "users");
    assert!(matches!(
        store::from_config(&storage, &client_config()),
        Err(StoreError::Misconfigured(_))
    ));
}

// =============================================================================
// Deta store
// =============================================================================

#[tokio::test]
async fn test_deta_put_returns_processed_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/a0proj/users/items"))
        .and(header("X-API-Key", PROJECT_KEY))
        .and(body_json(json!({
            "items": [{"key": "1", "email": "b@x.com", "username": "bob", "avatar_url": "u"}]
        })))
        .respond_with(ResponseTemplate::new(207).set_body_json(json!({
            "processed": {
                "items": [{"key": "1", "email": "b@x.com", "username": "bob", "avatar_url": "u"}]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stored = deta_store(&mock_server).put(bob()).await.unwrap();
    assert_eq!(stored, bob());
}

#[tokio::test]
async fn test_deta_put_failed_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/a0proj/users/items"))
        .respond_with(ResponseTemplate::new(207).set_body_json(json!({
            "failed": {"items": [{"key": "1", "email": null, "username": "bob", "avatar_url": "u"}]}
        })))
        .mount(&mock_server)
        .await;

    let err = deta_store(&mock_server).put(bob()).await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 207, .. }));
    assert!(err.to_string().contains("1 failed"));
}

#[tokio::test]
async fn test_deta_put_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/a0proj/users/items"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"errors": ["Unauthorized"]})))
        .mount(&mock_server)
        .await;

    let err = deta_store(&mock_server).put(bob()).await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 401, .. }));
}

#[tokio::test]
async fn test_deta_put_rejects_empty_key_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(207))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut user = bob();
    user.key = String::new();
    let err = deta_store(&mock_server).put(user).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecord(_)));
}

#[tokio::test]
async fn test_deta_get_found_and_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/a0proj/users/items/1"))
        .and(header("X-API-Key", PROJECT_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "1", "email": "b@x.com", "username": "bob", "avatar_url": "u"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/a0proj/users/items/2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"key": "2"})))
        .mount(&mock_server)
        .await;

    let store = deta_store(&mock_server);
    assert_eq!(store.get("1").await.unwrap(), Some(bob()));
    assert_eq!(store.get("2").await.unwrap(), None);
}
