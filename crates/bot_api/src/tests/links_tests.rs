use serde_json::json;
use tempfile::TempDir;

use crate::links::LinkStore;

#[tokio::test]
async fn missing_file_is_an_empty_mapping() {
    let tmp = TempDir::new().expect("tempdir");
    let store = LinkStore::new(tmp.path().join("discord_users.json"));
    assert!(store.load().await.is_empty());
    assert_eq!(store.username_for("100").await, None);
}

#[tokio::test]
async fn resolves_linked_usernames() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("discord_users.json");
    std::fs::write(&path, json!({"100": "alice", "200": "bob"}).to_string()).expect("write");
    let store = LinkStore::new(path);

    assert_eq!(store.username_for("100").await.as_deref(), Some("alice"));
    assert_eq!(store.username_for("300").await, None);
}

#[tokio::test]
async fn reverse_lookup_finds_the_discord_id() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("discord_users.json");
    std::fs::write(&path, json!({"100": "alice", "200": "bob"}).to_string()).expect("write");
    let store = LinkStore::new(path);

    assert_eq!(store.discord_id_for("bob").await.as_deref(), Some("200"));
    assert_eq!(store.discord_id_for("carol").await, None);
}

#[tokio::test]
async fn malformed_file_is_an_empty_mapping() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("discord_users.json");
    std::fs::write(&path, "{{{{").expect("write");
    let store = LinkStore::new(path);
    assert!(store.load().await.is_empty());
}
