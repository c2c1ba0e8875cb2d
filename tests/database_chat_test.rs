// ABOUTME: Integration tests for chat session and message persistence
// ABOUTME: Exercises the ChatManager against a real in-memory SQLite database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_test_database, create_test_user, create_test_user_with_email};
use parley_chat_server::database::{ChatManager, Database};
use parley_chat_server::errors::ErrorCode;
use parley_chat_server::models::ChatMessage;

async fn setup() -> (Database, ChatManager, String) {
    let database = create_test_database().await.unwrap();
    let (_, user) = create_test_user(&database).await.unwrap();
    let chat = database.chat();
    (database, chat, user.email)
}

fn message(id: &str, session_id: &str, query: &str) -> ChatMessage {
    ChatMessage::new(
        id.to_owned(),
        session_id.to_owned(),
        query.to_owned(),
        "canned reply".to_owned(),
    )
}

#[tokio::test]
async fn test_first_message_creates_session_later_ones_reuse_it() {
    let (_db, chat, email) = setup().await;

    assert!(chat.ensure_session("socket-1", &email).await.unwrap());
    assert!(!chat.ensure_session("socket-1", &email).await.unwrap());
    assert!(!chat.ensure_session("socket-1", &email).await.unwrap());

    let sessions = chat.list_sessions(&email).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, "socket-1");
}

#[tokio::test]
async fn test_messages_come_back_in_insertion_order() {
    let (_db, chat, email) = setup().await;
    chat.ensure_session("socket-1", &email).await.unwrap();

    // All inserts land within the same second; ordering must still hold
    for i in 0..10 {
        chat.add_message(&message(&format!("msg-{i}"), "socket-1", &format!("query {i}")))
            .await
            .unwrap();
    }

    let messages = chat.get_messages("socket-1").await.unwrap();
    assert_eq!(messages.len(), 10);
    for (i, msg) in messages.iter().enumerate() {
        assert_eq!(msg.query, format!("query {i}"));
    }
    assert_eq!(chat.message_count("socket-1").await.unwrap(), 10);
}

#[tokio::test]
async fn test_replayed_message_id_is_rejected_and_original_kept() {
    let (_db, chat, email) = setup().await;
    chat.ensure_session("socket-1", &email).await.unwrap();
    chat.add_message(&message("msg-1", "socket-1", "the original"))
        .await
        .unwrap();

    let err = chat
        .add_message(&message("msg-1", "socket-1", "the replay"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let messages = chat.get_messages("socket-1").await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].query, "the original");
}

#[tokio::test]
async fn test_session_lookup_returns_owner() {
    let (_db, chat, email) = setup().await;
    chat.ensure_session("socket-1", &email).await.unwrap();

    let session = chat
        .get_session("socket-1")
        .await
        .unwrap()
        .expect("Session should exist");
    assert_eq!(session.user_email, email);

    assert!(chat.get_session("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_overview_preview_uses_earliest_message() {
    let (_db, chat, email) = setup().await;
    chat.ensure_session("socket-1", &email).await.unwrap();
    chat.add_message(&message("msg-1", "socket-1", "earliest"))
        .await
        .unwrap();
    chat.add_message(&message("msg-2", "socket-1", "later"))
        .await
        .unwrap();

    let sessions = chat.list_sessions(&email).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].first_query.as_deref(), Some("earliest"));
    assert_eq!(sessions[0].message_count, 2);
}

#[tokio::test]
async fn test_empty_session_listed_without_preview() {
    let (_db, chat, email) = setup().await;
    chat.ensure_session("socket-1", &email).await.unwrap();

    let sessions = chat.list_sessions(&email).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].first_query, None);
    assert_eq!(sessions[0].message_count, 0);
}

#[tokio::test]
async fn test_clearing_history_removes_sessions_and_messages() {
    let (_db, chat, email) = setup().await;
    chat.ensure_session("socket-1", &email).await.unwrap();
    chat.ensure_session("socket-2", &email).await.unwrap();
    chat.add_message(&message("msg-1", "socket-1", "hello"))
        .await
        .unwrap();

    let deleted = chat.delete_all_sessions(&email).await.unwrap();
    assert_eq!(deleted, 2);

    assert!(chat.list_sessions(&email).await.unwrap().is_empty());
    assert!(chat.get_messages("socket-1").await.unwrap().is_empty());
    assert_eq!(chat.message_count("socket-1").await.unwrap(), 0);
}

#[tokio::test]
async fn test_history_is_isolated_per_user() {
    let (db, chat, email) = setup().await;
    let (_, other) = create_test_user_with_email(&db, "other@example.com")
        .await
        .unwrap();

    chat.ensure_session("mine", &email).await.unwrap();
    chat.ensure_session("theirs", &other.email).await.unwrap();
    chat.add_message(&message("msg-1", "theirs", "their message"))
        .await
        .unwrap();

    let deleted = chat.delete_all_sessions(&email).await.unwrap();
    assert_eq!(deleted, 1);

    let theirs = chat.list_sessions(&other.email).await.unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].message_count, 1);
}

#[tokio::test]
async fn test_user_count_tracks_registrations() {
    let database = create_test_database().await.unwrap();
    assert_eq!(database.get_user_count().await.unwrap(), 0);

    create_test_user(&database).await.unwrap();
    create_test_user_with_email(&database, "second@example.com")
        .await
        .unwrap();

    assert_eq!(database.get_user_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_file_backed_database_is_created_on_demand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parley.db");
    let url = format!("sqlite:{}", path.display());

    let database = Database::new(&url).await.unwrap();
    create_test_user(&database).await.unwrap();

    assert!(path.exists(), "Database file should be created");
    assert_eq!(database.get_user_count().await.unwrap(), 1);
}
