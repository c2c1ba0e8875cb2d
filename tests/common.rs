// ABOUTME: Shared fixtures for the integration test suites
// ABOUTME: In-memory database setup, seeded users, and session cookie helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Parley Contributors
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! Shared test utilities for `parley_chat_server`
//!
//! Common test setup functions to reduce duplication across integration
//! tests.

use anyhow::Result;
use parley_chat_server::{
    auth::AuthManager,
    config::environment::{
        AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    },
    database::Database,
    models::User,
    server::ServerResources,
};
use std::sync::{Arc, Once};
use uuid::Uuid;

/// Secret used to sign test session tokens
pub const TEST_SESSION_SECRET: &[u8] = b"test-session-secret-at-least-32-bytes-long";

/// Password used for all test accounts
pub const TEST_PASSWORD: &str = "correct horse battery staple";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(TEST_SESSION_SECRET, 24)
}

/// Configuration for tests, independent of environment variables
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 8080,
        http_host: "127.0.0.1".to_string(),
        log_level: LogLevel::Warn,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        auth: AuthConfig {
            session_secret: String::from_utf8_lossy(TEST_SESSION_SECRET).to_string(),
            session_expiry_hours: 24,
        },
    }
}

/// Full resource container over an in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let auth_manager = create_test_auth_manager();
    Ok(Arc::new(ServerResources::new(
        database,
        auth_manager,
        create_test_config(),
    )))
}

/// Create a standard test user with [`TEST_PASSWORD`] as password
pub async fn create_test_user(database: &Database) -> Result<(Uuid, User)> {
    create_test_user_with_email(database, "test@example.com").await
}

/// Create a test user with custom email
pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<(Uuid, User)> {
    // Minimum bcrypt cost keeps the suite fast
    let password_hash = bcrypt::hash(TEST_PASSWORD, 4)?;
    let user = User::new(
        email.to_string(),
        password_hash,
        "Test User".to_string(),
    );
    let user_id = user.id;

    database.create_user(&user).await?;
    Ok((user_id, user))
}

/// Build the Cookie header value for an authenticated request
pub fn session_cookie_for(resources: &Arc<ServerResources>, user: &User) -> String {
    let token = resources.auth_manager.issue_session(user).unwrap();
    format!("parley_session={token}")
}

/// Extract one cookie value from a Set-Cookie header line
pub fn cookie_value_from_set_cookie(set_cookie: &str, name: &str) -> Option<String> {
    set_cookie.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}
