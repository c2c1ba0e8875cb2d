// ABOUTME: Database management for user accounts and chat persistence
// ABOUTME: Owns the SQLite pool, runs migrations, and exposes per-domain operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! # Database Layer
//!
//! `SQLite` storage for the Parley chat server: user accounts plus chat
//! session and message persistence.

mod chat;
mod users;

pub use chat::ChatManager;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::constants::database as db_constants;

/// Database manager for user and chat storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = if database_url.contains(":memory:") {
            // Each pooled connection would open its own in-memory database,
            // so the pool must stay at a single connection.
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await?
        } else {
            // Ensure SQLite creates the database file if it doesn't exist
            let connection_options = if database_url.starts_with("sqlite:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_string()
            };
            SqlitePoolOptions::new()
                .max_connections(db_constants::POOL_MAX_SIZE)
                .connect(&connection_options)
                .await?
        };

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a table or index creation fails.
    pub async fn migrate(&self) -> Result<()> {
        // User tables
        self.migrate_users().await?;

        // Chat session and message tables
        self.migrate_chat().await?;

        Ok(())
    }

    /// Build a chat manager over this database's pool
    #[must_use]
    pub fn chat(&self) -> ChatManager {
        ChatManager::new(self.pool.clone())
    }
}
