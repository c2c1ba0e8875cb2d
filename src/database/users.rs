// ABOUTME: User database operations for account storage and retrieval
// ABOUTME: Handles user creation, lookup by email or id, and activity tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

use super::Database;
use crate::models::User;

impl Database {
    /// Run user table migrations
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                last_active DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Create a new user account
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already registered or the insert
    /// fails.
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(anyhow!("Email already registered"));
        }

        sqlx::query(
            r"
            INSERT INTO users (id, email, display_name, password_hash, created_at, last_active)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.last_active)
        .execute(self.pool())
        .await?;

        Ok(user.id)
    }

    /// Get a user by their id
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a user by their email address
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_impl("email", email).await
    }

    /// Get a user by email, returning an error when no account exists
    pub async fn get_user_by_email_required(&self, email: &str) -> Result<User> {
        self.get_user_by_email(email)
            .await?
            .ok_or_else(|| anyhow!("User not found: {email}"))
    }

    async fn get_user_impl(&self, field: &str, value: &str) -> Result<Option<User>> {
        let query = format!(
            "SELECT id, email, display_name, password_hash, created_at, last_active
             FROM users WHERE {field} = ?"
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(self.pool())
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id_str: String = row.get("id");

        Ok(User {
            id: Uuid::parse_str(&id_str)?,
            email: row.get("email"),
            display_name: row.get("display_name"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            last_active: row.get("last_active"),
        })
    }

    /// Record that a user was just seen, used on successful login
    pub async fn update_last_active(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_active = CURRENT_TIMESTAMP WHERE id = ?")
            .bind(user_id.to_string())
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Get the total number of registered users
    pub async fn get_user_count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }
}
