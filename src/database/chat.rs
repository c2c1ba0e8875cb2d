// ABOUTME: Database operations for chat sessions and their message history
// ABOUTME: Handles session creation, message persistence, and per-user cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

use sqlx::{Row, SqlitePool};

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{ChatMessage, ChatSession, ChatSessionSummary};

impl Database {
    /// Run chat table migrations
    pub(super) async fn migrate_chat(&self) -> anyhow::Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS chat_sessions (
                id TEXT PRIMARY KEY,
                user_email TEXT NOT NULL REFERENCES users(email) ON DELETE CASCADE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS chat_messages (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL REFERENCES chat_sessions(id) ON DELETE CASCADE,
                query TEXT NOT NULL,
                response TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_sessions_user_email ON chat_sessions(user_email)",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_messages_session_id ON chat_messages(session_id)",
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}

/// Manager for chat session database operations
#[derive(Clone)]
pub struct ChatManager {
    pool: SqlitePool,
}

impl ChatManager {
    /// Create a new chat manager with the given database pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the session row if it does not already exist
    ///
    /// Returns `true` when a new session was created, `false` when the id was
    /// already known. Messages for an existing session reuse its row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn ensure_session(&self, session_id: &str, user_email: &str) -> AppResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO chat_sessions (id, user_email, created_at)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO NOTHING
            ",
        )
        .bind(session_id)
        .bind(user_email)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create chat session: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a single session by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_session(&self, session_id: &str) -> AppResult<Option<ChatSession>> {
        let row = sqlx::query(
            "SELECT id, user_email, created_at FROM chat_sessions WHERE id = ?",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get chat session: {e}")))?;

        Ok(row.map(|row| ChatSession {
            id: row.get("id"),
            user_email: row.get("user_email"),
            created_at: row.get("created_at"),
        }))
    }

    /// List a user's sessions, newest first, with a preview of the opening
    /// message
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_sessions(&self, user_email: &str) -> AppResult<Vec<ChatSessionSummary>> {
        let rows = sqlx::query(
            r"
            SELECT s.id, s.created_at,
                   (SELECT m.query FROM chat_messages m
                    WHERE m.session_id = s.id
                    ORDER BY m.created_at ASC, m.rowid ASC
                    LIMIT 1) as first_query,
                   COUNT(m.id) as message_count
            FROM chat_sessions s
            LEFT JOIN chat_messages m ON m.session_id = s.id
            WHERE s.user_email = ?
            GROUP BY s.id
            ORDER BY s.created_at DESC
            ",
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list chat sessions: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| ChatSessionSummary {
                id: row.get("id"),
                created_at: row.get("created_at"),
                first_query: row.get("first_query"),
                message_count: row.get("message_count"),
            })
            .collect())
    }

    /// Persist a message exchange in a session
    ///
    /// Message ids are supplied by the client, so a replayed id is rejected
    /// rather than stored twice.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorCode::ResourceAlreadyExists`](crate::errors::ErrorCode)
    /// when the message id was already stored, or a database error if the
    /// insert fails.
    pub async fn add_message(&self, message: &ChatMessage) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO chat_messages (id, session_id, query, response, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(&message.id)
        .bind(&message.session_id)
        .bind(&message.query)
        .bind(&message.response)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::already_exists("Message").with_resource_id(&message.id)
            }
            _ => AppError::database(format!("Failed to store chat message: {e}")),
        })?;

        Ok(())
    }

    /// Get all messages in a session in chronological order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get_messages(&self, session_id: &str) -> AppResult<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r"
            SELECT id, session_id, query, response, created_at
            FROM chat_messages
            WHERE session_id = ?
            ORDER BY created_at ASC, rowid ASC
            ",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get chat messages: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|row| ChatMessage {
                id: row.get("id"),
                session_id: row.get("session_id"),
                query: row.get("query"),
                response: row.get("response"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// Count the messages stored for a session
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn message_count(&self, session_id: &str) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count chat messages: {e}")))
    }

    /// Delete all of a user's sessions and their messages
    ///
    /// Returns the number of sessions removed. Both deletes run in one
    /// transaction so a failure leaves the history intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails.
    #[allow(clippy::cast_possible_wrap)]
    pub async fn delete_all_sessions(&self, user_email: &str) -> AppResult<i64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            r"
            DELETE FROM chat_messages
            WHERE session_id IN (SELECT id FROM chat_sessions WHERE user_email = ?)
            ",
        )
        .bind(user_email)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete chat messages: {e}")))?;

        let result = sqlx::query("DELETE FROM chat_sessions WHERE user_email = ?")
            .bind(user_email)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete chat sessions: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))?;

        Ok(result.rows_affected() as i64)
    }
}
