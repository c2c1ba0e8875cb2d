// ABOUTME: Core data models for the Parley chat server
// ABOUTME: Defines User, ChatSession, ChatMessage and the authenticated session principal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! # Models
//!
//! Core data structures used throughout the Parley chat server.
//!
//! - `User`: A registered account, identified by email
//! - `ChatSession`: One chat thread, keyed by the realtime channel's socket id
//! - `ChatMessage`: A user query plus the assistant response, client-keyed
//! - `SessionUser`: The authenticated principal decoded from the session cookie

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ================================================================================================
// Identity Models
// ================================================================================================

/// Represents a registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for identification)
    pub email: String,
    /// Display name shown in the chat interface
    pub display_name: String,
    /// Hashed password for authentication
    pub password_hash: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time the user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given email and password hash
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            created_at: now,
            last_active: now,
        }
    }
}

/// Authenticated principal decoded from a valid session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// Unique user identifier
    pub user_id: Uuid,
    /// User email address
    pub email: String,
    /// Display name shown in the chat interface
    pub display_name: String,
}

// ================================================================================================
// Chat Models
// ================================================================================================

/// One chat thread owned by a user
///
/// The session id is the realtime channel's socket id, supplied by the client
/// when the first message of the thread arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Session identifier (socket id of the originating connection)
    pub id: String,
    /// Email of the owning user
    pub user_email: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create a new chat session owned by the given user
    #[must_use]
    pub fn new(id: String, user_email: String) -> Self {
        Self {
            id,
            user_email,
            created_at: Utc::now(),
        }
    }
}

/// A stored chat exchange: the user query and the assistant response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message identifier, supplied by the client
    pub id: String,
    /// Session this message belongs to
    pub session_id: String,
    /// Text the user sent
    pub query: String,
    /// Text the assistant replied with
    pub response: String,
    /// When the message was stored
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new chat message for the given session
    #[must_use]
    pub fn new(id: String, session_id: String, query: String, response: String) -> Self {
        Self {
            id,
            session_id,
            query,
            response,
            created_at: Utc::now(),
        }
    }
}

/// A chat session together with its preview data for the overview listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSessionSummary {
    /// Session identifier
    pub id: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Query text of the earliest message, if any
    pub first_query: Option<String>,
    /// Number of stored messages in the session
    pub message_count: i64,
}
