// ABOUTME: Chat routes for the session overview, message history, and history clearing
// ABOUTME: Provides the authenticated chat endpoints backing the browser interface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! Chat routes
//!
//! Session listing and message history for the logged-in user. All handlers
//! require a valid session cookie; browser requests without one are redirected
//! to the login page instead of receiving an API error.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::routes;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::models::{ChatMessage, ChatSessionSummary, SessionUser};
use crate::server::ServerResources;

// ============================================================================
// Response Types
// ============================================================================

/// One chat session in the overview listing
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSummaryResponse {
    /// Session identifier
    pub id: String,
    /// When the session was created (ISO 8601)
    pub created_at: String,
    /// Query text of the session's first message, if any
    pub first_query: Option<String>,
    /// Number of stored messages
    pub message_count: i64,
}

impl From<ChatSessionSummary> for SessionSummaryResponse {
    fn from(summary: ChatSessionSummary) -> Self {
        Self {
            id: summary.id,
            created_at: summary.created_at.to_rfc3339(),
            first_query: summary.first_query,
            message_count: summary.message_count,
        }
    }
}

/// Response for the chat overview
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListResponse {
    /// Sessions owned by the caller, newest first
    pub sessions: Vec<SessionSummaryResponse>,
    /// Total number of sessions
    pub total: usize,
}

/// One stored message exchange
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message identifier
    pub id: String,
    /// Text the user sent
    pub query: String,
    /// Text the assistant replied with
    pub response: String,
    /// When the message was stored (ISO 8601)
    pub created_at: String,
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            query: message.query,
            response: message.response,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

/// Response for a session's message history
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionHistoryResponse {
    /// Session identifier
    pub session_id: String,
    /// Messages in chronological order
    pub messages: Vec<MessageResponse>,
}

// ============================================================================
// Routes
// ============================================================================

/// Chat route handlers
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::CHAT, get(Self::handle_list_sessions))
            .route("/chat/:id", get(Self::handle_session_history))
            .route(routes::CLEAR_CHATS, get(Self::handle_clear_chats))
            .with_state(resources)
    }

    /// Extract the authenticated user from the session cookie
    fn authenticate(
        headers: &HeaderMap,
        resources: &Arc<ServerResources>,
    ) -> Result<SessionUser, AppError> {
        resources.auth_manager.session_from_headers(headers)
    }

    /// Handle GET /chat - list the caller's sessions with first-message previews
    async fn handle_list_sessions(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = match Self::authenticate(&headers, &resources) {
            Ok(user) => user,
            Err(_) => return Ok(Redirect::to(routes::LOGIN).into_response()),
        };

        let sessions = resources.chat.list_sessions(&user.email).await?;
        let response = SessionListResponse {
            total: sessions.len(),
            sessions: sessions.into_iter().map(Into::into).collect(),
        };

        Ok(Json(response).into_response())
    }

    /// Handle GET /chat/:id - full message history for one session
    ///
    /// A session owned by another user is reported as missing rather than
    /// forbidden, so session ids cannot be probed.
    async fn handle_session_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(session_id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = match Self::authenticate(&headers, &resources) {
            Ok(user) => user,
            Err(_) => return Ok(Redirect::to(routes::LOGIN).into_response()),
        };

        let session = resources
            .chat
            .get_session(&session_id)
            .await?
            .filter(|session| session.user_email == user.email)
            .ok_or_else(|| AppError::not_found("Chat session").with_resource_id(&session_id))?;

        let messages = resources.chat.get_messages(&session.id).await?;
        let response = SessionHistoryResponse {
            session_id: session.id,
            messages: messages.into_iter().map(Into::into).collect(),
        };

        Ok(Json(response).into_response())
    }

    /// Handle GET /clear_chats - delete the caller's chat history
    async fn handle_clear_chats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = match Self::authenticate(&headers, &resources) {
            Ok(user) => user,
            Err(_) => return Ok(Redirect::to(routes::LOGIN).into_response()),
        };

        let deleted = resources.chat.delete_all_sessions(&user.email).await?;
        info!("Cleared {deleted} chat sessions for user: {}", user.email);
        AppLogger::log_chat_event(&user.email, "all", "sessions_cleared", true);

        Ok(Redirect::to(routes::CHAT).into_response())
    }
}
