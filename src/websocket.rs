// ABOUTME: WebSocket bridge for real-time chat messaging
// ABOUTME: Handles socket connections, chat message events, and canned replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! Real-time chat bridge
//!
//! Carries the chat channel over a `WebSocket` connection. Clients announce
//! their socket id, then send message events; each message is persisted and
//! answered with a placeholder reply on the same connection.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::constants::{limits, protocol};
use crate::database::ChatManager;
use crate::errors::ErrorCode;
use crate::logging::AppLogger;
use crate::models::{ChatMessage, SessionUser};

// WebSocket message type alias for Axum
type Message = axum::extract::ws::Message;

/// Chat channel event types, tagged JSON text frames
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatSocketMessage {
    /// Connection-id announcement from the client, logged only
    #[serde(rename = "connected")]
    Connected {
        /// Socket id the client will use as its session key
        socket_id: String,
    },
    /// A chat message from the client
    #[serde(rename = "message")]
    Message {
        /// Socket id keying the chat session
        socket_id: String,
        /// Client-assigned message id
        message_id: String,
        /// Text the user typed
        message_text: String,
        /// Email the client claims to act for
        email: String,
    },
    /// Assistant reply to a stored message
    #[serde(rename = "reply")]
    Reply {
        /// Reply text
        message_text: String,
    },
    /// Error event, the connection stays open
    #[serde(rename = "error")]
    Error {
        /// Error description
        message: String,
    },
}

/// Manages chat `WebSocket` connections and message persistence
#[derive(Clone)]
pub struct ChatBridge {
    chat: ChatManager,
    clients: Arc<RwLock<HashMap<Uuid, ClientConnection>>>,
}

#[derive(Debug)]
struct ClientConnection {
    user_id: Uuid,
    tx: tokio::sync::mpsc::UnboundedSender<Message>,
}

impl ChatBridge {
    /// Creates a new chat bridge over the given chat store
    #[must_use]
    pub fn new(chat: ChatManager) -> Self {
        Self {
            chat,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of currently connected clients
    pub async fn active_connections(&self) -> usize {
        self.clients.read().await.len()
    }

    /// Handle one authenticated `WebSocket` connection until it closes
    pub async fn handle_connection(&self, ws: axum::extract::ws::WebSocket, user: SessionUser) {
        let (mut ws_tx, mut ws_rx) = ws.split();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let connection_id = Uuid::new_v4();
        {
            let client = ClientConnection {
                user_id: user.user_id,
                tx: tx.clone(),
            };
            let mut clients = self.clients.write().await;
            info!(
                user_id = %client.user_id,
                user_email = %user.email,
                connection_id = %connection_id,
                active_connections = clients.len() + 1,
                "Chat client connected"
            );
            clients.insert(connection_id, client);
        }

        // Forward outbound events to the socket from a dedicated task so
        // persistence work never holds the sink
        let ws_send_task = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if ws_tx.send(message).await.is_err() {
                    break;
                }
            }
        });

        while let Some(msg) = ws_rx.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<ChatSocketMessage>(&text) {
                    Ok(ChatSocketMessage::Connected { socket_id }) => {
                        debug!(
                            user_email = %user.email,
                            socket_id = %socket_id,
                            "Chat client announced socket id"
                        );
                    }
                    Ok(ChatSocketMessage::Message {
                        socket_id,
                        message_id,
                        message_text,
                        email,
                    }) => {
                        self.handle_chat_message(
                            &user,
                            &socket_id,
                            &message_id,
                            &message_text,
                            &email,
                            &tx,
                        )
                        .await;
                    }
                    // Reply and error events only travel server to client
                    Ok(_) => {}
                    Err(e) => {
                        send_event(
                            &tx,
                            &ChatSocketMessage::Error {
                                message: format!("Invalid message format: {e}"),
                            },
                        );
                    }
                },
                Ok(Message::Close(_)) | Err(_) => break,
                _ => {}
            }
        }

        ws_send_task.abort();
        {
            let mut clients = self.clients.write().await;
            clients.remove(&connection_id);
            info!(
                user_email = %user.email,
                connection_id = %connection_id,
                active_connections = clients.len(),
                "Chat client disconnected"
            );
        }
    }

    /// Persist one chat message and queue the reply for the originating client
    async fn handle_chat_message(
        &self,
        user: &SessionUser,
        socket_id: &str,
        message_id: &str,
        message_text: &str,
        claimed_email: &str,
        tx: &tokio::sync::mpsc::UnboundedSender<Message>,
    ) {
        if message_text.trim().is_empty() {
            send_event(
                tx,
                &ChatSocketMessage::Error {
                    message: "Message text must not be empty".into(),
                },
            );
            return;
        }

        if message_text.chars().count() > limits::MAX_MESSAGE_TEXT_CHARS {
            send_event(
                tx,
                &ChatSocketMessage::Error {
                    message: format!(
                        "Message text exceeds {} characters",
                        limits::MAX_MESSAGE_TEXT_CHARS
                    ),
                },
            );
            return;
        }

        // Sessions always belong to the authenticated user; the email field
        // in the event is client-reported and never trusted
        if claimed_email != user.email {
            warn!(
                user_email = %user.email,
                claimed_email = %claimed_email,
                socket_id = %socket_id,
                "Chat message carried a mismatched email, using the session identity"
            );
        }

        match self.chat.ensure_session(socket_id, &user.email).await {
            Ok(true) => {
                AppLogger::log_chat_event(&user.email, socket_id, "session_created", true);
            }
            Ok(false) => {}
            Err(e) => {
                AppLogger::log_chat_event(&user.email, socket_id, "session_create_failed", false);
                warn!(error = %e, socket_id = %socket_id, "Failed to create chat session");
                send_event(
                    tx,
                    &ChatSocketMessage::Error {
                        message: "Failed to store message".into(),
                    },
                );
                return;
            }
        }

        let message = ChatMessage::new(
            message_id.to_string(),
            socket_id.to_string(),
            message_text.to_string(),
            protocol::CANNED_REPLY.to_string(),
        );

        match self.chat.add_message(&message).await {
            Ok(()) => {
                AppLogger::log_chat_event(&user.email, socket_id, "message_stored", true);
                send_event(
                    tx,
                    &ChatSocketMessage::Reply {
                        message_text: protocol::CANNED_REPLY.to_string(),
                    },
                );
            }
            Err(e) if e.code == ErrorCode::ResourceAlreadyExists => {
                send_event(
                    tx,
                    &ChatSocketMessage::Error {
                        message: format!("Message {message_id} was already stored"),
                    },
                );
            }
            Err(e) => {
                AppLogger::log_chat_event(&user.email, socket_id, "message_store_failed", false);
                warn!(error = %e, socket_id = %socket_id, "Failed to store chat message");
                send_event(
                    tx,
                    &ChatSocketMessage::Error {
                        message: "Failed to store message".into(),
                    },
                );
            }
        }
    }
}

/// Queue one event for the forwarding task, logging delivery failures
fn send_event(tx: &tokio::sync::mpsc::UnboundedSender<Message>, event: &ChatSocketMessage) {
    if let Ok(json) = serde_json::to_string(event) {
        if let Err(e) = tx.send(Message::Text(json)) {
            warn!(error = ?e, "Failed to queue chat event for delivery");
        }
    }
}
