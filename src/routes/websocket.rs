// ABOUTME: WebSocket route handler for the real-time chat channel
// ABOUTME: Authenticates the session cookie and upgrades to the chat bridge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

use std::sync::Arc;

use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        State,
    },
    http::HeaderMap,
    response::Response,
    routing::get,
    Router,
};
use tracing::{debug, info};

use crate::constants::routes;
use crate::errors::AppError;
use crate::server::ServerResources;

/// WebSocket routes implementation
pub struct WebSocketRoutes;

impl WebSocketRoutes {
    /// Create the chat channel route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::WS_CHAT, get(Self::handle_websocket))
            .with_state(resources)
    }

    /// Handle WebSocket upgrade for the chat channel
    ///
    /// The session cookie is checked before upgrading, so the bridge only
    /// ever sees authenticated connections. Requests without a valid session
    /// are rejected with an authentication error.
    async fn handle_websocket(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        ws: WebSocketUpgrade,
    ) -> Result<Response, AppError> {
        let user = resources.auth_manager.session_from_headers(&headers)?;
        info!("New chat channel connection request from: {}", user.email);

        Ok(ws.on_upgrade(move |socket: WebSocket| async move {
            debug!("WebSocket upgraded, delegating to chat bridge");
            resources.bridge.handle_connection(socket, user).await;
        }))
    }
}
