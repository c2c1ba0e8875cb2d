// ABOUTME: HTTP server assembly wiring routes, shared resources, and shutdown
// ABOUTME: Owns ServerResources and runs the axum server with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! # Server Assembly
//!
//! Builds the shared resource container, assembles the route tree, and runs
//! the HTTP server until a shutdown signal arrives.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::{ChatManager, Database};
use crate::errors::{AppError, AppResult};
use crate::routes::{AuthRoutes, ChatRoutes, HealthRoutes, PageRoutes, WebSocketRoutes};
use crate::websocket::ChatBridge;

/// Centralized container for all shared server resources
///
/// Handlers receive this via axum state, so resources are created once at
/// startup instead of per request.
#[derive(Clone)]
pub struct ServerResources {
    /// Database connection for user storage
    pub database: Arc<Database>,
    /// Session token manager
    pub auth_manager: Arc<AuthManager>,
    /// Chat session and message store
    pub chat: ChatManager,
    /// Real-time chat bridge
    pub bridge: ChatBridge,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create a new resource container from startup components
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager, config: ServerConfig) -> Self {
        let chat = database.chat();
        let bridge = ChatBridge::new(chat.clone());

        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            chat,
            bridge,
            config: Arc::new(config),
        }
    }
}

/// The Parley chat HTTP server
pub struct ChatHttpServer {
    resources: Arc<ServerResources>,
}

impl ChatHttpServer {
    /// Create a new server over the given resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Assemble the full route tree
    #[must_use]
    pub fn router(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .merge(PageRoutes::routes(resources.clone()))
            .merge(AuthRoutes::routes(resources.clone()))
            .merge(ChatRoutes::routes(resources.clone()))
            .merge(WebSocketRoutes::routes(resources))
            .merge(HealthRoutes::routes())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address cannot be bound or the server
    /// fails while running.
    pub async fn run(&self) -> AppResult<()> {
        let bind_address = format!(
            "{}:{}",
            self.resources.config.http_host, self.resources.config.http_port
        );
        let listener = tokio::net::TcpListener::bind(&bind_address)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {bind_address}: {e}")))?;

        info!("Parley chat server listening on http://{bind_address}");

        let router = Self::router(self.resources.clone());
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        info!("Parley chat server stopped");
        Ok(())
    }
}

/// Resolves when ctrl-c arrives, triggering graceful shutdown
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => {
            warn!(error = %e, "Failed to install shutdown signal handler");
            // Without a signal handler the server runs until killed
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::environment::{
        AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel,
    };

    async fn test_resources() -> Arc<ServerResources> {
        let database = Database::new("sqlite::memory:").await.unwrap();
        let auth_manager = AuthManager::new(b"test-secret-key-at-least-32-bytes!!", 1);
        let config = ServerConfig {
            http_port: 8080,
            http_host: "127.0.0.1".into(),
            log_level: LogLevel::Info,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                session_secret: "test-secret-key-at-least-32-bytes!!".into(),
                session_expiry_hours: 1,
            },
        };
        Arc::new(ServerResources::new(database, auth_manager, config))
    }

    #[tokio::test]
    async fn test_router_assembles_all_routes() {
        let resources = test_resources().await;
        // Panics on duplicate route registration, so building is the test
        let _router = ChatHttpServer::router(resources);
    }
}
