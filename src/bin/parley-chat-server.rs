// ABOUTME: Server binary for the Parley chat service
// ABOUTME: Loads configuration, prepares storage, and runs the HTTP server
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Parley Chat Server Binary
//!
//! Starts the chat web service: registration, login, chat history, and the
//! real-time message channel.

use anyhow::Result;
use clap::Parser;
use parley_chat_server::{
    auth::AuthManager,
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    server::{ChatHttpServer, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "parley-chat-server")]
#[command(about = "Parley - a small chat service with real-time messaging")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle container environments where clap may not work properly
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using configuration from environment");
            Args {
                http_port: None,
                database_url: None,
            }
        }
    };

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    // Apply command-line overrides
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = &args.database_url {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }

    // Initialize logging
    logging::init_from_env()?;

    info!("Starting Parley Chat Server");
    info!("{}", config.summary());

    // File-backed SQLite needs its directory to exist before connecting
    if let DatabaseUrl::SQLite { path } = &config.database.url {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!(
        "Database initialized successfully: {}",
        config.database.url.to_connection_string()
    );

    let auth_manager = AuthManager::new(
        config.auth.session_secret.as_bytes(),
        config.auth.session_expiry_hours,
    );
    info!("Authentication manager initialized");

    let http_host = config.http_host.clone();
    let http_port = config.http_port;

    // Create server resources and server
    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    let server = ChatHttpServer::new(resources);

    display_available_endpoints(&http_host, http_port);

    info!("Ready to serve chat sessions!");

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Display all available endpoints with their ports
fn display_available_endpoints(host: &str, port: u16) {
    info!("=== Available Endpoints ===");
    info!("Pages:");
    info!("   Landing Page:      GET  http://{host}:{port}/");
    info!("   Login:             GET/POST http://{host}:{port}/login");
    info!("   Register:          GET/POST http://{host}:{port}/register");
    info!("   Logout:            GET  http://{host}:{port}/logout");
    info!("Chat:");
    info!("   Session Overview:  GET  http://{host}:{port}/chat");
    info!("   Session History:   GET  http://{host}:{port}/chat/{{session_id}}");
    info!("   Clear History:     GET  http://{host}:{port}/clear_chats");
    info!("   Realtime Channel:  WS   ws://{host}:{port}/ws/chat");
    info!("Monitoring:");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!("=== End of Endpoint List ===");
}
