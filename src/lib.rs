// ABOUTME: Main library entry point for the Parley chat server
// ABOUTME: Provides registration, login, chat history, and a real-time message bridge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

#![deny(unsafe_code)]

//! # Parley Chat Server
//!
//! A small chat web service: user registration and login, a chat interface
//! with per-session history, and real-time messaging over a `WebSocket`
//! channel. Users, chat sessions, and messages are persisted in `SQLite`.
//!
//! ## Features
//!
//! - **Account management**: registration and login with bcrypt-hashed
//!   passwords and signed session cookies
//! - **Chat history**: sessions are created lazily from the realtime
//!   channel's socket id and listed with first-message previews
//! - **Real-time bridge**: a `WebSocket` channel persists each message and
//!   answers with a placeholder reply
//!
//! ## Quick Start
//!
//! 1. Set `SESSION_SECRET` (and optionally `DATABASE_URL`, `HTTP_PORT`)
//! 2. Start the server with `parley-chat-server`
//! 3. Open the landing page and register an account
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use parley_chat_server::config::environment::ServerConfig;
//! use parley_chat_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!(
//!         "Parley chat server configured with port: HTTP={}",
//!         config.http_port
//!     );
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binary crate (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access
// them.

/// Session tokens and password verification
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants grouped by domain
pub mod constants;

/// `SQLite` storage for users and chat history
pub mod database;

/// Error types, stable error codes, and HTTP response mapping
pub mod errors;

/// Structured logging configuration
pub mod logging;

/// Core data models
pub mod models;

/// `HTTP` routes organized by domain
pub mod routes;

/// Cookie handling helpers
pub mod security;

/// Server assembly and lifecycle
pub mod server;

/// Real-time chat bridge over `WebSocket`
pub mod websocket;
