// ABOUTME: Route module organization for the Parley chat server HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! Route module for the Parley chat server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains only route definitions and thin handler functions that delegate
//! to the database and auth layers.

/// Authentication routes: login, registration, logout
pub mod auth;
/// Chat overview and history routes
pub mod chat;
/// Health check routes
pub mod health;
/// Landing page routes and shared HTML rendering
pub mod pages;
/// WebSocket upgrade route for the real-time chat bridge
pub mod websocket;

/// Authentication route handlers
pub use auth::AuthRoutes;
/// Chat route handlers
pub use chat::ChatRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Landing page route handlers
pub use pages::PageRoutes;
/// WebSocket route handlers
pub use websocket::WebSocketRoutes;
