// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment-derived configuration and runtime options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! Configuration module for the Parley chat server
//!
//! Centralized configuration management, loaded from environment variables:
//!
//! - **Environment**: ports, database location, session settings, log level

/// Environment and server configuration
pub mod environment;

// Re-export main configuration types from environment
pub use environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
