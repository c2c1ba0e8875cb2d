// ABOUTME: Application constants grouped by domain
// ABOUTME: Environment lookups, route paths, limits, and protocol strings in one place

//! Application constants
//!
//! Grouped into small domain modules rather than scattered through the
//! codebase.

use std::env;

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get HTTP server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(super::ports::DEFAULT_HTTP_PORT)
    }

    /// Get bind host from environment or default
    #[must_use]
    pub fn http_host() -> String {
        env::var("HTTP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/parley.db".to_string())
    }

    /// Get session expiry in hours from environment or default
    #[must_use]
    pub fn session_expiry_hours() -> i64 {
        env::var("SESSION_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(super::limits::DEFAULT_SESSION_HOURS)
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
    }
}

/// Network ports
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
}

/// HTTP routes
pub mod routes {
    /// Landing page route
    pub const INDEX: &str = "/";
    /// Login page and form handler route
    pub const LOGIN: &str = "/login";
    /// Registration page and form handler route
    pub const REGISTER: &str = "/register";
    /// Logout route
    pub const LOGOUT: &str = "/logout";
    /// Chat overview route
    pub const CHAT: &str = "/chat";
    /// Clear chat history route
    pub const CLEAR_CHATS: &str = "/clear_chats";
    /// Health route
    pub const HEALTH: &str = "/health";
    /// Realtime chat channel route
    pub const WS_CHAT: &str = "/ws/chat";
}

/// Default limits
pub mod limits {
    /// Default session cookie lifetime in hours
    pub const DEFAULT_SESSION_HOURS: i64 = 24;
    /// Maximum accepted chat message length in characters
    pub const MAX_MESSAGE_TEXT_CHARS: usize = 4000;
    /// Maximum accepted display name length in characters
    pub const MAX_DISPLAY_NAME_CHARS: usize = 120;
}

/// Cryptographic constants
pub mod crypto {
    /// JWT algorithm for session tokens
    pub const JWT_ALGORITHM: &str = "HS256";
    /// Session secret minimum length in bytes
    pub const SECRET_KEY_MIN_LENGTH: usize = 32;
    /// Name of the session cookie
    pub const SESSION_COOKIE: &str = "parley_session";
}

/// Database configuration
pub mod database {
    /// Connection pool maximum size
    pub const POOL_MAX_SIZE: u32 = 10;
}

/// Time constants
pub mod time_constants {
    /// Seconds in an hour
    pub const SECONDS_PER_HOUR: i64 = 3600;
}

/// Service names for logging
pub mod service_names {
    /// Canonical service name
    pub const PARLEY_CHAT_SERVER: &str = "parley-chat-server";
}

/// Realtime protocol strings
pub mod protocol {
    /// Fixed assistant reply sent for every chat message
    pub const CANNED_REPLY: &str = "This is a placeholder response from the Parley assistant.";
}
