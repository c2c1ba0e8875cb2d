// ABOUTME: Typed server configuration loaded from environment variables
// ABOUTME: Covers port, database URL, session secret, and deployment mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! Server configuration loaded from the environment
//!
//! Everything the server needs at startup is collected into [`ServerConfig`]
//! and validated once, so handlers never read environment variables directly.

use crate::constants::{crypto, env_config};
use anyhow::{Context, Result};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose debugging output
    Debug,
    /// Maximum verbosity
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for deployment-specific behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated testing
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for database schemes this build does not support.
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            return Err(anyhow::anyhow!(
                "PostgreSQL URLs are not supported by this build"
            ));
        }
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_string(),
        }
    }

    /// Check if this is an in-memory database
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/parley.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP port
    pub http_port: u16,
    /// Bind host
    pub http_host: String,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Session authentication configuration
    pub auth: AuthConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite path or in-memory)
    pub url: DatabaseUrl,
}

/// Session authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens
    #[serde(skip_serializing)]
    pub session_secret: String,
    /// Session lifetime in hours
    pub session_expiry_hours: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment value fails validation.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_config::http_port(),
            http_host: env_config::http_host(),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )?),

            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_config::database_url())
                    .context("Invalid DATABASE_URL value")?,
            },

            auth: AuthConfig {
                session_secret: session_secret_from_env(),
                session_expiry_hours: env_config::session_expiry_hours(),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when a value is outside its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.auth.session_secret.len() < crypto::SECRET_KEY_MIN_LENGTH {
            return Err(anyhow::anyhow!(
                "SESSION_SECRET must be at least {} bytes",
                crypto::SECRET_KEY_MIN_LENGTH
            ));
        }

        if self.auth.session_expiry_hours <= 0 {
            return Err(anyhow::anyhow!(
                "SESSION_EXPIRY_HOURS must be a positive number of hours"
            ));
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    pub fn summary(&self) -> String {
        format!(
            "Parley Chat Server Configuration:\n\
             - HTTP Port: {}\n\
             - Bind Host: {}\n\
             - Log Level: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Session Expiry: {}h",
            self.http_port,
            self.http_host,
            self.log_level,
            self.environment,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.auth.session_expiry_hours,
        )
    }
}

/// Read the session secret, generating an ephemeral one when unset
fn session_secret_from_env() -> String {
    env::var("SESSION_SECRET").unwrap_or_else(|_| {
        warn!("SESSION_SECRET not set; generating an ephemeral secret, sessions will not survive a restart");
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    })
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
        assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("info"), LogLevel::Info);
        assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("trace"), LogLevel::Trace);
        assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("production"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("PROD"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("test"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything-else"),
            Environment::Development
        );
    }

    #[test]
    fn test_database_url_parsing() {
        let memory = DatabaseUrl::parse_url("sqlite::memory:").unwrap();
        assert!(memory.is_memory());
        assert_eq!(memory.to_connection_string(), "sqlite::memory:");

        let file = DatabaseUrl::parse_url("sqlite:./data/parley.db").unwrap();
        assert!(!file.is_memory());
        assert_eq!(file.to_connection_string(), "sqlite:./data/parley.db");

        let bare_path = DatabaseUrl::parse_url("./data/parley.db").unwrap();
        assert_eq!(bare_path.to_connection_string(), "sqlite:./data/parley.db");

        assert!(DatabaseUrl::parse_url("postgresql://localhost/parley").is_err());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = ServerConfig {
            http_port: 8080,
            http_host: "127.0.0.1".into(),
            log_level: LogLevel::Info,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                session_secret: "short".into(),
                session_expiry_hours: 24,
            },
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_excludes_secret() {
        let config = ServerConfig {
            http_port: 8080,
            http_host: "127.0.0.1".into(),
            log_level: LogLevel::Info,
            environment: Environment::Testing,
            database: DatabaseConfig {
                url: DatabaseUrl::Memory,
            },
            auth: AuthConfig {
                session_secret: "a-secret-value-that-is-long-enough-to-pass".into(),
                session_expiry_hours: 24,
            },
        };
        let summary = config.summary();
        assert!(summary.contains("SQLite (in-memory)"));
        assert!(!summary.contains("a-secret-value"));
    }
}
