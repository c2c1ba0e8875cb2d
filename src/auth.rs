// ABOUTME: Session token management for cookie-based authentication
// ABOUTME: Issues and validates signed HS256 session tokens carrying the user identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Parley Contributors

//! # Authentication and session management
//!
//! Signed session tokens are issued at login, stored in an `HttpOnly` cookie,
//! and validated on every protected request. The token carries the user id,
//! email, and display name so protected handlers never need a database lookup
//! just to know who is asking.

use crate::constants::crypto;
use crate::errors::{AppError, AppResult};
use crate::models::{SessionUser, User};
use crate::security::cookies::get_cookie_value;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// User email
    pub email: String,
    /// Display name
    pub name: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authentication manager for signed session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager from the shared session secret
    #[must_use]
    pub fn new(secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_expiry_hours,
        }
    }

    /// Issue a session token for a freshly authenticated user
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails.
    pub fn issue_session(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }

    /// Validate a session token and return the authenticated principal
    ///
    /// # Errors
    ///
    /// Returns an error if the token is expired, tampered with, or malformed.
    pub fn validate_session(&self, token: &str) -> AppResult<SessionUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| Self::convert_jwt_error(&e))?;

        let claims = token_data.claims;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Session token carries an invalid user id"))?;

        Ok(SessionUser {
            user_id,
            email: claims.email,
            display_name: claims.name,
        })
    }

    /// Resolve the authenticated principal from request headers
    ///
    /// Looks for the session cookie and validates its token.
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::ErrorCode::AuthRequired`] when no session
    /// cookie is present, or the validation error for a bad token.
    pub fn session_from_headers(&self, headers: &HeaderMap) -> AppResult<SessionUser> {
        let token = get_cookie_value(headers, crypto::SESSION_COOKIE)
            .ok_or_else(AppError::auth_required)?;
        self.validate_session(&token)
    }

    /// Convert token library errors into application errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> AppError {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => {
                tracing::debug!("Session token expired");
                AppError::auth_expired()
            }
            ErrorKind::InvalidSignature => {
                tracing::warn!("Session token signature verification failed");
                AppError::auth_invalid("Session signature verification failed")
            }
            _ => {
                tracing::debug!("Session token rejected: {:?}", e);
                AppError::auth_invalid("Session token is invalid")
            }
        }
    }
}
